use serde::{Deserialize, Serialize};
use sheetref_engine::engine::{Rgb, rgb_to_hex};

/// Metadata for one sheet (tab) as fetched from the spreadsheet.
///
/// Accepts both the compact form (`id`, `title`, `color`) and the API's
/// `SheetProperties` names (`sheetId`, `tabColor`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    #[serde(alias = "sheetId", alias = "sheet_id")]
    pub id: i64,
    pub title: String,
    #[serde(
        default,
        alias = "tabColor",
        alias = "tab_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Rgb>,
}

impl SheetDescriptor {
    pub fn new(id: i64, title: impl Into<String>) -> SheetDescriptor {
        SheetDescriptor {
            id,
            title: title.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> SheetDescriptor {
        self.color = Some(color);
        self
    }

    pub fn summary(&self) -> SheetSummary {
        SheetSummary {
            id: self.id,
            name: self.title.clone(),
            color: self.color.as_ref().map(rgb_to_hex),
        }
    }
}

/// Listing entry: id, name and `#rrggbb` tab color.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
