//! Batch-update request bodies, shaped like the Sheets v4 JSON API.
//!
//! Only the handful of requests the session builds are modelled. Optional
//! fields are omitted from the JSON when unset.

use serde::Serialize;
use sheetref_engine::engine::{FilterCriteria, GridRange, Rgb};

/// Body of a `spreadsheets.batchUpdate` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchUpdate {
    pub requests: Vec<Request>,
}

impl BatchUpdate {
    pub fn push(&mut self, request: Request) -> &mut Self {
        self.requests.push(request);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    UpdateSheetProperties(UpdateSheetProperties),
    RepeatCell(RepeatCell),
    ClearBasicFilter(ClearBasicFilter),
    SetBasicFilter(SetBasicFilter),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSheetProperties {
    pub properties: SheetProperties,
    /// Field mask naming the properties being written.
    pub fields: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Rgb>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatCell {
    pub range: GridRange,
    pub cell: CellData,
    pub fields: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub number_format: NumberFormat,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumberFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub pattern: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearBasicFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetBasicFilter {
    pub filter: BasicFilter,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BasicFilter {
    pub range: GridRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<FilterCriteria>,
}

/// Body of a `spreadsheets.values.update` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Body of a `spreadsheets.values.batchClear` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchClear {
    pub ranges: Vec<String>,
}

impl Request {
    pub(crate) fn rename(sheet_id: i64, title: String) -> Request {
        Request::UpdateSheetProperties(UpdateSheetProperties {
            properties: SheetProperties {
                sheet_id,
                title: Some(title),
                tab_color: None,
            },
            fields: "title".to_string(),
        })
    }

    /// `color: None` clears the tab color.
    pub(crate) fn tab_color(sheet_id: i64, color: Option<Rgb>) -> Request {
        Request::UpdateSheetProperties(UpdateSheetProperties {
            properties: SheetProperties {
                sheet_id,
                title: None,
                tab_color: color,
            },
            fields: "tabColor".to_string(),
        })
    }

    pub(crate) fn number_format(range: GridRange, pattern: String) -> Request {
        Request::RepeatCell(RepeatCell {
            range,
            cell: CellData {
                user_entered_format: CellFormat {
                    number_format: NumberFormat {
                        kind: "NUMBER".to_string(),
                        pattern,
                    },
                },
            },
            fields: "userEnteredFormat.numberFormat".to_string(),
        })
    }
}
