use regex::Regex;
use sheetref_engine::engine::SheetRef;
use std::sync::OnceLock;

use crate::error::{Result, SheetrefError};

/// Rectangle used when an area names only a sheet.
pub const DEFAULT_RECT: &str = "A:ZZ";

fn doc_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://[^/]+/spreadsheets/(?:u/\d+/)?d/([A-Za-z0-9_-]+)")
            .expect("spreadsheet url regex must compile")
    })
}

fn gid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[#?&]gid=(\d+)(?:!([A-Za-z0-9:]+))?$").expect("gid regex must compile")
    })
}

/// Which spreadsheet to talk to, and what an empty area means.
///
/// Built from either a bare spreadsheet id or a browser URL such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=<sheet>!A1:D`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpreadsheetLocator {
    pub spreadsheet_id: String,
    /// Sheet used when an area names none: the URL's `gid`, else `#1`.
    pub default_sheet: SheetRef,
    /// Rectangle used when an area names none.
    pub default_rect: String,
}

impl SpreadsheetLocator {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        SpreadsheetLocator {
            spreadsheet_id: spreadsheet_id.into(),
            default_sheet: SheetRef::Ordinal(1),
            default_rect: DEFAULT_RECT.to_string(),
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::parse_url(input);
        }
        if input.is_empty() || input.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(SheetrefError::Locator(input.to_string()));
        }
        Ok(Self::new(input))
    }

    fn parse_url(url: &str) -> Result<Self> {
        let id = doc_id_re()
            .captures(url)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| SheetrefError::Locator(url.to_string()))?;
        let mut locator = Self::new(id);

        if let Some(caps) = gid_re().captures(url) {
            let gid = caps[1]
                .parse::<i64>()
                .map_err(|_| SheetrefError::Locator(url.to_string()))?;
            locator.default_sheet = SheetRef::Id(gid);
            if let Some(rect) = caps.get(2) {
                locator.default_rect = anchor_open_start(rect.as_str());
            }
        }
        Ok(locator)
    }

    pub fn with_default_rect(mut self, rect: &str) -> Self {
        self.default_rect = anchor_open_start(rect);
        self
    }

    pub fn with_default_sheet(mut self, sheet: SheetRef) -> Self {
        self.default_sheet = sheet;
        self
    }
}

/// Give a column-only range start an explicit first row: `A:C` -> `A1:C`.
pub fn anchor_open_start(rect: &str) -> String {
    let rect = rect.trim();
    match rect.split_once(':') {
        Some((start, end)) if start.ends_with(|c: char| c.is_ascii_alphabetic()) => {
            format!("{}1:{}", start, end)
        }
        _ => rect.to_string(),
    }
}
