use regex::Regex;
use sheetref_engine::engine::{
    FilterCriteria, FilterValues, GridRange, SheetRef, build_filter_criteria, hex_to_rgb,
    parse_address, quote_title, resolve_range_with_default,
};
use std::sync::OnceLock;

use super::locator::{SpreadsheetLocator, anchor_open_start};
use super::requests::{
    BasicFilter, BatchClear, BatchUpdate, ClearBasicFilter, Request, SetBasicFilter, ValueRange,
};
use crate::catalog::{MetadataService, SheetCatalog, SheetDescriptor, SheetSummary};
use crate::error::{Result, SheetrefError};

fn single_cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]{1,3}[0-9]+$").expect("cell regex must compile"))
}

/// Explicit context for one spreadsheet: where it is, what the defaults are,
/// and its sheet catalog.
///
/// Replaces process-wide client/cache state; construct one per spreadsheet
/// and pass it to whatever builds requests.
pub struct Session<S> {
    locator: SpreadsheetLocator,
    catalog: SheetCatalog<S>,
}

impl<S: MetadataService> Session<S> {
    pub fn new(locator: SpreadsheetLocator, service: S) -> Self {
        let catalog = SheetCatalog::new(locator.spreadsheet_id.clone(), service);
        Session { locator, catalog }
    }

    /// Build a session from a spreadsheet id or URL.
    pub fn open(spreadsheet: &str, service: S) -> Result<Self> {
        Ok(Self::new(SpreadsheetLocator::parse(spreadsheet)?, service))
    }

    pub fn locator(&self) -> &SpreadsheetLocator {
        &self.locator
    }

    pub fn catalog(&self) -> &SheetCatalog<S> {
        &self.catalog
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.locator.spreadsheet_id
    }

    /// Re-fetch sheet metadata.
    pub fn refresh(&self) -> Result<Vec<SheetDescriptor>> {
        Ok(self.catalog.refresh()?.to_vec())
    }

    pub fn sheet_list(&self) -> Result<Vec<SheetSummary>> {
        self.catalog.sheet_list()
    }

    /// Title of `sheet`, or of the session's default sheet when `None`.
    pub fn sheet_title(&self, sheet: Option<&SheetRef>) -> Result<String> {
        let sheet = match sheet {
            Some(SheetRef::Default) | None => &self.locator.default_sheet,
            Some(sheet) => sheet,
        };
        self.catalog.resolve_title(sheet)
    }

    /// Id of `sheet`, or of the session's default sheet when `None`.
    pub fn sheet_id(&self, sheet: Option<&SheetRef>) -> Result<i64> {
        let sheet = match sheet {
            Some(SheetRef::Default) | None => &self.locator.default_sheet,
            Some(sheet) => sheet,
        };
        self.catalog.resolve_id(sheet)
    }

    /// Split an area into the sheet it names and its anchored rectangle.
    fn split_area(&self, area: &str) -> Result<(SheetRef, String)> {
        let (sheet, rect) = if area.is_empty() {
            (self.locator.default_sheet.clone(), None)
        } else if area.contains('!') {
            let parsed = parse_address(area)?;
            let sheet = parsed.sheet_ref().unwrap_or(SheetRef::Default);
            let rect = area.rsplit_once('!').map(|(_, rect)| rect.trim().to_string());
            (sheet, rect)
        } else if area.contains(':') || single_cell_re().is_match(area) {
            parse_address(area)?;
            (self.locator.default_sheet.clone(), Some(area.to_string()))
        } else if let Some(title) = area
            .strip_prefix('\'')
            .and_then(|quoted| quoted.strip_suffix('\''))
        {
            (SheetRef::Title(title.replace("''", "'")), None)
        } else {
            (SheetRef::parse(Some(area)), None)
        };

        let rect = match rect {
            Some(rect) => anchor_open_start(&rect),
            None => self.locator.default_rect.clone(),
        };
        Ok((sheet, rect))
    }

    /// Normalize an area to `<title>!<rect>`, the form the values endpoints
    /// (read, write, clear) take.
    ///
    /// - blank: default sheet, default rectangle
    /// - `sheet!rect`: that sheet and rectangle
    /// - a range (`B2:C9`) or single cell (`B2`): default sheet
    /// - anything else is a sheet reference with the default rectangle
    ///
    /// A column-only start gains row 1 (`A:C` -> `A1:C`).
    pub fn resolve_area(&self, area: Option<&str>) -> Result<String> {
        let area = area.map(str::trim).unwrap_or_default();
        let (sheet, rect) = self.split_area(area)?;
        let title = self.sheet_title(Some(&sheet))?;

        let resolved = format!("{}!{}", quote_title(&title), rect);
        log::debug!("area {:?} -> {}", area, resolved);
        Ok(resolved)
    }

    /// Resolve `area` (any form [`Session::resolve_area`] accepts) to a grid
    /// range with a sheet id.
    ///
    /// The sheet is resolved to its id once, so a title that reads like
    /// `#N` cannot be taken for an ordinal on the way.
    pub fn range(&self, area: Option<&str>) -> Result<GridRange> {
        let area = area.map(str::trim).unwrap_or_default();
        let (sheet, rect) = self.split_area(area)?;
        let sheet_id = self.sheet_id(Some(&sheet))?;
        resolve_range_with_default(&rect, &self.catalog, Some(&SheetRef::Id(sheet_id)))
    }

    /// Body for clearing the values in each area. Formatting is kept.
    pub fn clear<'a>(
        &self,
        areas: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Result<BatchClear> {
        let ranges = areas
            .into_iter()
            .map(|area| self.resolve_area(area))
            .collect::<Result<Vec<_>>>()?;
        Ok(BatchClear { ranges })
    }

    pub fn filter_criteria<I, K, V>(&self, filters: I) -> Result<FilterCriteria>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FilterValues>,
    {
        Ok(build_filter_criteria(filters)?)
    }

    /// Replace the basic filter on the area's sheet.
    ///
    /// Emits a clear followed by a set, so the new filter never merges with
    /// an old one.
    pub fn basic_filter(
        &self,
        area: Option<&str>,
        criteria: Option<FilterCriteria>,
    ) -> Result<BatchUpdate> {
        let range = self.range(area)?;
        let mut batch = BatchUpdate::default();
        batch
            .push(Request::ClearBasicFilter(ClearBasicFilter {
                sheet_id: range.sheet_id,
            }))
            .push(Request::SetBasicFilter(SetBasicFilter {
                filter: BasicFilter { range, criteria },
            }));
        Ok(batch)
    }

    /// Apply a number format pattern (e.g. `"#,##0.00"`) to every cell in the area.
    pub fn number_format(&self, area: Option<&str>, pattern: &str) -> Result<BatchUpdate> {
        let range = self.range(area)?;
        Ok(BatchUpdate {
            requests: vec![Request::number_format(range, pattern.to_string())],
        })
    }

    /// Set a sheet's tab color from `#rrggbb` / `#rgb`; `None` clears it.
    pub fn tab_color(&self, sheet: &SheetRef, hex: Option<&str>) -> Result<BatchUpdate> {
        let color = match hex {
            Some(hex) => {
                Some(hex_to_rgb(hex).ok_or_else(|| SheetrefError::InvalidColor(hex.to_string()))?)
            }
            None => None,
        };
        let sheet_id = self.catalog.resolve_id(sheet)?;
        Ok(BatchUpdate {
            requests: vec![Request::tab_color(sheet_id, color)],
        })
    }

    /// Rename a sheet. `rename` receives the current title.
    pub fn rename(
        &self,
        sheet: &SheetRef,
        rename: impl FnOnce(&str) -> String,
    ) -> Result<BatchUpdate> {
        let sheet_id = self.catalog.resolve_id(sheet)?;
        let current = self.catalog.resolve_title(&SheetRef::Id(sheet_id))?;
        Ok(BatchUpdate {
            requests: vec![Request::rename(sheet_id, rename(&current))],
        })
    }

    /// Values payload for writing `rows` into the area.
    pub fn value_range(
        &self,
        area: Option<&str>,
        rows: Vec<Vec<serde_json::Value>>,
    ) -> Result<ValueRange> {
        Ok(ValueRange {
            range: self.resolve_area(area)?,
            values: rows,
        })
    }
}
