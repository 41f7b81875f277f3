//! Per-spreadsheet session context and request builders.

mod locator;
mod requests;
mod state;

pub use locator::{DEFAULT_RECT, SpreadsheetLocator, anchor_open_start};
pub use requests::{
    BasicFilter, BatchClear, BatchUpdate, CellData, CellFormat, ClearBasicFilter, NumberFormat, RepeatCell,
    Request, SetBasicFilter, SheetProperties, UpdateSheetProperties, ValueRange,
};
pub use state::Session;
