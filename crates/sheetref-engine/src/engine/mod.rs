//! Address translation API.
//!
//! This module turns human-friendly spreadsheet addresses into the
//! structures the remote API consumes:
//!
//! - [`column_to_index`], [`index_to_column`] - Bijective base-26 column codec
//! - [`parse_address`], [`ParsedAddress`] - `[sheet!]cell[:cell]` parsing
//! - [`SheetRef`] - `#N` ordinals, titles, ids and the default sheet
//! - [`resolve_range`], [`GridRange`] - 0-based half-open range resolution
//! - [`build_filter_criteria`] - Per-column equality filters
//! - [`hex_to_rgb`], [`rgb_to_hex`] - Tab color conversion

mod address;
mod color;
mod column;
mod filter;
mod range;
mod sheet_ref;

pub use address::{CellToken, ParsedAddress, parse_address};
pub use color::{Rgb, hex_to_rgb, rgb_to_hex};
pub use column::{column_to_index, index_to_column};
pub use filter::{
    BooleanCondition, ConditionValue, FilterCriteria, FilterCriterion, FilterValues,
    build_filter_criteria,
};
pub use range::{GridRange, SheetLookup, resolve_range, resolve_range_with_default};
pub use sheet_ref::{SheetRef, quote_title};
