//! Address to grid-range resolution.
//!
//! User-facing addresses are 1-based and inclusive; the remote API wants
//! 0-based, half-open ranges. All of the +/-1 arithmetic lives here.

use serde::{Deserialize, Serialize};

use super::address::{CellToken, parse_address};
use super::column::column_to_offset;
use super::sheet_ref::SheetRef;
use crate::error::AddressError;

/// Resolves sheet references to concrete sheet ids.
///
/// Implemented by the sheet catalog; kept as a trait so the engine stays free
/// of I/O and caching concerns. The error type lets a lookup report its own
/// failures (e.g. a failed metadata fetch) without them being folded into
/// [`AddressError`].
pub trait SheetLookup {
    type Error: From<AddressError>;

    fn sheet_id(&self, sheet: &SheetRef) -> Result<i64, Self::Error>;
}

impl<T: SheetLookup + ?Sized> SheetLookup for &T {
    type Error = T::Error;

    fn sheet_id(&self, sheet: &SheetRef) -> Result<i64, Self::Error> {
        (**self).sheet_id(sheet)
    }
}

/// A rectangular, 0-based, half-open range as the API's `GridRange`.
///
/// Unbounded sides, and a sheet id that could not be determined, are left
/// out of the serialized form entirely rather than sent as `null`.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<usize>,
}

impl GridRange {
    /// Number of rows covered, if both row bounds are known.
    pub fn row_count(&self) -> Option<usize> {
        Some(self.end_row_index? - self.start_row_index?)
    }

    /// Number of columns covered, if both column bounds are known.
    pub fn column_count(&self) -> Option<usize> {
        Some(self.end_column_index? - self.start_column_index?)
    }
}

/// Resolve an address, leaving `sheet_id` unset when the address names no sheet.
pub fn resolve_range<L: SheetLookup>(address: &str, lookup: &L) -> Result<GridRange, L::Error> {
    resolve_range_with_default(address, lookup, None)
}

/// Resolve an address, falling back to `default` when it names no sheet.
pub fn resolve_range_with_default<L: SheetLookup>(
    address: &str,
    lookup: &L,
    default: Option<&SheetRef>,
) -> Result<GridRange, L::Error> {
    let parsed = parse_address(address)?;

    let sheet = parsed.sheet_ref();
    let sheet_id = match sheet.as_ref().or(default) {
        Some(sheet) => Some(lookup.sheet_id(sheet)?),
        None => None,
    };

    let parsed = parsed.with_shorthand();
    let (start_col, start_row) = offsets(&parsed.start)?;
    let (end_col, end_row) = offsets(&parsed.end)?;

    let (start_column_index, end_column_index) = bounds(start_col, end_col);
    let (start_row_index, end_row_index) = bounds(start_row, end_row);

    Ok(GridRange {
        sheet_id,
        start_row_index,
        end_row_index,
        start_column_index,
        end_column_index,
    })
}

/// 0-based column and row of one range end.
fn offsets(cell: &CellToken) -> Result<(Option<usize>, Option<usize>), AddressError> {
    let column = cell.column.as_deref().map(column_to_offset).transpose()?;
    let row = cell.row.map(|r| r - 1);
    Ok((column, row))
}

/// Order one axis and make its end exclusive. A reversed range (`C3:A1`)
/// covers the same cells as its ordered form.
fn bounds(start: Option<usize>, end: Option<usize>) -> (Option<usize>, Option<usize>) {
    match (start, end) {
        (Some(s), Some(e)) => (Some(s.min(e)), Some(s.max(e) + 1)),
        (s, e) => (s, e.map(|e| e + 1)),
    }
}
