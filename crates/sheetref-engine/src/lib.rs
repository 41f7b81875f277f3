//! sheetref_engine - A1 address translation for spreadsheet APIs.

pub mod engine;
pub mod error;

pub use error::{AddressError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use crate::error::AddressError;

    /// A lookup that only knows the default sheet.
    struct OnlyDefault;

    impl SheetLookup for OnlyDefault {
        type Error = AddressError;

        fn sheet_id(&self, sheet: &SheetRef) -> crate::Result<i64> {
            match sheet {
                SheetRef::Default | SheetRef::Ordinal(1) => Ok(0),
                SheetRef::Id(id) => Ok(*id),
                other => Err(AddressError::SheetNotFound(other.to_string())),
            }
        }
    }

    #[test]
    fn test_parse_then_resolve_agree() {
        let parsed = parse_address("#1!b2:d4").unwrap();
        assert_eq!(parsed.sheet.as_deref(), Some("#1"));

        let range = resolve_range("#1!b2:d4", &OnlyDefault).unwrap();
        let start = parsed.start.column.as_deref().unwrap();
        assert_eq!(
            range.start_column_index,
            Some(column_to_index(start).unwrap() - 1)
        );
        assert_eq!(range.end_row_index, parsed.end.row);
    }

    #[test]
    fn test_resolved_columns_name_back_to_letters() {
        let range = resolve_range("AA1:AZ1", &OnlyDefault).unwrap();
        let first = range.start_column_index.unwrap() + 1;
        let last = range.end_column_index.unwrap();
        assert_eq!(index_to_column(first).unwrap(), "AA");
        assert_eq!(index_to_column(last).unwrap(), "AZ");
    }

    #[test]
    fn test_unknown_sheet_is_not_swallowed() {
        let err = resolve_range("Elsewhere!A1", &OnlyDefault).unwrap_err();
        assert_eq!(err, AddressError::SheetNotFound("Elsewhere".to_string()));
    }

    #[test]
    fn test_invalid_column_in_filter_reports_column() {
        let err = build_filter_criteria([("", "x")]).unwrap_err();
        assert_eq!(err, AddressError::InvalidColumn(String::new()));
    }
}
