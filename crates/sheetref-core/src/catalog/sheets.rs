use std::sync::{Arc, Mutex, MutexGuard};

use sheetref_engine::AddressError;
use sheetref_engine::engine::{SheetLookup, SheetRef};

use super::{MetadataService, SheetDescriptor, SheetSummary};
use crate::error::{Result, SheetrefError};

type Snapshot = Arc<[SheetDescriptor]>;

/// Lazily fetched, memoized sheet list for one spreadsheet.
///
/// The first lookup fetches from the metadata service; later lookups reuse
/// that snapshot until [`SheetCatalog::refresh`]. Ordinals (`#N`) follow the
/// order at fetch time. Titles are matched exactly and the first match wins.
pub struct SheetCatalog<S> {
    spreadsheet_id: String,
    service: S,
    cache: Mutex<Option<Snapshot>>,
}

impl<S: MetadataService> SheetCatalog<S> {
    pub fn new(spreadsheet_id: impl Into<String>, service: S) -> Self {
        SheetCatalog {
            spreadsheet_id: spreadsheet_id.into(),
            service,
            cache: Mutex::new(None),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Whether a snapshot is currently held.
    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    /// The cached sheet list, fetching it on first use.
    pub fn fetch(&self) -> Result<Snapshot> {
        let mut cache = self.lock();
        if let Some(sheets) = cache.as_ref() {
            return Ok(Arc::clone(sheets));
        }
        let sheets = self.load()?;
        *cache = Some(Arc::clone(&sheets));
        Ok(sheets)
    }

    /// Drop the cached list and fetch it again.
    ///
    /// If the fetch fails the cache stays empty and the next lookup retries.
    pub fn refresh(&self) -> Result<Snapshot> {
        let mut cache = self.lock();
        *cache = None;
        let sheets = self.load()?;
        *cache = Some(Arc::clone(&sheets));
        Ok(sheets)
    }

    /// Resolve a reference to a sheet id.
    ///
    /// - `#N`: id of the Nth sheet (1-based).
    /// - default: id of the first sheet.
    /// - id: returned as is; the remote call will reject unknown ids.
    /// - title: id of the first sheet with that exact title.
    pub fn resolve_id(&self, sheet: &SheetRef) -> Result<i64> {
        if let SheetRef::Id(id) = sheet {
            return Ok(*id);
        }
        Ok(self.descriptor(sheet)?.id)
    }

    /// Resolve a reference to a sheet title.
    ///
    /// Mirrors [`SheetCatalog::resolve_id`]: ordinals and the default go by
    /// position, ids are looked up, and a title is returned as is.
    pub fn resolve_title(&self, sheet: &SheetRef) -> Result<String> {
        if let SheetRef::Title(title) = sheet {
            return Ok(title.clone());
        }
        Ok(self.descriptor(sheet)?.title)
    }

    /// Find the descriptor a reference points at.
    pub fn descriptor(&self, sheet: &SheetRef) -> Result<SheetDescriptor> {
        let sheets = self.fetch()?;
        let found = match sheet {
            SheetRef::Ordinal(n) => n.checked_sub(1).and_then(|i| sheets.get(i)),
            SheetRef::Default => sheets.first(),
            SheetRef::Id(id) => sheets.iter().find(|s| s.id == *id),
            SheetRef::Title(title) => sheets.iter().find(|s| s.title == *title),
        };
        match found {
            Some(descriptor) => {
                log::debug!("resolved sheet {} to {:?}", sheet, descriptor.title);
                Ok(descriptor.clone())
            }
            None => Err(AddressError::SheetNotFound(sheet.to_string()).into()),
        }
    }

    /// Id, name and hex tab color of every sheet, in order.
    pub fn sheet_list(&self) -> Result<Vec<SheetSummary>> {
        Ok(self.fetch()?.iter().map(SheetDescriptor::summary).collect())
    }

    fn load(&self) -> Result<Snapshot> {
        log::debug!("fetching sheet metadata for {}", self.spreadsheet_id);
        let sheets = self
            .service
            .get_sheets(&self.spreadsheet_id)
            .map_err(SheetrefError::Service)?;
        warn_duplicate_titles(&sheets);
        log::debug!("cached {} sheets for {}", sheets.len(), self.spreadsheet_id);
        Ok(sheets.into())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        // A panic mid-update leaves either the old or the new snapshot, both usable.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: MetadataService> SheetLookup for SheetCatalog<S> {
    type Error = SheetrefError;

    fn sheet_id(&self, sheet: &SheetRef) -> Result<i64> {
        self.resolve_id(sheet)
    }
}

fn warn_duplicate_titles(sheets: &[SheetDescriptor]) {
    for (i, sheet) in sheets.iter().enumerate() {
        if sheets[..i].iter().any(|s| s.title == sheet.title) {
            log::warn!(
                "duplicate sheet title {:?} (id {}); lookups by title use the first match",
                sheet.title,
                sheet.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticMetadata;
    use crate::error::ServiceError;
    use pretty_assertions::assert_eq;
    use sheetref_engine::engine::{Rgb, resolve_range};
    use std::cell::Cell;

    /// Counts fetches and serves a list that can be swapped between them.
    struct Counting {
        calls: Cell<usize>,
        sheets: std::cell::RefCell<Vec<SheetDescriptor>>,
    }

    impl Counting {
        fn new(sheets: Vec<SheetDescriptor>) -> Self {
            Counting {
                calls: Cell::new(0),
                sheets: std::cell::RefCell::new(sheets),
            }
        }
    }

    impl MetadataService for Counting {
        fn get_sheets(
            &self,
            _spreadsheet_id: &str,
        ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.sheets.borrow().clone())
        }
    }

    struct Failing;

    impl MetadataService for Failing {
        fn get_sheets(
            &self,
            _spreadsheet_id: &str,
        ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError> {
            Err("quota exceeded".into())
        }
    }

    fn three_sheets() -> Vec<SheetDescriptor> {
        vec![
            SheetDescriptor::new(0, "Sheet1"),
            SheetDescriptor::new(1867, "Data").with_color(Rgb::new(0.0, 1.0, 0.0)),
            SheetDescriptor::new(42, "Notes"),
        ]
    }

    #[test]
    fn test_fetch_is_memoized() {
        let catalog = SheetCatalog::new("ss", Counting::new(three_sheets()));
        assert!(!catalog.is_cached());

        catalog.fetch().unwrap();
        catalog.resolve_id(&SheetRef::Ordinal(2)).unwrap();
        catalog.resolve_title(&SheetRef::Default).unwrap();
        assert_eq!(catalog.service().calls.get(), 1);
        assert!(catalog.is_cached());
    }

    #[test]
    fn test_refresh_refetches() {
        let catalog = SheetCatalog::new("ss", Counting::new(three_sheets()));
        assert_eq!(catalog.resolve_id(&SheetRef::Ordinal(1)).unwrap(), 0);

        catalog
            .service()
            .sheets
            .borrow_mut()
            .insert(0, SheetDescriptor::new(99, "New"));
        // Stale until refreshed.
        assert_eq!(catalog.resolve_id(&SheetRef::Ordinal(1)).unwrap(), 0);

        catalog.refresh().unwrap();
        assert_eq!(catalog.resolve_id(&SheetRef::Ordinal(1)).unwrap(), 99);
        assert_eq!(catalog.service().calls.get(), 2);
    }

    #[test]
    fn test_resolve_id_ordinals() {
        let catalog = SheetCatalog::new("ss", StaticMetadata::new(three_sheets()));
        assert_eq!(catalog.resolve_id(&SheetRef::Ordinal(2)).unwrap(), 1867);

        for missing in [SheetRef::Ordinal(5), SheetRef::Ordinal(0)] {
            let err = catalog.resolve_id(&missing).unwrap_err();
            assert!(matches!(
                err.as_address(),
                Some(AddressError::SheetNotFound(_))
            ));
        }
    }

    #[test]
    fn test_resolve_id_default_title_and_id() {
        let catalog = SheetCatalog::new("ss", StaticMetadata::new(three_sheets()));
        assert_eq!(catalog.resolve_id(&SheetRef::Default).unwrap(), 0);
        assert_eq!(catalog.resolve_id(&SheetRef::from("Notes")).unwrap(), 42);
        // Ids are passed through without an existence check.
        assert_eq!(catalog.resolve_id(&SheetRef::Id(555)).unwrap(), 555);
        assert!(catalog.resolve_id(&SheetRef::from("notes")).is_err());
    }

    #[test]
    fn test_resolve_title() {
        let catalog = SheetCatalog::new("ss", StaticMetadata::new(three_sheets()));
        assert_eq!(catalog.resolve_title(&SheetRef::Ordinal(3)).unwrap(), "Notes");
        assert_eq!(catalog.resolve_title(&SheetRef::Default).unwrap(), "Sheet1");
        assert_eq!(catalog.resolve_title(&SheetRef::Id(1867)).unwrap(), "Data");
        assert_eq!(
            catalog.resolve_title(&SheetRef::from("Anything")).unwrap(),
            "Anything"
        );
        assert!(catalog.resolve_title(&SheetRef::Id(7)).is_err());
    }

    #[test]
    fn test_duplicate_titles_first_match_wins() {
        let catalog = SheetCatalog::new(
            "ss",
            StaticMetadata::new(vec![
                SheetDescriptor::new(3, "Dup"),
                SheetDescriptor::new(4, "Dup"),
            ]),
        );
        assert_eq!(catalog.resolve_id(&SheetRef::from("Dup")).unwrap(), 3);
    }

    #[test]
    fn test_empty_catalog_has_no_default() {
        let catalog = SheetCatalog::new("ss", StaticMetadata::default());
        assert!(catalog.resolve_id(&SheetRef::Default).is_err());
    }

    #[test]
    fn test_service_errors_pass_through() {
        let catalog = SheetCatalog::new("ss", Failing);
        let err = catalog.resolve_id(&SheetRef::Default).unwrap_err();
        match err {
            SheetrefError::Service(source) => assert_eq!(source.to_string(), "quota exceeded"),
            other => panic!("expected service error, got {other:?}"),
        }
        assert!(!catalog.is_cached());
    }

    #[test]
    fn test_sheet_list() {
        let catalog = SheetCatalog::new("ss", StaticMetadata::new(three_sheets()));
        let list = catalog.sheet_list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].name, "Data");
        assert_eq!(list[1].color.as_deref(), Some("#00ff00"));
        assert_eq!(list[0].color, None);
    }

    #[test]
    fn test_catalog_as_lookup() {
        let catalog = SheetCatalog::new("ss", StaticMetadata::new(three_sheets()));
        let range = resolve_range("Sheet1!B2:C10", &catalog).unwrap();
        assert_eq!(range.sheet_id, Some(0));
        assert_eq!(range.start_column_index, Some(1));
        assert_eq!(range.start_row_index, Some(1));
        assert_eq!(range.end_column_index, Some(3));
        assert_eq!(range.end_row_index, Some(10));

        let err = resolve_range("Gone!A1", &catalog).unwrap_err();
        assert!(matches!(
            err.as_address(),
            Some(AddressError::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_catalog_is_shareable_across_threads() {
        let catalog = Arc::new(SheetCatalog::new("ss", StaticMetadata::new(three_sheets())));
        let handles: Vec<_> = (1..=3)
            .map(|n| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.resolve_id(&SheetRef::Ordinal(n)).unwrap())
            })
            .collect();
        let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids, vec![0, 1867, 42]);
    }
}
