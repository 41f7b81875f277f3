//! The spreadsheet metadata collaborator.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::SheetDescriptor;
use crate::error::{Result, ServiceError, SheetrefError};

const MAX_SNAPSHOT_FILE_BYTES: u64 = 8_388_608; // 8 MiB

/// Source of sheet metadata for a spreadsheet.
///
/// The only capability the catalog needs from the remote service. Errors are
/// passed through to callers untouched.
pub trait MetadataService {
    fn get_sheets(
        &self,
        spreadsheet_id: &str,
    ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError>;
}

impl<T: MetadataService + ?Sized> MetadataService for &T {
    fn get_sheets(
        &self,
        spreadsheet_id: &str,
    ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError> {
        (**self).get_sheets(spreadsheet_id)
    }
}

impl<T: MetadataService + ?Sized> MetadataService for Box<T> {
    fn get_sheets(
        &self,
        spreadsheet_id: &str,
    ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError> {
        (**self).get_sheets(spreadsheet_id)
    }
}

/// Fixed, in-memory sheet list. Ignores the spreadsheet id.
#[derive(Clone, Debug, Default)]
pub struct StaticMetadata {
    pub sheets: Vec<SheetDescriptor>,
}

impl StaticMetadata {
    pub fn new(sheets: Vec<SheetDescriptor>) -> Self {
        StaticMetadata { sheets }
    }
}

impl MetadataService for StaticMetadata {
    fn get_sheets(
        &self,
        _spreadsheet_id: &str,
    ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError> {
        Ok(self.sheets.clone())
    }
}

/// Sheet metadata read from a JSON snapshot on disk.
///
/// The file is re-read on every fetch, so a catalog refresh picks up edits.
/// Two layouts are accepted: a plain array of descriptors, or a saved
/// `spreadsheets.get` response (`{"sheets": [{"properties": {...}}]}`).
#[derive(Clone, Debug)]
pub struct SnapshotFile {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotLayout {
    Plain(Vec<SheetDescriptor>),
    Spreadsheet { sheets: Vec<SheetEntry> },
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetDescriptor,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<SheetDescriptor>> {
        let meta = std::fs::metadata(&self.path)?;
        if meta.len() > MAX_SNAPSHOT_FILE_BYTES {
            return Err(SheetrefError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: snapshot too large ({} bytes, max {})",
                    self.path.display(),
                    meta.len(),
                    MAX_SNAPSHOT_FILE_BYTES
                ),
            )));
        }
        let content = std::fs::read_to_string(&self.path)?;
        parse_snapshot(&content)
    }
}

impl MetadataService for SnapshotFile {
    fn get_sheets(
        &self,
        _spreadsheet_id: &str,
    ) -> std::result::Result<Vec<SheetDescriptor>, ServiceError> {
        self.read().map_err(|err| Box::new(err) as ServiceError)
    }
}

/// Parse snapshot JSON in either accepted layout.
pub fn parse_snapshot(content: &str) -> Result<Vec<SheetDescriptor>> {
    let layout: SnapshotLayout = serde_json::from_str(content)?;
    Ok(match layout {
        SnapshotLayout::Plain(sheets) => sheets,
        SnapshotLayout::Spreadsheet { sheets } => {
            sheets.into_iter().map(|entry| entry.properties).collect()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetref_engine::engine::Rgb;
    use std::io::Write;

    #[test]
    fn test_parse_plain_snapshot() {
        let sheets =
            parse_snapshot(r#"[{"id": 0, "title": "Sheet1"}, {"id": 5, "title": "Data"}]"#)
                .unwrap();
        assert_eq!(
            sheets,
            vec![SheetDescriptor::new(0, "Sheet1"), SheetDescriptor::new(5, "Data")]
        );
    }

    #[test]
    fn test_parse_api_snapshot() {
        let sheets = parse_snapshot(
            r#"{
                "spreadsheetId": "abc",
                "sheets": [
                    {"properties": {"sheetId": 12, "title": "Raw", "index": 0,
                                    "tabColor": {"red": 1, "alpha": 1}}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            sheets,
            vec![SheetDescriptor::new(12, "Raw").with_color(Rgb::new(1.0, 0.0, 0.0))]
        );
    }

    #[test]
    fn test_parse_invalid_snapshot() {
        assert!(matches!(
            parse_snapshot("{\"nope\": true}"),
            Err(SheetrefError::Json(_))
        ));
    }

    #[test]
    fn test_snapshot_file_rereads_on_each_fetch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "title": "One"}}]"#).unwrap();
        let service = SnapshotFile::new(file.path());
        assert_eq!(service.get_sheets("x").unwrap().len(), 1);

        let mut rewrite = std::fs::File::create(file.path()).unwrap();
        write!(
            rewrite,
            r#"[{{"id": 1, "title": "One"}}, {{"id": 2, "title": "Two"}}]"#
        )
        .unwrap();
        assert_eq!(service.get_sheets("x").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_snapshot_is_service_error() {
        let service = SnapshotFile::new("/definitely/not/here.json");
        let err = service.get_sheets("x").unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }
}
