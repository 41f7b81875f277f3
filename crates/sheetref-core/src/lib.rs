//! sheetref-core - sheet catalog, session context and request builders.

pub mod catalog;
pub mod error;
pub mod session;

pub use catalog::{
    MetadataService, SheetCatalog, SheetDescriptor, SheetSummary, SnapshotFile, StaticMetadata,
};
pub use error::{Result, ServiceError, SheetrefError};
pub use session::{BatchClear, BatchUpdate, Request, Session, SpreadsheetLocator, ValueRange};

pub use sheetref_engine::engine::{GridRange, SheetRef};
