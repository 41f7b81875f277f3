//! Sheet metadata: the catalog cache and the service it is filled from.

mod descriptor;
mod service;
mod sheets;

pub use descriptor::{SheetDescriptor, SheetSummary};
pub use service::{MetadataService, SnapshotFile, StaticMetadata, parse_snapshot};
pub use sheets::SheetCatalog;
