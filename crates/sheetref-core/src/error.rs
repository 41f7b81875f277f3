//! Error types for sheetref core.

use sheetref_engine::AddressError;
use thiserror::Error;

/// Boxed error raised by a metadata service implementation.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving against a spreadsheet
#[derive(Error, Debug)]
pub enum SheetrefError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Metadata service error: {0}")]
    Service(#[source] ServiceError),

    #[error("Invalid spreadsheet locator: {0}")]
    Locator(String),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetrefError {
    /// The address-level failure, if this is one.
    pub fn as_address(&self) -> Option<&AddressError> {
        match self {
            SheetrefError::Address(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetrefError>;
