//! Error types for address resolution.

use thiserror::Error;

/// Local validation failures raised while translating an address.
///
/// None of these are retried or recovered from inside the engine: a range
/// built from bad input must never reach a remote write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid column: {0:?}")]
    InvalidColumn(String),

    #[error("Malformed address {address:?}: {message}")]
    MalformedAddress { address: String, message: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
}

impl AddressError {
    pub(crate) fn malformed(address: &str, message: impl Into<String>) -> Self {
        AddressError::MalformedAddress {
            address: address.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AddressError>;
