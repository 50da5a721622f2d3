//! Error types for deposit reconstruction.

use thiserror::Error;

use crate::element::DetectorElementType;

/// Errors that can occur while rebuilding particle deposits.
#[derive(Debug, Error)]
pub enum DepositError {
    /// A detector element required for reconstruction was not supplied.
    #[error("missing detector element: {0}")]
    MissingElement(DetectorElementType),

    /// The requested table does not exist in the input.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// A row could not be read from the table.
    #[error("failed to read entry {entry}: {reason}")]
    ReadRow {
        /// Entry number in the table.
        entry: usize,
        /// Reason reported by the reader.
        reason: String,
    },

    /// Invalid reconstruction configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DepositError {
    /// Creates a table-not-found error.
    #[must_use]
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Self::TableNotFound(name.into())
    }

    /// Creates a row read error.
    #[must_use]
    pub fn read_row(entry: usize, reason: impl Into<String>) -> Self {
        Self::ReadRow {
            entry,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

impl From<serde_json::Error> for DepositError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for deposit reconstruction.
pub type Result<T> = std::result::Result<T, DepositError>;
