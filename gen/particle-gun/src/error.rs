//! Error types for particle generation.

use thiserror::Error;

/// Errors that can occur while generating particles.
#[derive(Debug, Error)]
pub enum GunError {
    /// The gun has no beam entries to sample from.
    #[error("no beam entries to sample from")]
    NoEntries,

    /// A beam entry has per-particle arrays of different lengths.
    #[error("inconsistent beam entry {entry}: {reason}")]
    InconsistentEntry {
        /// Index of the entry.
        entry: usize,
        /// What is inconsistent.
        reason: String,
    },

    /// No mass is known for a particle id.
    #[error("unknown particle id {0}")]
    UnknownParticle(i32),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GunError {
    /// Creates an inconsistent entry error.
    #[must_use]
    pub fn inconsistent(entry: usize, reason: impl Into<String>) -> Self {
        Self::InconsistentEntry {
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

impl From<serde_json::Error> for GunError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for particle generation.
pub type Result<T> = std::result::Result<T, GunError>;
