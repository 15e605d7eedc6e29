//! Error types for completion persistence

use thiserror::Error;

/// Errors raised while reading or writing the completion record
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Stored data could not be read
    #[error("Failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored data is not a completion record
    #[error("Stored data under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored data was written by a newer version
    #[error("Completion record version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The record could not be written or removed
    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be serialized
    #[error("Failed to serialize completion record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PersistenceError {
    /// Errors from loading; callers fall back to an empty record
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            PersistenceError::Read { .. }
                | PersistenceError::Corrupt { .. }
                | PersistenceError::UnsupportedVersion { .. }
        )
    }

    /// Errors from saving; memory and storage may now disagree
    pub fn is_write(&self) -> bool {
        matches!(self, PersistenceError::Write { .. } | PersistenceError::Encode(_))
    }
}
