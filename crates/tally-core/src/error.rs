//! Error types for Tally core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing messages.

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::storage::types::UserId;

/// Result type alias for Tally operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for Tally operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A schema migration step could not preserve existing data.
    #[error("Migration from schema v{from} to v{to} failed: {reason}")]
    MigrationFailed { from: i64, to: i64, reason: String },

    /// The file was written by a newer engine.
    #[error("Unsupported schema version {found} (this build supports up to v{supported})")]
    UnsupportedSchemaVersion { found: i64, supported: i64 },

    /// Username is already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Transaction references a user that does not exist
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    /// The storage file cannot be opened, read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Any other storage backend error, including corrupt rows
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Integrity check failure
    #[error("Integrity check failed: {0}")]
    Integrity(String),
}

impl LedgerError {
    /// Fatal errors prevent the ledger from being opened at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LedgerError::MigrationFailed { .. } | LedgerError::UnsupportedSchemaVersion { .. }
        )
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::ReadOnly
                | ErrorCode::DiskFull
                | ErrorCode::PermissionDenied
                | ErrorCode::SystemIoFailure
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase,
            ) => LedgerError::StorageUnavailable(err.to_string()),
            _ => LedgerError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_open_maps_to_storage_unavailable() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
            None,
        );
        assert!(matches!(
            LedgerError::from(err),
            LedgerError::StorageUnavailable(_)
        ));
    }

    #[test]
    fn test_other_sqlite_errors_map_to_storage() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(LedgerError::from(err), LedgerError::Storage(_)));
    }

    #[test]
    fn test_fatal_classification() {
        let migration = LedgerError::MigrationFailed {
            from: 1,
            to: 2,
            reason: "bad row".to_string(),
        };
        assert!(migration.is_fatal());
        assert!(!LedgerError::DuplicateUsername("sam".to_string()).is_fatal());
        assert_eq!(
            migration.to_string(),
            "Migration from schema v1 to v2 failed: bad row"
        );
    }
}
