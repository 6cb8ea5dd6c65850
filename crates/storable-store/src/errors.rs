//! Error handling for storable-store
//!
//! Wraps storable-core StorageError with store-specific helpers

use storable_core::errors::StorageError;

/// Result type alias using StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> StorageError {
    StorageError::io(operation, err)
}

/// Create a corrupt snapshot error
pub fn corrupt_snapshot(path: &std::path::Path, reason: impl Into<String>) -> StorageError {
    StorageError::CorruptSnapshot {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
