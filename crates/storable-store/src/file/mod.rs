//! File-backed durable storage
//!
//! Provides:
//! - `FileStorage` host primitive
//! - Snapshot encoding with a format version
//! - Atomic writes

mod atomic;
mod file_storage;
mod snapshot;

pub use file_storage::FileStorage;
pub use snapshot::SNAPSHOT_VERSION;
