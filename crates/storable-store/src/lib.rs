//! Storable Store - durable host primitive on the local filesystem
//!
//! Provides:
//! - `FileStorage`, a `HostStorage` whose entries survive across sessions
//! - A versioned JSON snapshot format preserving positional order
//! - Atomic snapshot writes (temp file, then rename)

pub mod errors;
pub mod file;

// Re-export key types
pub use errors::Result;
pub use file::FileStorage;
