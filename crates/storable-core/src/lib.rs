//! Storable Core - typed JSON storage over host key-value primitives
//!
//! This crate provides:
//! - The `Storable` contract shared by every store
//! - `StorageService`, the generic wrapper that encodes values as JSON
//! - The `HostStorage` primitive abstraction and an in-memory session store
//! - An explicit `StorageProvider` for the session and durable stores
//! - Error and logging facilities used across the workspace

pub mod config;
pub mod encode;
pub mod errors;
pub mod host;
pub mod logging_facility;
pub mod provider;
pub mod service;
pub mod storable;

// Re-export commonly used types
pub use config::StorageConfig;
pub use errors::{ErrorKind, ErrorReport, HostError, Result, StorageError};
pub use host::{EntryTable, HostStorage, MemoryStorage, DEFAULT_QUOTA};
pub use provider::{LocalStorage, SessionStorage, StorageProvider};
pub use service::StorageService;
pub use storable::Storable;
pub use storable_core_types::{Nullable, StorageScope};
