//! Storage vocabulary types
//!
//! Index arguments are plain `usize`, so a negative position cannot be
//! expressed at all; only the upper bound is checked at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that may be absent.
///
/// Used in the storage contract wherever the browser API would hand back
/// `null`: a missing item, or a position past the end of the store.
pub type Nullable<T> = Option<T>;

/// The lifetime a store's entries are scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageScope {
    /// Entries live as long as the current session (tab or process)
    Session,
    /// Entries survive across sessions
    Local,
}

impl StorageScope {
    /// Stable lowercase name, used as the `scope` logging field
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Session => "session",
            StorageScope::Local => "local",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
