//! Host storage primitives
//!
//! A host primitive is the environment-provided string-to-string store the
//! wrapper sits on. It mirrors the browser Storage API: positional key
//! lookup, a length, and writes that may be refused.

use crate::errors::HostError;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default capacity of a store, in UTF-16 code units over keys and values
pub const DEFAULT_QUOTA: usize = 5 * 1024 * 1024;

/// An ordered string dictionary supplied by the environment
///
/// Methods take `&self`: the primitive is a shared resource and handles its
/// own interior mutability. Mutations are visible to subsequent reads
/// immediately.
pub trait HostStorage: Send + Sync {
    /// Number of entries currently held
    fn length(&self) -> usize;

    /// Key at the given position, if any
    fn key(&self, index: usize) -> Option<String>;

    /// Raw value stored under `key`, if any
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError>;

    /// Remove `key` if present
    fn remove_item(&self, key: &str);

    /// Remove every entry
    fn clear(&self);
}

/// Insertion-ordered entry table shared by the host implementations
///
/// Overwriting a key keeps its position. A write that would exceed the
/// quota is rejected and leaves the table untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryTable {
    entries: Vec<(String, String)>,
    quota: Option<usize>,
}

impl EntryTable {
    /// Create an empty table with the given quota (`None` means unlimited)
    pub fn new(quota: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            quota,
        }
    }

    /// Build a table from existing entries, e.g. a loaded snapshot
    ///
    /// Later duplicates overwrite earlier ones in place. The quota is not
    /// enforced on load.
    pub fn from_entries(entries: Vec<(String, String)>, quota: Option<usize>) -> Self {
        let mut table = Self::new(quota);
        for (key, value) in entries {
            match table.position(&key) {
                Some(i) => table.entries[i].1 = value,
                None => table.entries.push((key, value)),
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn key(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|(k, _)| k.clone())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.entries[i].1.clone())
    }

    /// Units currently in use
    pub fn used(&self) -> usize {
        self.entries
            .iter()
            .map(|(k, v)| utf16_len(k) + utf16_len(v))
            .sum()
    }

    /// Insert or overwrite, returning the previous value
    pub fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, HostError> {
        let existing = self.position(key);

        if let Some(quota) = self.quota {
            let freed = existing.map_or(0, |i| utf16_len(&self.entries[i].1));
            let added = match existing {
                Some(_) => utf16_len(value),
                None => utf16_len(key) + utf16_len(value),
            };
            let required = self.used() - freed + added;
            if required > quota {
                return Err(HostError::QuotaExceeded { required, quota });
            }
        }

        match existing {
            Some(i) => Ok(Some(std::mem::replace(
                &mut self.entries[i].1,
                value.to_string(),
            ))),
            None => {
                self.entries.push((key.to_string(), value.to_string()));
                Ok(None)
            }
        }
    }

    /// Remove `key`, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// In-memory host primitive scoped to the current session
///
/// Entries live as long as the value does. A disabled store behaves like
/// storage switched off in a browser: it reads as empty and refuses every
/// write.
#[derive(Debug)]
pub struct MemoryStorage {
    table: Mutex<EntryTable>,
    disabled: bool,
}

impl MemoryStorage {
    /// Empty store with the default quota
    pub fn new() -> Self {
        Self::with_quota(Some(DEFAULT_QUOTA))
    }

    /// Empty store with the given quota (`None` means unlimited)
    pub fn with_quota(quota: Option<usize>) -> Self {
        Self {
            table: Mutex::new(EntryTable::new(quota)),
            disabled: false,
        }
    }

    /// A store that refuses every write
    pub fn disabled() -> Self {
        Self {
            table: Mutex::new(EntryTable::new(Some(0))),
            disabled: true,
        }
    }

    fn table(&self) -> MutexGuard<'_, EntryTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStorage for MemoryStorage {
    fn length(&self) -> usize {
        self.table().len()
    }

    fn key(&self, index: usize) -> Option<String> {
        self.table().key(index)
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.table().get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.disabled {
            return Err(HostError::Disabled);
        }
        self.table().set(key, value).map(|_| ())
    }

    fn remove_item(&self, key: &str) {
        self.table().remove(key);
    }

    fn clear(&self) {
        self.table().clear();
    }
}
