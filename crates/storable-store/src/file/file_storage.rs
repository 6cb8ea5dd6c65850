//! Durable host primitive backed by a snapshot file
//!
//! The whole table is kept in memory and the snapshot is rewritten after
//! every mutation.

use crate::errors::Result;
use crate::file::{atomic::atomic_write, snapshot};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use storable_core::errors::HostError;
use storable_core::host::{EntryTable, HostStorage};

/// File-backed store whose entries survive across sessions
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    table: Mutex<EntryTable>,
}

impl FileStorage {
    /// Open the store at `path`
    ///
    /// Loads the existing snapshot if there is one; otherwise the store
    /// starts empty and the file is created on the first write.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read, or holds something other
    /// than a snapshot of the supported version.
    pub fn open(path: impl Into<PathBuf>, quota: Option<usize>) -> Result<Self> {
        let path = path.into();
        let entries = snapshot::load(&path)?;
        tracing::debug!(path = %path.display(), count = entries.len(), "opened durable store");

        Ok(Self {
            table: Mutex::new(EntryTable::from_entries(entries, quota)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn table(&self) -> MutexGuard<'_, EntryTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, table: &EntryTable) -> Result<()> {
        let bytes = snapshot::encode(table.entries())?;
        atomic_write(&self.path, &bytes)
    }

    /// Persist after an infallible mutation; failures can only be logged
    fn persist_or_warn(&self, table: &EntryTable, op: &str) {
        if let Err(err) = self.persist(table) {
            tracing::warn!(
                op,
                path = %self.path.display(),
                error = %err,
                "durable store could not persist mutation"
            );
        }
    }
}

impl HostStorage for FileStorage {
    fn length(&self) -> usize {
        self.table().len()
    }

    fn key(&self, index: usize) -> Option<String> {
        self.table().key(index)
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.table().get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), HostError> {
        let mut table = self.table();

        // Commit to memory only once the snapshot is on disk
        let mut next = table.clone();
        next.set(key, value)?;
        self.persist(&next)
            .map_err(|err| HostError::Unavailable {
                reason: err.to_string(),
            })?;

        *table = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        let mut table = self.table();
        if table.remove(key).is_some() {
            self.persist_or_warn(&table, "remove_item");
        }
    }

    fn clear(&self) {
        let mut table = self.table();
        table.clear();
        self.persist_or_warn(&table, "clear");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStorage::open(temp_dir.path().join("local.json"), None).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_first_write_creates_file() {
        let (store, _dir) = setup_store();
        assert!(!store.path().exists());

        store.set_item("k", "1").unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_remove_missing_key_does_not_write() {
        let (store, _dir) = setup_store();

        store.remove_item("absent");

        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_writes_empty_snapshot() {
        let (store, _dir) = setup_store();
        store.set_item("k", "1").unwrap();

        store.clear();

        let reopened = FileStorage::open(store.path(), None).unwrap();
        assert_eq!(reopened.length(), 0);
    }
}
