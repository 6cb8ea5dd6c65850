//! Typed wrapper over a host storage primitive
//!
//! `StorageService` holds no state besides the primitive it was built with:
//! every call reads or writes the host directly, so counts and key lists are
//! always computed from the live store.

use crate::encode::{encode_value, is_truthy};
use crate::errors::{Result, StorageError};
use crate::host::HostStorage;
use crate::storable::Storable;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use storable_core_types::{Nullable, StorageScope};

/// JSON-typed storage wrapper bound to one host primitive for its lifetime
pub struct StorageService<H: HostStorage + ?Sized = dyn HostStorage> {
    scope: StorageScope,
    storage: Arc<H>,
}

impl StorageService {
    /// Wrapper over a session-scoped primitive
    pub fn session(storage: Arc<dyn HostStorage>) -> Self {
        Self::new(StorageScope::Session, storage)
    }

    /// Wrapper over a durable primitive
    pub fn local(storage: Arc<dyn HostStorage>) -> Self {
        Self::new(StorageScope::Local, storage)
    }
}

impl<H: HostStorage + ?Sized> StorageService<H> {
    pub fn new(scope: StorageScope, storage: Arc<H>) -> Self {
        Self { scope, storage }
    }

    pub fn scope(&self) -> StorageScope {
        self.scope
    }

    /// Every item whose key and decoded value are both truthy, in
    /// positional order
    ///
    /// Items holding `0`, `false`, `""` or `null` are left out, as is an
    /// item stored under the empty key. Use [`Storable::get`] to read those.
    ///
    /// # Errors
    ///
    /// Fails with `StorageError::Decode` on the first malformed item.
    pub fn all<T: DeserializeOwned>(&self) -> Result<Vec<(String, T)>> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for index in 0..self.count() {
            let Some(key) = self.key(index) else {
                continue;
            };
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            let Some(value) = self.decode(&key)? else {
                continue;
            };
            if !is_truthy(&value) {
                continue;
            }
            let typed = serde_json::from_value(value).map_err(|e| decode_error(&key, e))?;
            seen.insert(key.clone());
            items.push((key, typed));
        }

        tracing::trace!(
            scope = %self.scope,
            count = items.len(),
            "read all items"
        );
        Ok(items)
    }

    /// Parse the raw item under `key` without committing to a type
    fn decode(&self, key: &str) -> Result<Option<Value>> {
        let Some(raw) = self.storage.get_item(key) else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| decode_error(key, e))
    }

    fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = encode_value(value).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        self.storage
            .set_item(key, &encoded)
            .map_err(|source| StorageError::WriteRejected {
                key: key.to_string(),
                source,
            })
    }
}

impl<H: HostStorage + ?Sized> Storable for StorageService<H> {
    fn count(&self) -> usize {
        self.storage.length()
    }

    fn keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for index in 0..self.count() {
            if let Some(key) = self.key(index) {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    fn clear(&self) {
        log_op_start!("clear", self.scope);
        let start = Instant::now();

        self.storage.clear();

        log_op_end!("clear", self.scope, started = start);
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(matches!(self.decode(key)?, Some(value) if !value.is_null()))
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Nullable<T>> {
        let start = Instant::now();

        let result = self.decode(key).and_then(|value| match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| decode_error(key, e)),
        });

        match &result {
            Ok(value) => {
                tracing::trace!(scope = %self.scope, key, found = value.is_some(), "get");
            }
            Err(err) => {
                log_op_error!("get", self.scope, started = start, err.clone());
            }
        }

        result
    }

    fn key(&self, index: usize) -> Nullable<String> {
        if index >= self.count() {
            return None;
        }
        self.storage.key(index)
    }

    fn pop(&self, key: &str) -> bool {
        log_op_start!("pop", self.scope, key = key);
        let start = Instant::now();

        // Confirm against the full key listing, not a single lookup
        let present = self.keys().iter().any(|k| k == key);
        if present {
            self.storage.remove_item(key);
        }

        log_op_end!(
            "pop",
            self.scope,
            started = start,
            key = key,
            removed = present
        );
        present
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        log_op_start!("set", self.scope, key = key);
        let start = Instant::now();

        match self.try_set(key, value) {
            Ok(()) => {
                log_op_end!("set", self.scope, started = start, key = key);
                true
            }
            Err(err) => {
                log_op_error!("set", self.scope, started = start, err);
                false
            }
        }
    }
}

impl<H: HostStorage + ?Sized> Clone for StorageService<H> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope,
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<H: HostStorage + ?Sized> fmt::Debug for StorageService<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageService")
            .field("scope", &self.scope)
            .field("count", &self.storage.length())
            .finish()
    }
}

fn decode_error(key: &str, err: serde_json::Error) -> StorageError {
    StorageError::Decode {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryStorage;

    fn setup() -> (StorageService<MemoryStorage>, Arc<MemoryStorage>) {
        let host = Arc::new(MemoryStorage::new());
        (
            StorageService::new(StorageScope::Session, Arc::clone(&host)),
            host,
        )
    }

    #[test]
    fn test_set_then_get_string() {
        let (store, _host) = setup();

        assert!(store.set("a", "x"));
        assert_eq!(store.get::<String>("a").unwrap().as_deref(), Some("x"));
        assert_eq!(store.keys(), vec!["a".to_string()]);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_value_is_stored_as_json_text() {
        let (store, host) = setup();

        store.set("n", &[1, 2, 3]);
        assert_eq!(host.get_item("n").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_stored_null_reads_as_absent() {
        let (store, host) = setup();

        host.set_item("nil", "null").unwrap();
        assert_eq!(store.get::<i32>("nil").unwrap(), None);
        assert!(!store.exists("nil").unwrap());
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let (store, _host) = setup();

        store.set("num", &42);
        let err = store.get::<Vec<String>>("num").unwrap_err();
        assert!(matches!(err, StorageError::Decode { ref key, .. } if key == "num"));
    }

    #[test]
    fn test_key_out_of_range() {
        let (store, _host) = setup();

        store.set("only", &1);
        assert_eq!(store.key(0).as_deref(), Some("only"));
        assert_eq!(store.key(1), None);
        assert_eq!(store.key(usize::MAX), None);
    }

    #[test]
    fn test_clone_shares_host() {
        let (store, _host) = setup();
        let other = store.clone();

        store.set("shared", &true);
        assert!(other.exists("shared").unwrap());
    }
}
