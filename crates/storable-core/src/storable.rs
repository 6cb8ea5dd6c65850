use crate::errors::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use storable_core_types::Nullable;

/// Operations every storage wrapper exposes.
///
/// Callers that do not care which physical store they talk to take
/// `&impl Storable`.
pub trait Storable {
    /// Total number of items held by the store.
    fn count(&self) -> usize;

    /// Keys of every item in the store, in positional order, without
    /// duplicates.
    fn keys(&self) -> Vec<String>;

    /// Removes every item.
    fn clear(&self);

    /// Whether a non-null value is stored under `key`.
    ///
    /// The value is fully decoded, so a malformed item fails here exactly
    /// as it would in [`Storable::get`].
    fn exists(&self, key: &str) -> Result<bool>;

    /// Value stored under `key`, or `None` if there is no such item.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Decode` naming the key if the stored text is
    /// not valid JSON or does not deserialize into `T`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Nullable<T>>;

    /// Key at position `index`, or `None` past the end of the store.
    fn key(&self, index: usize) -> Nullable<String>;

    /// Removes the item stored under `key`. Returns `false` and does nothing
    /// if there is no such item.
    fn pop(&self, key: &str) -> bool;

    /// Stores `value` under `key`.
    ///
    /// Never fails loudly: returns `false` if the value could not be encoded
    /// or the host refused the write.
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool;
}
