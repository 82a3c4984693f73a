//! Backend gateway abstraction.
//!
//! The bindings never talk to a wire protocol directly. Everything they need
//! from the key-value store is captured by the [`Storage`] trait: point
//! fetch, store and delete of bucketed objects, and range queries over integer
//! secondary indexes. Transports implement the trait; [`in_memory`] provides a
//! process-local implementation for tests and local runs.

pub mod config;
pub mod factory;
pub mod in_memory;

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use bytes::Bytes;

/// Error type for storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached or rejected the request.
    Storage(String),
    /// The storage configuration is invalid.
    Config(String),
    /// Internal error in the gateway itself.
    Internal(String),
}

impl std::error::Error for StorageError {}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Storage(msg) => write!(f, "Storage error: {}", msg),
            StorageError::Config(msg) => write!(f, "Configuration error: {}", msg),
            StorageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Integer secondary-index annotations attached to a stored object.
///
/// Each index name maps to the set of values the object is indexed under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntIndexes {
    entries: BTreeMap<String, BTreeSet<u64>>,
}

impl IntIndexes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` under the index `name`.
    pub fn add(&mut self, name: impl Into<String>, value: u64) {
        self.entries.entry(name.into()).or_default().insert(value);
    }

    /// Returns all values stored under `name`.
    pub fn get(&self, name: &str) -> Option<&BTreeSet<u64>> {
        self.entries.get(name)
    }

    /// Returns the smallest value stored under `name`.
    pub fn first(&self, name: &str) -> Option<u64> {
        self.entries.get(name)?.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every index from `previous` that this set does not name itself.
    ///
    /// Indexes named here replace their previous values entirely.
    pub fn inherit(&mut self, previous: &IntIndexes) {
        for (name, values) in &previous.entries {
            if !self.entries.contains_key(name) {
                self.entries.insert(name.clone(), values.clone());
            }
        }
    }
}

/// An object as held by the backend: an opaque value plus index annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub value: Bytes,
    pub indexes: IntIndexes,
}

impl StoredObject {
    /// Creates an object with no index annotations.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            value: value.into(),
            indexes: IntIndexes::new(),
        }
    }

    /// Adds an integer index annotation.
    pub fn with_index(mut self, name: impl Into<String>, value: u64) -> Self {
        self.indexes.add(name, value);
        self
    }

    /// Replaces the value, keeping bucket, key and every index annotation.
    pub fn with_value(mut self, value: impl Into<Bytes>) -> Self {
        self.value = value.into();
        self
    }
}

/// Capability surface of the backend key-value store.
///
/// All calls block until the backend answers. Implementations must be safe
/// to share between benchmark worker threads.
pub trait Storage: Send + Sync {
    /// Fetches the object stored under `(bucket, key)`.
    ///
    /// Returns `None` if the key does not exist.
    fn fetch(&self, bucket: &str, key: &str) -> StorageResult<Option<StoredObject>>;

    /// Stores `object`, replacing any previous value under the same key.
    ///
    /// Index annotations of the previous object whose names `object` does not
    /// carry are preserved.
    fn store(&self, object: StoredObject) -> StorageResult<()>;

    /// Deletes `(bucket, key)`. Deleting a missing key is not an error.
    fn delete(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Returns the keys in `bucket` whose `index` values fall in `range`.
    ///
    /// Keys are ordered by their smallest matching index value, then by key,
    /// and each key appears at most once.
    fn fetch_index(&self, bucket: &str, index: &str, range: Range<u64>)
    -> StorageResult<Vec<String>>;

    /// Releases the gateway handle.
    fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}
