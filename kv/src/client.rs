//! Typed workload operations over the storage gateway.
//!
//! [`KvClient`] maps the generic workload operations onto gateway calls using
//! the record codec. Errors are returned to the caller; converting them into
//! benchmark statuses is the job of [`KvBinding`](crate::KvBinding).

use std::sync::Arc;

use common::{Record, Storage, StoredObject};

use crate::error::{Error, Result};
use crate::scan::{self, SCAN_INDEX};
use crate::sequence::ScanSequence;
use crate::serde::{deserialize_record, serialize_record};

/// Client for one gateway handle.
///
/// Cloning is cheap; clones share the gateway handle and scan sequence.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use common::Record;
/// use common::storage::in_memory::InMemoryStorage;
/// use kv::{KvClient, ScanSequence};
///
/// let client = KvClient::with_scan_sequence(
///     Arc::new(InMemoryStorage::new()),
///     Arc::new(ScanSequence::new()),
/// );
///
/// let record = Record::from_iter([("first_name", "Dave")]);
/// client.insert("people", "person1", &record).unwrap();
///
/// assert_eq!(client.read("people", "person1").unwrap(), Some(record));
/// ```
#[derive(Clone)]
pub struct KvClient {
    storage: Arc<dyn Storage>,
    sequence: Option<Arc<ScanSequence>>,
}

impl KvClient {
    /// Creates a client with scan support disabled.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            sequence: None,
        }
    }

    /// Creates a client with scan support enabled.
    ///
    /// Inserts are tagged with values from `sequence`; clients whose records
    /// must scan in a common order should share the same sequence.
    pub fn with_scan_sequence(storage: Arc<dyn Storage>, sequence: Arc<ScanSequence>) -> Self {
        Self {
            storage,
            sequence: Some(sequence),
        }
    }

    /// Returns whether inserts are indexed for scans.
    pub fn scan_enabled(&self) -> bool {
        self.sequence.is_some()
    }

    /// Reads the record stored under `(bucket, key)`.
    ///
    /// Returns `None` if the key does not exist.
    pub fn read(&self, bucket: &str, key: &str) -> Result<Option<Record>> {
        match self.storage.fetch(bucket, key)? {
            Some(object) => Ok(Some(deserialize_record(&object.value)?)),
            None => Ok(None),
        }
    }

    /// Stores `record` under `(bucket, key)`, replacing any existing record.
    ///
    /// With scan support enabled the object is tagged with a freshly
    /// allocated scan index value. The value is consumed even if the store
    /// fails.
    pub fn insert(&self, bucket: &str, key: &str, record: &Record) -> Result<()> {
        let mut object = StoredObject::new(bucket, key, serialize_record(record));
        if let Some(sequence) = &self.sequence {
            object = object.with_index(SCAN_INDEX, sequence.allocate());
        }
        self.storage.store(object)?;
        Ok(())
    }

    /// Merges `updates` into the record stored under `(bucket, key)`.
    ///
    /// Fields in `updates` overwrite or extend the stored record; other fields
    /// are kept. The stored object's index annotations, including its scan
    /// index value, are carried over unchanged.
    ///
    /// Updating a key that does not exist succeeds without storing anything.
    pub fn update(&self, bucket: &str, key: &str, updates: &Record) -> Result<()> {
        let Some(object) = self.storage.fetch(bucket, key)? else {
            tracing::debug!(bucket, key, "update of missing key ignored");
            return Ok(());
        };

        let mut record = deserialize_record(&object.value)?;
        record.merge(updates.clone());
        self.storage
            .store(object.with_value(serialize_record(&record)))?;
        Ok(())
    }

    /// Deletes `(bucket, key)`.
    pub fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.storage.delete(bucket, key)?;
        Ok(())
    }

    /// Returns up to `record_count` records starting at `start_key`, in scan
    /// index order.
    ///
    /// Fails with [`Error::NotSupported`] when scan support is disabled. See
    /// the [`scan`](crate::scan) module for the ordering guarantees.
    pub fn scan(&self, bucket: &str, start_key: &str, record_count: usize) -> Result<Vec<Record>> {
        if !self.scan_enabled() {
            return Err(Error::NotSupported(
                "scan requires secondary index support to be enabled".to_string(),
            ));
        }
        scan::scan(self.storage.as_ref(), bucket, start_key, record_count)
    }

    /// Releases the gateway handle.
    pub fn close(&self) -> Result<()> {
        self.storage.close()?;
        Ok(())
    }
}
