//! In-memory implementation of the [`Storage`] gateway.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Storage, StorageError, StorageResult, StoredObject};

type Buckets = HashMap<String, BTreeMap<String, StoredObject>>;

/// Process-local gateway backed by a map per bucket.
///
/// Secondary-index queries are answered by scanning the bucket, which is
/// adequate for tests and small local runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    buckets: RwLock<Buckets>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of objects held in `bucket`.
    pub fn len(&self, bucket: &str) -> StorageResult<usize> {
        Ok(self.read()?.get(bucket).map_or(0, BTreeMap::len))
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Buckets>> {
        self.buckets
            .read()
            .map_err(|_| StorageError::Internal("in-memory storage lock poisoned".to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Buckets>> {
        self.buckets
            .write()
            .map_err(|_| StorageError::Internal("in-memory storage lock poisoned".to_string()))
    }
}

impl Storage for InMemoryStorage {
    #[tracing::instrument(level = "trace", skip_all)]
    fn fetch(&self, bucket: &str, key: &str) -> StorageResult<Option<StoredObject>> {
        Ok(self
            .read()?
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn store(&self, mut object: StoredObject) -> StorageResult<()> {
        let mut buckets = self.write()?;
        let objects = buckets.entry(object.bucket.clone()).or_default();
        if let Some(previous) = objects.get(&object.key) {
            object.indexes.inherit(&previous.indexes);
        }
        objects.insert(object.key.clone(), object);
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn delete(&self, bucket: &str, key: &str) -> StorageResult<()> {
        if let Some(objects) = self.write()?.get_mut(bucket) {
            objects.remove(key);
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn fetch_index(
        &self,
        bucket: &str,
        index: &str,
        range: Range<u64>,
    ) -> StorageResult<Vec<String>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let buckets = self.read()?;
        let Some(objects) = buckets.get(bucket) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<(u64, &str)> = objects
            .values()
            .filter_map(|object| {
                let values = object.indexes.get(index)?;
                values
                    .range(range.clone())
                    .next()
                    .map(|value| (*value, object.key.as_str()))
            })
            .collect();
        matches.sort_unstable();

        Ok(matches.into_iter().map(|(_, key)| key.to_string()).collect())
    }
}
