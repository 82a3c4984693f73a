//! Ordered range scans emulated through the scan index.
//!
//! The backend cannot iterate keys in order. Instead, every insert made with
//! scan support enabled carries a [`ScanSequence`](crate::ScanSequence) value
//! under the [`SCAN_INDEX`] integer index, and a scan becomes:
//!
//! 1. fetch the start key and read its scan index value `start`;
//! 2. query the index for `[start, start + record_count)`;
//! 3. fetch and decode every returned key, in query order.
//!
//! # Ordering
//!
//! Results follow index allocation order, which is insertion order only when
//! inserts were not interleaved between workers. Values skipped by failed
//! inserts still occupy part of the range, so a scan may return fewer than
//! `record_count` records. Callers must treat the order as best-effort.

use std::ops::Range;

use common::{Record, Storage};

use crate::error::{Error, Result};
use crate::serde::deserialize_record;

/// Name of the integer secondary index carrying scan index values.
pub const SCAN_INDEX: &str = "ycsb_int";

/// Returns the index range covered by a scan of `record_count` records.
pub(crate) fn index_range(start: u64, record_count: usize) -> Range<u64> {
    start..start.saturating_add(record_count as u64)
}

/// Runs an index-backed scan over `bucket`.
pub(crate) fn scan(
    storage: &dyn Storage,
    bucket: &str,
    start_key: &str,
    record_count: usize,
) -> Result<Vec<Record>> {
    let start = storage
        .fetch(bucket, start_key)?
        .and_then(|object| object.indexes.first(SCAN_INDEX))
        .ok_or_else(|| Error::ScanStartNotFound {
            bucket: bucket.to_string(),
            key: start_key.to_string(),
        })?;

    let range = index_range(start, record_count);
    tracing::debug!(bucket, start_key, ?range, "querying scan index");
    let keys = storage.fetch_index(bucket, SCAN_INDEX, range)?;

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        match storage.fetch(bucket, &key)? {
            Some(object) => records.push(deserialize_record(&object.value)?),
            // Deleted between the index query and the fetch.
            None => tracing::debug!(bucket, %key, "scanned key vanished"),
        }
    }
    Ok(records)
}
