//! Parsing of the keys handed to the row builders.

use crate::error::{Error, Result};

/// Prefix of generated workload keys (`user1234`).
pub const KEY_PREFIX: &str = "user";

/// Parses a workload key into a timestamp by stripping the leading
/// [`KEY_PREFIX`].
///
/// Only a leading prefix is removed; occurrences elsewhere in the key are
/// kept, so `12user34` is rejected rather than read as `1234`. Keys without
/// the prefix are parsed as-is.
pub fn key_as_timestamp(key: &str) -> Result<i64> {
    let digits = key.strip_prefix(KEY_PREFIX).unwrap_or(key);
    digits
        .parse::<i64>()
        .map_err(|e| Error::invalid_key(key, format!("not an integer key: {}", e)))
}

/// Largest accepted batch count.
pub const MAX_BATCH_COUNT: usize = i32::MAX as usize;

/// Decoded batch key: `timestamp,original_key,host,worker,batch_count[,use_all_type_schema]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchKey {
    /// Timestamp of the first row.
    pub timestamp: i64,
    pub original_key: String,
    pub host: String,
    pub worker: String,
    /// Number of rows the record is split into, in `1..=MAX_BATCH_COUNT`.
    pub batch_count: usize,
    /// Write four random typed cells instead of the record's fields.
    pub use_all_type_schema: bool,
}

impl BatchKey {
    pub fn parse(key: &str) -> Result<Self> {
        let parts: Vec<&str> = key.split(',').collect();
        if parts.len() != 5 && parts.len() != 6 {
            return Err(Error::invalid_key(
                key,
                format!("expected 5 or 6 comma-separated parts, got {}", parts.len()),
            ));
        }

        let timestamp = parts[0]
            .parse::<i64>()
            .map_err(|e| Error::invalid_key(key, format!("invalid timestamp: {}", e)))?;
        let batch_count = parts[4]
            .parse::<usize>()
            .map_err(|e| Error::invalid_key(key, format!("invalid batch count: {}", e)))?;
        if batch_count == 0 || batch_count > MAX_BATCH_COUNT {
            return Err(Error::InvalidBatchCount(key.to_string()));
        }
        let use_all_type_schema = parts
            .get(5)
            .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));

        Ok(Self {
            timestamp,
            original_key: parts[1].to_string(),
            host: parts[2].to_string(),
            worker: parts[3].to_string(),
            batch_count,
            use_all_type_schema,
        })
    }
}

/// Decoded single-row key: `timestamp,original_key,host,worker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowKey<'a> {
    pub timestamp: i64,
    pub original_key: &'a str,
    pub host: &'a str,
    pub worker: &'a str,
}

/// Number of parts in a single-row key.
pub(crate) const ROW_KEY_PARTS: usize = 4;

impl<'a> RowKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self> {
        let parts: Vec<&str> = key.split(',').collect();
        if parts.len() != ROW_KEY_PARTS {
            return Err(Error::invalid_key(
                key,
                format!(
                    "expected timestamp, original key, host and worker, got {} parts",
                    parts.len()
                ),
            ));
        }
        let timestamp = parts[0]
            .parse::<i64>()
            .map_err(|e| Error::invalid_key(key, format!("invalid timestamp: {}", e)))?;

        Ok(Self {
            timestamp,
            original_key: parts[1],
            host: parts[2],
            worker: parts[3],
        })
    }
}
