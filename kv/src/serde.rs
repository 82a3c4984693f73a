//! Serde for record values.
//!
//! A record is stored as a single opaque backend value: the concatenation of
//! one tuple per field, written in the record's iteration order.
//!
//! ```text
//! | name_len (i32 BE) | name (UTF-8) | value_len (i32 BE) | value | ... repeated ...
//! ```
//!
//! The encoding carries no header or field count; decoding consumes tuples
//! until the buffer is exhausted. An empty buffer is an empty record. Field
//! order is not significant to the decoded record, and when a buffer names the
//! same field twice the later value wins.
//!
//! Names and values longer than `i32::MAX` bytes cannot be represented and are
//! not checked on encode.

use bytes::{Bytes, BytesMut};
use common::Record;
use common::serde::{LENGTH_PREFIX_SIZE, get_length_prefixed, put_length_prefixed};

use crate::error::{Error, Result};

/// Encodes `record` into a backend value.
pub fn serialize_record(record: &Record) -> Bytes {
    let capacity = record
        .iter()
        .map(|(name, value)| 2 * LENGTH_PREFIX_SIZE + name.len() + value.len())
        .sum();
    let mut buf = BytesMut::with_capacity(capacity);
    for (name, value) in record.iter() {
        put_length_prefixed(name.as_bytes(), &mut buf);
        put_length_prefixed(value, &mut buf);
    }
    buf.freeze()
}

/// Decodes a backend value produced by [`serialize_record`].
///
/// Field values share the memory of `data` rather than being copied.
pub fn deserialize_record(data: &Bytes) -> Result<Record> {
    let mut buf = data.as_ref();
    let mut record = Record::new();
    while !buf.is_empty() {
        let name = get_length_prefixed(&mut buf)?;
        let name = std::str::from_utf8(name)
            .map_err(|e| Error::CorruptEncoding(format!("field name is not UTF-8: {}", e)))?;
        let value = get_length_prefixed(&mut buf)?;
        record.insert(name, data.slice_ref(value));
    }
    Ok(record)
}
