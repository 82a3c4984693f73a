//! Encoding utilities shared by the binding value codecs.
//!
//! Values are framed with a 4-byte big-endian signed length prefix followed by
//! the raw bytes:
//!
//! ```text
//! | len (i32 BE) | bytes (len) |
//! ```

use bytes::BufMut;

/// Size in bytes of a length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Error returned when a buffer cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeserializeError {
    pub message: String,
}

impl DeserializeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::error::Error for DeserializeError {}

impl std::fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Writes `data` preceded by its length.
///
/// Lengths above `i32::MAX` are not representable; callers must keep values
/// below that bound.
pub fn put_length_prefixed(data: &[u8], buf: &mut impl BufMut) {
    buf.put_i32(data.len() as i32);
    buf.put_slice(data);
}

/// Reads a length-prefixed slice from the front of `buf` and advances past it.
pub fn get_length_prefixed<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DeserializeError> {
    if buf.len() < LENGTH_PREFIX_SIZE {
        return Err(DeserializeError::new(format!(
            "buffer too short for length prefix: need {} bytes, have {}",
            LENGTH_PREFIX_SIZE,
            buf.len()
        )));
    }
    let len = i32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if len < 0 {
        return Err(DeserializeError::new(format!(
            "negative length prefix: {}",
            len
        )));
    }
    let len = len as usize;
    let rest = &buf[LENGTH_PREFIX_SIZE..];
    if rest.len() < len {
        return Err(DeserializeError::new(format!(
            "buffer too short for payload: need {} bytes, have {}",
            len,
            rest.len()
        )));
    }
    let (data, tail) = rest.split_at(len);
    *buf = tail;
    Ok(data)
}
