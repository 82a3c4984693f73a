//! KV binding - benchmark workload operations over a bucketed key-value store.
//!
//! The binding maps the generic workload operations (read, insert, update,
//! delete, scan) onto a backend that only offers point operations on bucketed
//! objects and range queries over integer secondary indexes.
//!
//! # Architecture
//!
//! Records are packed into a single opaque backend value with a
//! length-prefixed encoding (see [`serialize_record`]). Updates are
//! read-modify-write: the stored record is decoded, merged with the update and
//! stored back together with the object's existing index annotations.
//!
//! The backend has no ordered iteration, so scans are emulated: with scan
//! support enabled every insert is tagged with a value from a shared
//! [`ScanSequence`] under the [`SCAN_INDEX`] index, and a scan becomes an
//! index range query starting at the start key's value.
//!
//! # Key Concepts
//!
//! - **KvClient**: typed operations returning [`Result`].
//! - **KvBinding**: the [`Binding`] surface the harness calls; converts every
//!   outcome into a [`Status`].
//! - **ScanSequence**: injected monotonic counter for scan index values.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kv::{Binding, Config, KvBinding, ScanSequence, Status};
//! use common::{Record, ServerRotation};
//!
//! let binding = KvBinding::open(&config, &connector, &ServerRotation::new(), Arc::new(ScanSequence::new()))?;
//!
//! let record = Record::from_iter([("first_name", "Dave"), ("last_name", "Parfitt")]);
//! assert_eq!(binding.insert("people", "person1", &record), Status::Ok);
//!
//! let mut result = Record::new();
//! assert_eq!(binding.read("people", "person1", None, &mut result), Status::Ok);
//! ```

mod binding;
mod client;
mod config;
mod error;
pub mod scan;
mod sequence;
mod serde;

pub use binding::{Binding, KvBinding, Status};
pub use client::KvClient;
pub use config::{Config, HOSTS_PROPERTY, USE_2I_PROPERTY, load_config};
pub use error::{Error, Result};
pub use scan::SCAN_INDEX;
pub use sequence::ScanSequence;
pub use crate::serde::{deserialize_record, serialize_record};
