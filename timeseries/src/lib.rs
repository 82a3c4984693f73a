//! Time-series rows for benchmark records.
//!
//! Benchmark records can be written into a time-series table instead of a
//! key-value bucket. A table row is a list of typed cells: internal columns
//! (host, worker, timestamp and optionally the original key) followed by one
//! text cell per record field.
//!
//! # Key Concepts
//!
//! - **Batch key**: `timestamp,original_key,host,worker,batch_count[,all_types]`;
//!   [`as_batched_rows`] splits one record into `batch_count` rows.
//! - **RowLayout**: which internal columns lead every row; drives
//!   [`RowLayout::as_row`] and [`RowLayout::rows_to_records`].
//! - **RandomSource**: injected randomness for the all-type schema.
//!
//! # Example
//!
//! ```ignore
//! use common::Record;
//! use timeseries::{SmallRngSource, as_batched_rows, column_descriptors_for};
//!
//! let record = Record::from_iter([("field0", "a"), ("field1", "b")]);
//! let rows = as_batched_rows("1000,user1,node1,w1,2", &record, &mut SmallRngSource::new())?;
//! assert_eq!(rows.len(), 2);
//! ```

mod batch;
mod error;
mod key;
mod layout;
pub mod model;
mod random;

pub use batch::{as_batched_rows, as_single_row};
pub use error::{Error, Result};
pub use key::{BatchKey, KEY_PREFIX, MAX_BATCH_COUNT, key_as_timestamp};
pub use layout::{RowLayout, column_descriptors_for, rows_to_records};
pub use model::{Cell, ColumnDescriptor, ColumnType, QueryResult, Row};
pub use random::{FixedSource, RandomSource, SmallRngSource};
