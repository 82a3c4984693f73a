//! Status-returning binding surface driven by the benchmark harness.
//!
//! Harness worker threads call a [`Binding`] directly and only look at the
//! returned [`Status`]. Every failure is logged and converted into a status
//! here; no error escapes an operation, and output parameters are only
//! written when the operation succeeds.

use std::sync::Arc;

use common::{Connector, FieldSet, Record, ServerRotation, create_storage};

use crate::client::KvClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sequence::ScanSequence;

/// Outcome of a binding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// The requested key does not exist.
    NotFound,
    Error,
}

impl Status {
    /// Numeric code reported to the harness.
    pub fn code(&self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Error => -1,
            Status::NotFound => -3,
        }
    }
}

/// Uniform interface for a store that can be driven by the benchmark.
pub trait Binding: Send + Sync {
    /// Reads `key` into `result`, keeping only `fields` when given.
    fn read(&self, table: &str, key: &str, fields: Option<&FieldSet>, result: &mut Record)
    -> Status;

    /// Appends up to `record_count` records starting at `start_key` to
    /// `result`, keeping only `fields` when given.
    fn scan(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&FieldSet>,
        result: &mut Vec<Record>,
    ) -> Status;

    fn update(&self, table: &str, key: &str, values: &Record) -> Status;

    fn insert(&self, table: &str, key: &str, values: &Record) -> Status;

    fn delete(&self, table: &str, key: &str) -> Status;

    /// Called once when the worker owning this binding shuts down.
    fn cleanup(&self) -> Status {
        Status::Ok
    }
}

/// [`Binding`] backed by a [`KvClient`].
#[derive(Clone)]
pub struct KvBinding {
    client: KvClient,
}

impl KvBinding {
    pub fn new(client: KvClient) -> Self {
        Self { client }
    }

    /// Opens a binding for one harness worker.
    ///
    /// The gateway handle is created from `config.storage`, connecting to the
    /// next server of `rotation`. `sequence` is only used when
    /// `config.use_secondary_index` is set; share it between all workers of a
    /// run so that scan order spans every worker's inserts.
    pub fn open(
        config: &Config,
        connector: &dyn Connector,
        rotation: &ServerRotation,
        sequence: Arc<ScanSequence>,
    ) -> Result<Self> {
        let storage = create_storage(&config.storage, connector, rotation)?;
        let client = if config.use_secondary_index {
            KvClient::with_scan_sequence(storage, sequence)
        } else {
            KvClient::new(storage)
        };
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &KvClient {
        &self.client
    }
}

fn project(record: Record, fields: Option<&FieldSet>) -> Record {
    match fields {
        Some(fields) => record.project(fields),
        None => record,
    }
}

/// Logs a failed operation and returns its status.
fn failed(op: &str, table: &str, key: &str, err: &Error) -> Status {
    match err {
        Error::NotSupported(_) | Error::ScanStartNotFound { .. } => {
            tracing::warn!(op, table, key, error = %err, "operation rejected")
        }
        _ => tracing::error!(op, table, key, error = %err, "operation failed"),
    }
    Status::Error
}

impl Binding for KvBinding {
    fn read(
        &self,
        table: &str,
        key: &str,
        fields: Option<&FieldSet>,
        result: &mut Record,
    ) -> Status {
        match self.client.read(table, key) {
            Ok(Some(record)) => {
                result.merge(project(record, fields));
                Status::Ok
            }
            Ok(None) => Status::NotFound,
            Err(err) => failed("read", table, key, &err),
        }
    }

    fn scan(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&FieldSet>,
        result: &mut Vec<Record>,
    ) -> Status {
        match self.client.scan(table, start_key, record_count) {
            Ok(records) => {
                result.extend(records.into_iter().map(|r| project(r, fields)));
                Status::Ok
            }
            Err(err) => failed("scan", table, start_key, &err),
        }
    }

    fn update(&self, table: &str, key: &str, values: &Record) -> Status {
        match self.client.update(table, key, values) {
            Ok(()) => Status::Ok,
            Err(err) => failed("update", table, key, &err),
        }
    }

    fn insert(&self, table: &str, key: &str, values: &Record) -> Status {
        match self.client.insert(table, key, values) {
            Ok(()) => Status::Ok,
            Err(err) => failed("insert", table, key, &err),
        }
    }

    fn delete(&self, table: &str, key: &str) -> Status {
        match self.client.delete(table, key) {
            Ok(()) => Status::Ok,
            Err(err) => failed("delete", table, key, &err),
        }
    }

    fn cleanup(&self) -> Status {
        match self.client.close() {
            Ok(()) => Status::Ok,
            Err(err) => {
                tracing::error!(error = %err, "failed to close storage");
                Status::Error
            }
        }
    }
}
