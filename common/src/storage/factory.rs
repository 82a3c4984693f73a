//! Storage factory for creating gateway handles from configuration.
//!
//! Transports live outside this crate: a [`Connector`] opens a handle for one
//! server address, and [`create_storage`] decides which server a new binding
//! talks to.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::config::{ServerAddress, StorageConfig};
use super::in_memory::InMemoryStorage;
use super::{Storage, StorageError, StorageResult};

/// Opens a gateway handle to a single backend server.
pub trait Connector: Send + Sync {
    fn connect(&self, address: &ServerAddress) -> StorageResult<Arc<dyn Storage>>;
}

/// Round-robin cursor over a cluster's servers.
///
/// Share one rotation between all bindings of a benchmark run so that worker
/// connections are spread evenly across the cluster.
#[derive(Debug, Default)]
pub struct ServerRotation {
    next: AtomicUsize,
}

impl ServerRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next server, or `None` if `hosts` is empty.
    pub fn pick<'a>(&self, hosts: &'a [ServerAddress]) -> Option<&'a ServerAddress> {
        if hosts.is_empty() {
            return None;
        }
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        hosts.get(n % hosts.len())
    }
}

/// Creates a gateway handle based on the provided configuration.
///
/// # Arguments
///
/// * `config` - The storage configuration specifying the backend type.
/// * `connector` - Transport used to reach cluster servers.
/// * `rotation` - Round-robin state used to pick the server to connect to.
///
/// # Examples
///
/// ```rust,ignore
/// use common::{ServerRotation, StorageConfig, create_storage};
///
/// let rotation = ServerRotation::new();
/// let storage = create_storage(&StorageConfig::InMemory, &my_connector, &rotation)?;
/// ```
pub fn create_storage(
    config: &StorageConfig,
    connector: &dyn Connector,
    rotation: &ServerRotation,
) -> StorageResult<Arc<dyn Storage>> {
    match config {
        StorageConfig::InMemory => Ok(Arc::new(InMemoryStorage::new())),
        StorageConfig::Cluster(cluster) => {
            let address = rotation
                .pick(&cluster.hosts)
                .ok_or_else(|| StorageError::Config("cluster has no hosts".to_string()))?;
            tracing::debug!(%address, "connecting to server");
            connector.connect(address).map_err(|e| {
                StorageError::Storage(format!("Failed to connect to {}: {}", address, e))
            })
        }
    }
}
