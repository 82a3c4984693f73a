//! Configuration for opening a binding.
//!
//! Bindings are configured either from a YAML file or from the flat property
//! map handed over by the benchmark harness.

use std::collections::HashMap;
use std::path::Path;

use common::storage::config::DEFAULT_HOST;
use common::{ClusterConfig, StorageConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Property holding the comma-separated `host:port` server list.
pub const HOSTS_PROPERTY: &str = "kv.hosts";

/// Property enabling index-backed scans.
pub const USE_2I_PROPERTY: &str = "kv.use_2i";

/// Configuration for opening a [`KvBinding`](crate::KvBinding).
///
/// # Example
///
/// ```ignore
/// use kv::Config;
/// use common::StorageConfig;
///
/// let config = Config {
///     storage: StorageConfig::InMemory,
///     use_secondary_index: true,
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Whether inserts are tagged with scan index values and scans are
    /// allowed.
    ///
    /// Tagging adds a secondary-index write to every insert, so it is off by
    /// default.
    #[serde(default)]
    pub use_secondary_index: bool,
}

impl Config {
    /// Builds a configuration from benchmark properties.
    ///
    /// Recognizes [`HOSTS_PROPERTY`] (default [`DEFAULT_HOST`]) and
    /// [`USE_2I_PROPERTY`] (default `false`; only a case-insensitive `true`
    /// enables it). Other properties are ignored.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let hosts = properties
            .get(HOSTS_PROPERTY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_HOST);
        let use_secondary_index = properties
            .get(USE_2I_PROPERTY)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        Ok(Self {
            storage: StorageConfig::Cluster(ClusterConfig::from_host_list(hosts)?),
            use_secondary_index,
        })
    }
}

/// Loads a binding configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref())
        .map_err(|e| Error::InvalidInput(format!("Failed to read config file: {}", e)))?;

    serde_yaml::from_str(&contents)
        .map_err(|e| Error::InvalidInput(format!("Failed to parse config file: {}", e)))
}
