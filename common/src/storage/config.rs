//! Storage configuration types.
//!
//! This module provides configuration structures for the storage gateway,
//! allowing bindings to choose between a process-local store and a cluster of
//! backend servers via config files or flat benchmark properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{StorageError, StorageResult};

/// Server used when no host list is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1:8087";

/// Top-level storage configuration.
///
/// Defaults to a `Cluster` with a single local server at [`DEFAULT_HOST`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StorageConfig {
    InMemory,
    Cluster(ClusterConfig),
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Cluster(ClusterConfig::default())
    }
}

/// Cluster-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfig {
    /// Servers to connect to. Each binding instance is assigned one of them
    /// round-robin when it opens its connection.
    pub hosts: Vec<ServerAddress>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            hosts: vec![ServerAddress::new("127.0.0.1", 8087)],
        }
    }
}

impl ClusterConfig {
    /// Parses a comma-separated host list such as `"host1:8087, host2:8087"`.
    ///
    /// Whitespace around entries is ignored, as are empty entries.
    pub fn from_host_list(list: &str) -> StorageResult<Self> {
        let hosts = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ServerAddress::from_str)
            .collect::<StorageResult<Vec<_>>>()?;
        if hosts.is_empty() {
            return Err(StorageError::Config(format!(
                "host list '{}' contains no servers",
                list
            )));
        }
        Ok(Self { hosts })
    }
}

/// A backend server address in `host:port` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl FromStr for ServerAddress {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = s.rsplit_once(':').ok_or_else(|| {
            StorageError::Config(format!("server address '{}' must be host:port", s))
        })?;
        let host = host.trim();
        if host.is_empty() {
            return Err(StorageError::Config(format!(
                "server address '{}' has an empty host",
                s
            )));
        }
        let port = port.trim().parse::<u16>().map_err(|e| {
            StorageError::Config(format!("server address '{}' has an invalid port: {}", s, e))
        })?;
        Ok(Self::new(host, port))
    }
}

impl TryFrom<String> for ServerAddress {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServerAddress> for String {
    fn from(address: ServerAddress) -> Self {
        address.to_string()
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
