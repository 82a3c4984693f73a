pub mod record;
pub mod serde;
pub mod storage;

pub use record::{Field, FieldSet, Record};
pub use storage::config::{ClusterConfig, ServerAddress, StorageConfig};
pub use storage::factory::{Connector, ServerRotation, create_storage};
pub use storage::{IntIndexes, Storage, StorageError, StorageResult, StoredObject};
