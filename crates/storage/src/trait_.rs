//! Storage trait abstraction.

use async_trait::async_trait;
use eventops_core::{AssignableResource, ResourceFilter, ResourceId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Persistence abstraction for assignable resources.
///
/// The scheduling core only needs individual creates/updates to be
/// reported as success or failure; the replication engine counts them
/// one by one and never rolls a batch back.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Save a resource (create or update).
    async fn save_resource(&mut self, resource: &AssignableResource) -> Result<()>;

    /// Load a resource by ID.
    async fn load_resource(&self, id: ResourceId) -> Result<Option<AssignableResource>>;

    /// List resources matching the filter.
    async fn list_resources(&self, filter: &ResourceFilter) -> Result<Vec<AssignableResource>>;

    /// Delete a resource.
    async fn delete_resource(&mut self, id: ResourceId) -> Result<()>;
}
