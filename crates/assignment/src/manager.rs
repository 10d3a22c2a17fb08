//! Resource management service - guarded create/edit/delete.

use std::sync::Arc;

use eventops_core::{AssignableResource, ResourceFilter, ResourceId, ResourceKind, ShiftKey};
use eventops_storage::{ResourceStore, StorageError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::guard::{ensure_unique, DuplicateError};

/// Errors from resource management operations.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// Rejected: name already present at the shift
    #[error(transparent)]
    Duplicate(#[from] DuplicateError),

    /// Resource does not exist
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// Persistence failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Specification for creating or editing a resource.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    /// Resource kind
    pub kind: ResourceKind,

    /// Display name
    pub name: String,

    /// Display color (hex)
    pub color: Option<String>,

    /// Canonical shift assignment
    pub shift_key: ShiftKey,
}

/// Create/edit/toggle/delete service for assignable resources.
///
/// Every mutation that could introduce a name+shift duplicate runs the
/// duplicate guard against the current resource set before touching
/// storage.
pub struct ResourceManager<S: ResourceStore> {
    storage: Arc<Mutex<S>>,
}

impl<S: ResourceStore> ResourceManager<S> {
    /// Create a manager owning its storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Create a manager over a shared storage handle.
    pub fn from_shared(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// The shared storage handle, for wiring other services (e.g. the
    /// replication engine) to the same backend.
    pub fn storage(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.storage)
    }

    /// Create a resource at one shift, rejecting duplicates.
    pub async fn create(&self, spec: ResourceSpec) -> Result<AssignableResource, AssignmentError> {
        let mut storage = self.storage.lock().await;

        let existing = storage
            .list_resources(&ResourceFilter::kind(spec.kind))
            .await?;
        ensure_unique(
            &spec.name,
            std::slice::from_ref(&spec.shift_key),
            &existing,
            None,
        )?;

        let mut resource = AssignableResource::new(spec.kind, spec.name, spec.shift_key);
        resource.color = spec.color;
        storage.save_resource(&resource).await?;
        debug!(id = %resource.id, name = %resource.name, "created resource");
        Ok(resource)
    }

    /// Edit a resource in place. The guard ignores the record itself, so
    /// saving without renaming is never a self-collision.
    pub async fn update(
        &self,
        id: ResourceId,
        spec: ResourceSpec,
    ) -> Result<AssignableResource, AssignmentError> {
        let mut storage = self.storage.lock().await;

        let mut resource = storage
            .load_resource(id)
            .await?
            .ok_or(AssignmentError::NotFound(id))?;

        let existing = storage
            .list_resources(&ResourceFilter::kind(spec.kind))
            .await?;
        ensure_unique(
            &spec.name,
            std::slice::from_ref(&spec.shift_key),
            &existing,
            Some(id),
        )?;

        resource.name = spec.name;
        resource.color = spec.color;
        resource.shift_key = Some(spec.shift_key);
        resource.updated_at = chrono::Utc::now();
        storage.save_resource(&resource).await?;
        Ok(resource)
    }

    /// Toggle the active flag.
    pub async fn set_active(
        &self,
        id: ResourceId,
        active: bool,
    ) -> Result<AssignableResource, AssignmentError> {
        let mut storage = self.storage.lock().await;

        let mut resource = storage
            .load_resource(id)
            .await?
            .ok_or(AssignmentError::NotFound(id))?;
        resource.active = active;
        resource.updated_at = chrono::Utc::now();
        storage.save_resource(&resource).await?;
        Ok(resource)
    }

    /// Mark whether credentials/wristbands were handed out.
    pub async fn set_distributed(
        &self,
        id: ResourceId,
        distributed: bool,
    ) -> Result<AssignableResource, AssignmentError> {
        let mut storage = self.storage.lock().await;

        let mut resource = storage
            .load_resource(id)
            .await?
            .ok_or(AssignmentError::NotFound(id))?;
        resource.distributed = distributed;
        resource.updated_at = chrono::Utc::now();
        storage.save_resource(&resource).await?;
        Ok(resource)
    }

    /// Delete a resource.
    pub async fn delete(&self, id: ResourceId) -> Result<(), AssignmentError> {
        let mut storage = self.storage.lock().await;
        storage.delete_resource(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventops_storage::MemoryStore;

    fn spec(name: &str, shift: &str) -> ResourceSpec {
        ResourceSpec {
            kind: ResourceKind::Company,
            name: name.to_string(),
            color: None,
            shift_key: ShiftKey::new(shift),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_at_shift() {
        let manager = ResourceManager::new(MemoryStore::new());
        manager.create(spec("Acme", "2025-01-10-evento-diurno")).await.unwrap();

        let err = manager
            .create(spec("  ACME ", "2025-01-10-evento-diurno"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentError::Duplicate(_)));

        // Same name at another shift is fine
        manager.create(spec("Acme", "2025-01-11-evento-diurno")).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_ignores_self_but_catches_others() {
        let manager = ResourceManager::new(MemoryStore::new());
        let acme = manager.create(spec("Acme", "2025-01-10-evento-diurno")).await.unwrap();
        manager.create(spec("Globex", "2025-01-10-evento-diurno")).await.unwrap();

        // Re-saving under its own name is not a self-collision
        let updated = manager
            .update(acme.id, spec("Acme", "2025-01-10-evento-diurno"))
            .await
            .unwrap();
        assert_eq!(updated.id, acme.id);

        // Renaming onto a neighbour is
        let err = manager
            .update(acme.id, spec("globex", "2025-01-10-evento-diurno"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignmentError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_toggles_and_delete() {
        let manager = ResourceManager::new(MemoryStore::new());
        let acme = manager.create(spec("Acme", "2025-01-10-evento-diurno")).await.unwrap();
        assert!(acme.active);
        assert!(!acme.distributed);

        let acme = manager.set_active(acme.id, false).await.unwrap();
        assert!(!acme.active);
        let acme = manager.set_distributed(acme.id, true).await.unwrap();
        assert!(acme.distributed);

        manager.delete(acme.id).await.unwrap();
        let err = manager.set_active(acme.id, true).await.unwrap_err();
        assert!(matches!(err, AssignmentError::NotFound(_)));
    }
}
