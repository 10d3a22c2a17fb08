//! In-memory storage implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use eventops_core::{AssignableResource, ResourceFilter, ResourceId};

use super::{ResourceStore, Result, StorageError};

/// HashMap-backed store. Used by tests and by callers that assemble the
/// resource set from an external API response before running the core.
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: HashMap<ResourceId, AssignableResource>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing resource set.
    pub fn with_resources(resources: impl IntoIterator<Item = AssignableResource>) -> Self {
        Self {
            resources: resources.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn save_resource(&mut self, resource: &AssignableResource) -> Result<()> {
        self.resources.insert(resource.id, resource.clone());
        Ok(())
    }

    async fn load_resource(&self, id: ResourceId) -> Result<Option<AssignableResource>> {
        Ok(self.resources.get(&id).cloned())
    }

    async fn list_resources(&self, filter: &ResourceFilter) -> Result<Vec<AssignableResource>> {
        let mut matching: Vec<AssignableResource> = self
            .resources
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        // Stable output for repeated reads over the same set
        matching.sort_by_key(|r| r.id.to_string());
        Ok(matching)
    }

    async fn delete_resource(&mut self, id: ResourceId) -> Result<()> {
        self.resources
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventops_core::{ResourceKind, ShiftKey};

    fn company(name: &str, key: &str) -> AssignableResource {
        AssignableResource::new(ResourceKind::Company, name, ShiftKey::new(key))
    }

    #[tokio::test]
    async fn test_save_load_delete_round_trip() {
        let mut store = MemoryStore::new();
        let resource = company("Acme", "2025-01-10-evento-diurno");
        store.save_resource(&resource).await.unwrap();

        let loaded = store.load_resource(resource.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Acme");

        store.delete_resource(resource.id).await.unwrap();
        assert!(store.load_resource(resource.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_resource(resource.id).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_applies_filter_and_is_stable() {
        let mut store = MemoryStore::new();
        store.save_resource(&company("Acme", "2025-01-10-evento-diurno")).await.unwrap();
        store.save_resource(&company("Globex", "2025-01-10-evento-diurno")).await.unwrap();
        let staff = AssignableResource::new(
            ResourceKind::CredentialType,
            "Staff",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        store.save_resource(&staff).await.unwrap();

        let filter = ResourceFilter::kind(ResourceKind::Company);
        let first = store.list_resources(&filter).await.unwrap();
        let second = store.list_resources(&filter).await.unwrap();
        assert_eq!(first.len(), 2);
        let ids: Vec<_> = first.iter().map(|r| r.id).collect();
        assert_eq!(ids, second.iter().map(|r| r.id).collect::<Vec<_>>());
    }
}
