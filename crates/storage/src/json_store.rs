//! JSON file storage implementation.
//!
//! Stores each resource as one JSON file under an `.eventops` directory
//! and keeps small per-record meta markers (version + updated_at). This
//! backend exists for the CLI; production deployments persist through
//! the remote API instead.

use std::path::Path;

use async_trait::async_trait;
use eventops_core::{AssignableResource, ResourceFilter, ResourceId};
use tokio::fs;

use super::{ResourceStore, Result, StorageError};

/// File-based JSON storage backend.
pub struct JsonStore {
    root: std::path::PathBuf,
}

impl JsonStore {
    /// Create storage, ensuring the data and meta subdirectories exist.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("resources")).await?;
        fs::create_dir_all(root.join("meta").join("resources")).await?;

        Ok(Self { root })
    }

    fn resource_path(&self, id: ResourceId) -> std::path::PathBuf {
        self.root.join("resources").join(format!("{}.json", id))
    }

    fn meta_path(&self, id: ResourceId) -> std::path::PathBuf {
        self.root
            .join("meta")
            .join("resources")
            .join(format!("{}.meta.json", id))
    }

    /// Read and increment the per-record version, return the new version.
    async fn bump_version(&self, id: ResourceId) -> Result<u64> {
        let path = self.meta_path(id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait]
impl ResourceStore for JsonStore {
    async fn save_resource(&mut self, resource: &AssignableResource) -> Result<()> {
        // Meta marker first: an error from save must always mean the
        // record itself was not written. A version bumped for a write
        // that then fails is a harmless gap in an advisory counter.
        let _ver = self.bump_version(resource.id).await?;

        let path = self.resource_path(resource.id);
        let json = serde_json::to_string_pretty(resource)?;
        fs::write(&path, json.as_bytes()).await?;
        Ok(())
    }

    async fn load_resource(&self, id: ResourceId) -> Result<Option<AssignableResource>> {
        read_json(&self.resource_path(id)).await
    }

    async fn list_resources(&self, filter: &ResourceFilter) -> Result<Vec<AssignableResource>> {
        let all: Vec<AssignableResource> = list_dir(&self.root.join("resources")).await?;
        let mut matching: Vec<AssignableResource> =
            all.into_iter().filter(|r| filter.matches(r)).collect();
        matching.sort_by_key(|r| r.id.to_string());
        Ok(matching)
    }

    async fn delete_resource(&mut self, id: ResourceId) -> Result<()> {
        fs::remove_file(self.resource_path(id)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ok(())
            } else {
                Err(e)
            }
        })?;
        match fs::remove_file(self.meta_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &std::path::Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("skipping unreadable record {}: {}", entry.path().display(), e);
            }
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventops_core::{ResourceKind, ShiftKey};

    #[tokio::test]
    async fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let resource = AssignableResource::new(
            ResourceKind::Company,
            "Acme",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        store.save_resource(&resource).await.unwrap();

        let loaded = store.load_resource(resource.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Acme");
        assert_eq!(loaded.shift_key, resource.shift_key);

        let listed = store
            .list_resources(&ResourceFilter::kind(ResourceKind::Company))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        store.delete_resource(resource.id).await.unwrap();
        assert!(store.load_resource(resource.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_error_means_record_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        // Break the meta directory so the marker write fails
        fs::remove_dir_all(dir.path().join("meta")).await.unwrap();
        fs::write(dir.path().join("meta"), b"").await.unwrap();

        let resource = AssignableResource::new(
            ResourceKind::Company,
            "Acme",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        assert!(store.save_resource(&resource).await.is_err());
        // The data file was never written
        assert!(store.load_resource(resource.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_version_bumps_on_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let mut resource = AssignableResource::new(
            ResourceKind::CredentialType,
            "Staff",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        store.save_resource(&resource).await.unwrap();
        resource.active = false;
        store.save_resource(&resource).await.unwrap();

        let meta = fs::read_to_string(store.meta_path(resource.id)).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&meta).unwrap();
        assert_eq!(json.get("version").and_then(|v| v.as_u64()), Some(2));
    }
}
