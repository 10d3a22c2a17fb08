//! Assignable resource model - named entities bound to shifts.

use serde::{Deserialize, Serialize};

use crate::id::ResourceId;
use crate::shift_key::ShiftKey;
use crate::Time;

/// What kind of entity a resource represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A contracted company
    Company,
    /// A credential type (badge category)
    CredentialType,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Company => "company",
            ResourceKind::CredentialType => "credential_type",
        };
        f.write_str(name)
    }
}

/// A named resource assigned to a shift of one event.
///
/// A resource normally carries exactly one canonical `shift_key`.
/// `legacy_shift_keys` only exists for records created before the
/// single-shift model and is consulted as a fallback when `shift_key`
/// is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignableResource {
    /// Unique identifier
    pub id: ResourceId,

    /// Resource kind
    pub kind: ResourceKind,

    /// Display name; uniqueness is checked case-insensitively per shift
    pub name: String,

    /// Display color (hex), carried through replication
    pub color: Option<String>,

    /// Canonical shift assignment
    pub shift_key: Option<ShiftKey>,

    /// Multi-day keys from pre-migration records, fallback only
    #[serde(default)]
    pub legacy_shift_keys: Vec<ShiftKey>,

    /// Whether the resource is currently active
    pub active: bool,

    /// Whether wristbands/credentials were already handed out
    pub distributed: bool,

    /// Created at
    pub created_at: Time,

    /// Updated at
    pub updated_at: Time,
}

impl AssignableResource {
    /// Create a resource assigned to one shift.
    pub fn new(kind: ResourceKind, name: impl Into<String>, shift_key: ShiftKey) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ResourceId::new(),
            kind,
            name: name.into(),
            color: None,
            shift_key: Some(shift_key),
            legacy_shift_keys: Vec::new(),
            active: true,
            distributed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The shift keys this resource is considered assigned to: the
    /// canonical key when present, otherwise the legacy list.
    pub fn effective_shift_keys(&self) -> &[ShiftKey] {
        match &self.shift_key {
            Some(key) => std::slice::from_ref(key),
            None => &self.legacy_shift_keys,
        }
    }

    /// True when the record carries no assignment at all.
    pub fn is_unassigned(&self) -> bool {
        self.shift_key.is_none() && self.legacy_shift_keys.is_empty()
    }
}

/// Filter for listing resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Restrict to one kind
    pub kind: Option<ResourceKind>,

    /// Restrict to active/inactive records
    pub active: Option<bool>,
}

impl ResourceFilter {
    /// Filter matching every resource of one kind.
    pub fn kind(kind: ResourceKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Whether a resource passes this filter.
    pub fn matches(&self, resource: &AssignableResource) -> bool {
        if let Some(kind) = self.kind {
            if resource.kind != kind {
                return false;
            }
        }
        if let Some(active) = self.active {
            if resource.active != active {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_keys_prefer_canonical() {
        let mut resource = AssignableResource::new(
            ResourceKind::Company,
            "Acme",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        resource.legacy_shift_keys = vec![ShiftKey::new("2025-01-11-evento-diurno")];
        assert_eq!(
            resource.effective_shift_keys(),
            &[ShiftKey::new("2025-01-10-evento-diurno")]
        );
    }

    #[test]
    fn test_effective_keys_fall_back_to_legacy() {
        let mut resource = AssignableResource::new(
            ResourceKind::Company,
            "Acme",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        resource.shift_key = None;
        resource.legacy_shift_keys = vec![
            ShiftKey::new("2025-01-10-evento-diurno"),
            ShiftKey::new("2025-01-11-evento-diurno"),
        ];
        assert_eq!(resource.effective_shift_keys().len(), 2);
    }

    #[test]
    fn test_filter_by_kind_and_active() {
        let mut resource = AssignableResource::new(
            ResourceKind::CredentialType,
            "Staff",
            ShiftKey::new("2025-01-10-evento-diurno"),
        );
        assert!(ResourceFilter::kind(ResourceKind::CredentialType).matches(&resource));
        assert!(!ResourceFilter::kind(ResourceKind::Company).matches(&resource));

        resource.active = false;
        let filter = ResourceFilter {
            active: Some(true),
            ..Default::default()
        };
        assert!(!filter.matches(&resource));
    }
}
