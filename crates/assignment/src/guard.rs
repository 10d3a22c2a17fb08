//! Duplicate guard - name+shift collision detection.
//!
//! Two resources collide when their names are equal under trimmed
//! case-insensitive comparison AND their shift-key sets share at least
//! one key. This check runs before every manual create/edit and before
//! every replication-target write.

use eventops_core::{AssignableResource, ResourceId, ShiftKey};

/// A rejected create/edit: the name already exists at one of the
/// candidate shifts.
#[derive(Debug, Clone, thiserror::Error)]
#[error("\"{name}\" is already assigned to shift {shift_key}")]
pub struct DuplicateError {
    /// The colliding name as the caller supplied it
    pub name: String,

    /// The first shift where the collision was found
    pub shift_key: ShiftKey,
}

/// Whether creating `(name, shift_keys)` would collide with an existing
/// resource. `exclude` lets an edit-in-place ignore the record being
/// edited.
pub fn would_duplicate(
    name: &str,
    shift_keys: &[ShiftKey],
    existing: &[AssignableResource],
    exclude: Option<ResourceId>,
) -> bool {
    find_collision(name, shift_keys, existing, exclude).is_some()
}

/// Same check as [`would_duplicate`], reported as a rejected operation
/// with a human-readable reason.
pub fn ensure_unique(
    name: &str,
    shift_keys: &[ShiftKey],
    existing: &[AssignableResource],
    exclude: Option<ResourceId>,
) -> Result<(), DuplicateError> {
    match find_collision(name, shift_keys, existing, exclude) {
        Some(shift_key) => Err(DuplicateError {
            name: name.to_string(),
            shift_key,
        }),
        None => Ok(()),
    }
}

fn find_collision(
    name: &str,
    shift_keys: &[ShiftKey],
    existing: &[AssignableResource],
    exclude: Option<ResourceId>,
) -> Option<ShiftKey> {
    let candidate = normalize(name);
    existing
        .iter()
        .filter(|r| Some(r.id) != exclude)
        .filter(|r| normalize(&r.name) == candidate)
        .find_map(|r| {
            r.effective_shift_keys()
                .iter()
                .find(|&key| shift_keys.contains(key))
                .cloned()
        })
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
