//! Replication command and tally types.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;
use crate::shift_key::ShiftKey;

/// A request to copy every resource at one shift to a set of targets.
/// Transient command object, never persisted.
#[derive(Debug, Clone)]
pub struct ReplicationRequest {
    /// Shift to copy from
    pub source: ShiftKey,

    /// Shifts to copy to
    pub targets: Vec<ShiftKey>,

    /// Which resource kind to replicate
    pub kind: ResourceKind,
}

impl ReplicationRequest {
    /// Build a request.
    pub fn new(source: ShiftKey, targets: Vec<ShiftKey>, kind: ResourceKind) -> Self {
        Self {
            source,
            targets,
            kind,
        }
    }
}

/// Outcome tally of a replication run.
///
/// Operators must be able to tell partial outcomes apart, so the three
/// counters are reported separately and never collapsed into a single
/// success/failure bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationResult {
    /// Resources newly created at targets
    pub created: usize,

    /// Pairs skipped because the name already existed at the target
    pub skipped: usize,

    /// Pairs that failed to persist
    pub failed: usize,
}

impl std::fmt::Display for ReplicationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "created {}, skipped {} (already existed), failed {}",
            self.created, self.skipped, self.failed
        )
    }
}
