//! Unique identifiers for eventops entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an AssignableResource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(Ulid);

impl ResourceId {
    /// Generate a new ResourceId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ResourceId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
