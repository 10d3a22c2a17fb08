//! Eventops core data models.
//!
//! This crate defines the shift identity model shared by every other
//! crate: event phases and day periods, the canonical shift key that
//! joins resources to shifts, and the assignable resource record.

#![warn(missing_docs)]

// Core identities
mod id;

// Shift identity
mod phase;
mod event_day;
mod shift_key;

// Assignable resources
mod resource;
mod replication;

// Re-exports
pub use id::ResourceId;

pub use phase::{Phase, Period};
pub use event_day::EventDay;
pub use shift_key::{DecodedShiftKey, ShiftKey, ShiftKeyError};

pub use resource::{AssignableResource, ResourceFilter, ResourceKind};
pub use replication::{ReplicationRequest, ReplicationResult};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
