//! Shift-to-shift resource replication for eventops.

mod engine;

pub use engine::{ReplicationEngine, ReplicationError};
