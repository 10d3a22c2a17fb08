//! Storage backends for eventops resource records.
//!
//! The surrounding application persists resources through a remote API;
//! this crate defines the seam ([`ResourceStore`]) the scheduling core
//! requires from that layer, plus two local backends: an in-memory store
//! for tests and embedding, and a JSON-file store for the CLI.

mod trait_;
mod memory;
mod json_store;

pub use trait_::{ResourceStore, Result, StorageError};
pub use memory::MemoryStore;
pub use json_store::JsonStore;
