//! Resource-to-shift assignment for eventops.
//!
//! Answers "which resources belong to shift X", rejects name+shift
//! duplicates, and wraps every create/edit/delete behind those checks.

mod store;
mod guard;
mod manager;

pub use store::{first_shift_fallback, ResourceAssignmentStore};
pub use guard::{ensure_unique, would_duplicate, DuplicateError};
pub use manager::{AssignmentError, ResourceManager, ResourceSpec};
