//! Shift calendar derivation for eventops.
//!
//! Takes the raw phase day-lists of an event record and turns them into
//! the canonical, chronologically ordered list of shifts the rest of
//! the system joins against.

mod input;
mod expander;
mod calendar;

pub use input::{EventSchedule, PhaseDates, RawDayEntry};
pub use expander::{expand_days, expand_phase, expand_range};
pub use calendar::{OverlapWarning, ShiftCalendar};
