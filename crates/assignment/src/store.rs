//! Per-shift resource resolution and grouping.

use eventops_core::{AssignableResource, ShiftKey};
use eventops_schedule::ShiftCalendar;
use tracing::warn;

/// Read-only view answering "which resources belong to shift X" for one
/// event's calendar and current resource set.
///
/// Resolution order per resource: canonical `shift_key`, else the
/// legacy key list, else (records carrying no assignment at all) the
/// chronologically first shift of the calendar. That last step is
/// display-only, so incompletely migrated records stay visible
/// somewhere instead of disappearing; it must never be written back as
/// the record's real assignment.
pub struct ResourceAssignmentStore<'a> {
    calendar: &'a ShiftCalendar,
    resources: &'a [AssignableResource],
}

impl<'a> ResourceAssignmentStore<'a> {
    /// Create a view over the current resource set.
    pub fn new(calendar: &'a ShiftCalendar, resources: &'a [AssignableResource]) -> Self {
        Self {
            calendar,
            resources,
        }
    }

    /// Resources displayed under a shift, including the first-shift
    /// fallback for unassigned records.
    pub fn resources_for_shift(&self, key: &ShiftKey) -> Vec<&'a AssignableResource> {
        self.resources
            .iter()
            .filter(|r| {
                if r.effective_shift_keys().contains(key) {
                    return true;
                }
                if self.falls_back_to(r, key) {
                    warn!(
                        resource = %r.id,
                        name = %r.name,
                        "resource has no shift assignment, displaying under first shift"
                    );
                    return true;
                }
                false
            })
            .collect()
    }

    /// Group the whole resource set by the calendar's shifts, in
    /// calendar order. Deterministic for a fixed input set.
    pub fn group_by_shift(&self) -> Vec<(ShiftKey, Vec<&'a AssignableResource>)> {
        self.calendar
            .shift_keys()
            .map(|key| {
                let members = self.resources_for_shift(&key);
                (key, members)
            })
            .collect()
    }

    /// Whether an unassigned record is surfaced under this key.
    fn falls_back_to(&self, resource: &AssignableResource, key: &ShiftKey) -> bool {
        match first_shift_fallback(resource, self.calendar) {
            Some(fallback) => &fallback == key,
            None => false,
        }
    }
}

/// The display-only landing shift for a record with no assignment: the
/// chronologically first shift of the calendar. Isolated here so the
/// fallback is easy to find, test, and eventually delete once the last
/// pre-migration records are gone. Callers must not persist the result.
pub fn first_shift_fallback(
    resource: &AssignableResource,
    calendar: &ShiftCalendar,
) -> Option<ShiftKey> {
    if !resource.is_unassigned() {
        return None;
    }
    calendar.first_shift().map(|first| first.shift_key())
}
