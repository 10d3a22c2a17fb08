//! Shift calendar - the ordered shift list of one event.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use eventops_core::{EventDay, Phase, ShiftKey};
use tracing::warn;

use crate::expander::expand_phase;
use crate::input::EventSchedule;

/// Two phases landing on the same calendar date. Legitimate (morning
/// teardown overlapping same-day setup of the next event leg) but worth
/// surfacing; no precedence rule is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapWarning {
    /// The shared date
    pub date: NaiveDate,

    /// Phases present on that date, in lifecycle order
    pub phases: Vec<Phase>,
}

/// Chronologically ordered shift list of one event.
///
/// Derived fresh from the event's phase data on every build; never
/// mutated in place. Same-date entries order setup before main before
/// teardown, and within a phase day before night before full-day.
#[derive(Debug, Clone, Default)]
pub struct ShiftCalendar {
    shifts: Vec<EventDay>,
    overlaps: Vec<OverlapWarning>,
}

impl ShiftCalendar {
    /// Build the calendar from the three phases' expanded day lists.
    pub fn build(setup: Vec<EventDay>, main: Vec<EventDay>, teardown: Vec<EventDay>) -> Self {
        let mut shifts = setup;
        shifts.extend(main);
        shifts.extend(teardown);
        shifts.sort_by_key(|d| (d.date, d.phase.weight(), d.period.weight()));

        let overlaps = detect_overlaps(&shifts);
        Self { shifts, overlaps }
    }

    /// Expand every phase of an event record and build the calendar.
    pub fn from_schedule(schedule: &EventSchedule) -> Self {
        Self::build(
            expand_phase(&schedule.setup, Phase::Setup),
            expand_phase(&schedule.main, Phase::Main),
            expand_phase(&schedule.teardown, Phase::Teardown),
        )
    }

    /// The ordered shifts.
    pub fn shifts(&self) -> &[EventDay] {
        &self.shifts
    }

    /// Same-date cross-phase overlaps found during the build.
    pub fn overlaps(&self) -> &[OverlapWarning] {
        &self.overlaps
    }

    /// Chronologically first shift, if any.
    pub fn first_shift(&self) -> Option<&EventDay> {
        self.shifts.first()
    }

    /// Canonical keys of every shift, in calendar order.
    pub fn shift_keys(&self) -> impl Iterator<Item = ShiftKey> + '_ {
        self.shifts.iter().map(EventDay::shift_key)
    }

    /// Whether a key names a shift of this calendar.
    pub fn contains(&self, key: &ShiftKey) -> bool {
        self.shifts.iter().any(|d| &d.shift_key() == key)
    }

    /// Number of shifts.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Whether the event has no shifts at all.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

fn detect_overlaps(shifts: &[EventDay]) -> Vec<OverlapWarning> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Phase>> = BTreeMap::new();
    for shift in shifts {
        let phases = by_date.entry(shift.date).or_default();
        if !phases.contains(&shift.phase) {
            phases.push(shift.phase);
        }
    }

    by_date
        .into_iter()
        .filter(|(_, phases)| phases.len() > 1)
        .map(|(date, phases)| {
            warn!(%date, ?phases, "multiple phases share a calendar date");
            OverlapWarning { date, phases }
        })
        .collect()
}
