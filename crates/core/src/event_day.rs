//! EventDay model - a single (date, phase, period) shift occurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::phase::{Phase, Period};
use crate::shift_key::ShiftKey;

/// One discrete shift of an event: a calendar day under a phase and period.
///
/// Identity is the `(date, phase, period)` triple; the label is derived
/// presentation text and never participates in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDay {
    /// Calendar date, day precision, timezone-naive
    pub date: NaiveDate,

    /// Lifecycle phase
    pub phase: Phase,

    /// Day period
    pub period: Period,

    /// Human-readable label for tab rendering
    pub label: String,
}

impl EventDay {
    /// Create an event day with a derived display label.
    pub fn new(date: NaiveDate, phase: Phase, period: Period) -> Self {
        let label = format!("{} {} ({})", date.format("%d/%m"), phase, period);
        Self {
            date,
            phase,
            period,
            label,
        }
    }

    /// Canonical shift key for this day.
    pub fn shift_key(&self) -> ShiftKey {
        ShiftKey::encode(self.date, self.phase, self.period)
    }

    /// Identity triple used for deduplication and equality.
    pub fn identity(&self) -> (NaiveDate, Phase, Period) {
        (self.date, self.phase, self.period)
    }
}

impl PartialEq for EventDay {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for EventDay {}
