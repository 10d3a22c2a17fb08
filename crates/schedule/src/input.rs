//! Event-record input model.
//!
//! This is the wire shape the remote event API hands us: one day-list
//! per phase, or (older records) a bare start/end date range per phase.

use serde::{Deserialize, Serialize};

/// One raw per-day entry of a phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDayEntry {
    /// ISO-8601 date or datetime string
    pub date: String,

    /// Stated period token (`diurno`/`noturno`/`dia_inteiro` or a legacy
    /// alias); when absent the expander derives one from the timestamp
    #[serde(default)]
    pub period: Option<String>,
}

impl RawDayEntry {
    /// Entry with a stated period.
    pub fn new(date: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            period: Some(period.into()),
        }
    }

    /// Entry without a stated period.
    pub fn date_only(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            period: None,
        }
    }
}

/// The day data of a single phase: either explicit per-day entries or a
/// legacy start/end range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseDates {
    /// Explicit per-day entries (primary schema)
    #[serde(default)]
    pub days: Vec<RawDayEntry>,

    /// Legacy range start
    #[serde(default)]
    pub start_date: Option<String>,

    /// Legacy range end
    #[serde(default)]
    pub end_date: Option<String>,
}

impl PhaseDates {
    /// Whether this phase has any day data at all.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && (self.start_date.is_none() || self.end_date.is_none())
    }
}

/// The three phase day-lists of an event record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventSchedule {
    /// Setup phase days
    #[serde(default, alias = "montagem")]
    pub setup: PhaseDates,

    /// Main event days
    #[serde(default, alias = "evento")]
    pub main: PhaseDates,

    /// Teardown phase days
    #[serde(default, alias = "desmontagem")]
    pub teardown: PhaseDates,
}
