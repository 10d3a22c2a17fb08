//! ShiftKey - canonical string identity joining resources to shifts.
//!
//! Wire format: `<YYYY-MM-DD>-<phase-token>-<period-token>`, e.g.
//! `2025-01-10-evento-diurno`. Keys are persisted on resource records,
//! so the format must stay stable across releases. A key is scoped to
//! one event and must not be compared across events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::phase::{Phase, Period};

/// Canonical identity of a shift within one event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftKey(String);

/// Components recovered from a shift key.
///
/// `recognized` is false when a phase or period token was missing or
/// unknown and the decoder fell back to `Main`/`Day`. Callers that care
/// about data quality check it and warn; the decoded value stays usable
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedShiftKey {
    /// Calendar date of the shift
    pub date: NaiveDate,

    /// Lifecycle phase
    pub phase: Phase,

    /// Day period
    pub period: Period,

    /// False when any token fell back to a default
    pub recognized: bool,
}

/// Errors decoding a shift key.
#[derive(Debug, thiserror::Error)]
pub enum ShiftKeyError {
    /// Key shorter than a date prefix
    #[error("shift key too short: {0:?}")]
    TooShort(String),

    /// Date prefix did not parse as YYYY-MM-DD
    #[error("invalid date in shift key: {0:?}")]
    InvalidDate(String),
}

impl ShiftKey {
    /// Wrap a raw string loaded from persistence. No validation happens
    /// here; call [`ShiftKey::decode`] to recover the components.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Encode a `(date, phase, period)` triple into its canonical key.
    pub fn encode(date: NaiveDate, phase: Phase, period: Period) -> Self {
        Self(format!(
            "{}-{}-{}",
            date.format("%Y-%m-%d"),
            phase.token(),
            period.token()
        ))
    }

    /// Decode this key back into its components.
    ///
    /// Accepts canonical tokens and every legacy alias. Unknown phase or
    /// period tokens fall back to `Main`/`Day` with `recognized = false`;
    /// only an unparsable date is an error, since no date default makes
    /// sense.
    pub fn decode(&self) -> Result<DecodedShiftKey, ShiftKeyError> {
        let raw = self.0.as_str();
        let date_part = raw
            .get(..10)
            .ok_or_else(|| ShiftKeyError::TooShort(raw.to_string()))?;
        let date: NaiveDate = date_part
            .parse()
            .map_err(|_| ShiftKeyError::InvalidDate(raw.to_string()))?;

        let rest = raw[10..].trim_start_matches('-');
        let mut parts = rest.splitn(2, '-');
        let phase_token = parts.next().unwrap_or("");
        let period_token = parts.next().unwrap_or("");

        let phase = Phase::parse_token(phase_token);
        let period = Period::parse_token(period_token);
        let recognized = phase.is_some() && period.is_some();

        Ok(DecodedShiftKey {
            date,
            phase: phase.unwrap_or(Phase::Main),
            period: period.unwrap_or(Period::Day),
            recognized,
        })
    }

    /// The wire string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShiftKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
