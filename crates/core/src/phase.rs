//! Phase and period model - the two axes that, with a date, identify a shift.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an event.
///
/// Variant order doubles as chronological precedence on a shared date:
/// setup runs before the main event, teardown after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Setup / montagem
    Setup,
    /// Main event / evento
    Main,
    /// Teardown / desmontagem
    Teardown,
}

impl Phase {
    /// Ordering weight used by the calendar sort (setup=0, main=1, teardown=2).
    pub fn weight(self) -> u8 {
        match self {
            Phase::Setup => 0,
            Phase::Main => 1,
            Phase::Teardown => 2,
        }
    }

    /// Canonical wire token. This exact spelling is persisted inside
    /// shift keys and must stay stable across releases.
    pub fn token(self) -> &'static str {
        match self {
            Phase::Setup => "montagem",
            Phase::Main => "evento",
            Phase::Teardown => "desmontagem",
        }
    }

    /// Resolve a wire token to a phase, accepting every historical alias.
    ///
    /// Alias resolution happens only here, at the decode boundary;
    /// everything downstream sees canonical variants.
    pub fn parse_token(s: &str) -> Option<Phase> {
        match s.trim().to_ascii_lowercase().as_str() {
            "montagem" | "setup" | "preparation" => Some(Phase::Setup),
            "evento" | "event" | "main" => Some(Phase::Main),
            "desmontagem" | "teardown" | "finalization" => Some(Phase::Teardown),
            _ => None,
        }
    }

    /// All phases in chronological order.
    pub fn all() -> [Phase; 3] {
        [Phase::Setup, Phase::Main, Phase::Teardown]
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "Setup",
            Phase::Main => "Main event",
            Phase::Teardown => "Teardown",
        };
        f.write_str(name)
    }
}

/// Sub-day granularity of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Daytime / diurno
    Day,
    /// Nighttime / noturno
    Night,
    /// Whole day / dia_inteiro
    FullDay,
}

impl Period {
    /// Ordering weight used by the calendar sort (day=0, night=1, full_day=2).
    pub fn weight(self) -> u8 {
        match self {
            Period::Day => 0,
            Period::Night => 1,
            Period::FullDay => 2,
        }
    }

    /// Canonical wire token, persisted inside shift keys.
    pub fn token(self) -> &'static str {
        match self {
            Period::Day => "diurno",
            Period::Night => "noturno",
            Period::FullDay => "dia_inteiro",
        }
    }

    /// Resolve a wire token to a period, accepting every historical alias.
    pub fn parse_token(s: &str) -> Option<Period> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diurno" | "day" => Some(Period::Day),
            "noturno" | "night" => Some(Period::Night),
            "dia_inteiro" | "full_day" | "fullday" => Some(Period::FullDay),
            _ => None,
        }
    }

    /// Classify an hour-of-day into a period: 06:00-17:59 is daytime,
    /// anything else nighttime. Compatibility fallback for entries that
    /// carry a timestamp but no stated period.
    pub fn from_hour(hour: u32) -> Period {
        if (6..18).contains(&hour) {
            Period::Day
        } else {
            Period::Night
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Period::Day => "Day",
            Period::Night => "Night",
            Period::FullDay => "Full day",
        };
        f.write_str(name)
    }
}
