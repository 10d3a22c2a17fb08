//! Phase expansion - raw day entries to normalized EventDay records.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use eventops_core::{EventDay, Period, Phase};
use tracing::warn;

use crate::input::{PhaseDates, RawDayEntry};

/// Expand one phase's day data, choosing between the explicit day-list
/// schema and the legacy start/end range.
pub fn expand_phase(dates: &PhaseDates, phase: Phase) -> Vec<EventDay> {
    if !dates.days.is_empty() {
        return expand_days(&dates.days, phase);
    }
    match (&dates.start_date, &dates.end_date) {
        (Some(start), Some(end)) => expand_range(start, end, phase),
        _ => Vec::new(),
    }
}

/// Normalize explicit per-day entries into EventDay records.
///
/// Each entry keeps its stated period. When the period is missing or
/// unrecognized, it is derived from the hour of the raw timestamp
/// (06:00-17:59 is daytime, the rest nighttime); a date-only entry with
/// no stated period defaults to daytime. Malformed dates are dropped
/// with a warning. Duplicate `(date, phase, period)` triples collapse
/// to one record. Output order is whatever the input gave us; sorting
/// is the calendar's job.
pub fn expand_days(entries: &[RawDayEntry], phase: Phase) -> Vec<EventDay> {
    let mut seen: HashSet<(NaiveDate, Phase, Period)> = HashSet::new();
    let mut out = Vec::new();

    for entry in entries {
        let Some((date, hour)) = parse_stamp(&entry.date) else {
            warn!(phase = %phase, date = %entry.date, "dropping entry with malformed date");
            continue;
        };

        let period = match entry.period.as_deref().and_then(Period::parse_token) {
            Some(period) => period,
            None => {
                if let Some(token) = entry.period.as_deref() {
                    warn!(phase = %phase, token, "unrecognized period token, deriving from timestamp");
                }
                hour.map(Period::from_hour).unwrap_or(Period::Day)
            }
        };

        if seen.insert((date, phase, period)) {
            out.push(EventDay::new(date, phase, period));
        }
    }

    out
}

/// Synthesize one daytime EventDay per calendar day of an inclusive
/// legacy start/end range.
pub fn expand_range(start: &str, end: &str, phase: Phase) -> Vec<EventDay> {
    let (Some((start, _)), Some((end, _))) = (parse_stamp(start), parse_stamp(end)) else {
        warn!(phase = %phase, start, end, "dropping legacy range with malformed date");
        return Vec::new();
    };
    if start > end {
        warn!(phase = %phase, %start, %end, "dropping legacy range with start after end");
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut current = start;
    while current <= end {
        out.push(EventDay::new(current, phase, Period::Day));
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}

/// Parse an ISO-8601 date or datetime string to a day-precision date
/// plus the hour component when one was present. No timezone
/// conversion: an offset, if any, is ignored and the local clock time
/// is kept.
fn parse_stamp(raw: &str) -> Option<(NaiveDate, Option<u32>)> {
    let raw = raw.trim();

    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some((date, None));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some((stamp.date(), Some(stamp.hour())));
        }
    }

    // Datetime with trailing offset, e.g. 2025-01-10T20:00:00-03:00 or ...Z
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(raw) {
        let naive = stamp.naive_local();
        return Some((naive.date(), Some(naive.hour())));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_stated_period_wins_over_timestamp() {
        // 20:00 would derive Night, but the entry states diurno
        let entries = [RawDayEntry::new("2025-01-10T20:00:00", "diurno")];
        let days = expand_days(&entries, Phase::Main);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].period, Period::Day);
    }

    #[test]
    fn test_missing_period_derives_from_hour() {
        let entries = [
            RawDayEntry::date_only("2025-01-10T09:30:00"),
            RawDayEntry::date_only("2025-01-10T22:00:00"),
        ];
        let days = expand_days(&entries, Phase::Main);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].period, Period::Day);
        assert_eq!(days[1].period, Period::Night);
    }

    #[test]
    fn test_unrecognized_period_falls_back_to_timestamp() {
        let entries = [RawDayEntry::new("2025-01-10T22:00:00", "crepuscular")];
        let days = expand_days(&entries, Phase::Main);
        assert_eq!(days[0].period, Period::Night);
    }

    #[test]
    fn test_date_only_entry_defaults_to_day() {
        let entries = [RawDayEntry::date_only("2025-01-10")];
        let days = expand_days(&entries, Phase::Setup);
        assert_eq!(days[0].period, Period::Day);
    }

    #[test]
    fn test_duplicates_collapse() {
        let entries = [
            RawDayEntry::new("2025-01-10", "diurno"),
            RawDayEntry::new("2025-01-10T08:00:00", "diurno"),
            RawDayEntry::new("2025-01-10", "noturno"),
        ];
        let days = expand_days(&entries, Phase::Main);
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn test_malformed_dates_are_dropped_not_fatal() {
        let entries = [
            RawDayEntry::new("10/01/2025", "diurno"),
            RawDayEntry::new("2025-01-11", "diurno"),
            RawDayEntry::date_only(""),
        ];
        let days = expand_days(&entries, Phase::Main);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, date("2025-01-11"));
    }

    #[test]
    fn test_offset_datetime_keeps_local_clock() {
        let entries = [RawDayEntry::date_only("2025-01-10T20:00:00-03:00")];
        let days = expand_days(&entries, Phase::Main);
        assert_eq!(days[0].date, date("2025-01-10"));
        assert_eq!(days[0].period, Period::Night);
    }

    #[test]
    fn test_range_synthesizes_inclusive_day_shifts() {
        let days = expand_range("2025-01-08", "2025-01-10", Phase::Setup);
        assert_eq!(days.len(), 3);
        assert!(days.iter().all(|d| d.period == Period::Day && d.phase == Phase::Setup));
        assert_eq!(days[0].date, date("2025-01-08"));
        assert_eq!(days[2].date, date("2025-01-10"));
    }

    #[test]
    fn test_inverted_or_malformed_range_is_empty() {
        assert!(expand_range("2025-01-10", "2025-01-08", Phase::Setup).is_empty());
        assert!(expand_range("soon", "2025-01-08", Phase::Setup).is_empty());
    }

    #[test]
    fn test_expand_phase_prefers_day_list_over_range() {
        let dates = PhaseDates {
            days: vec![RawDayEntry::new("2025-01-10", "noturno")],
            start_date: Some("2025-01-01".to_string()),
            end_date: Some("2025-01-05".to_string()),
        };
        let days = expand_phase(&dates, Phase::Main);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].period, Period::Night);
    }

    #[test]
    fn test_no_two_outputs_share_identity() {
        let entries = [
            RawDayEntry::new("2025-01-10", "diurno"),
            RawDayEntry::new("2025-01-10", "diurno"),
            RawDayEntry::date_only("2025-01-10T08:00:00"),
            RawDayEntry::new("2025-01-11", "diurno"),
        ];
        let days = expand_days(&entries, Phase::Main);
        let mut identities: Vec<_> = days.iter().map(|d| d.identity()).collect();
        identities.dedup();
        identities.sort();
        identities.dedup();
        assert_eq!(identities.len(), days.len());
    }
}
