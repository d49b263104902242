//! Inclusive calendar date ranges and the overlap test the booking core is
//! built on.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// An inclusive range of calendar days, `start <= end`.
///
/// A one-night stay that checks out the next morning is `[d, d + 1]`; a
/// single-day booking is `[d, d]` and still occupies `d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if end < start {
            return Err(EngineError::InvalidRange(format!(
                "end date {end} is before start date {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Builds a range from raw wire values. Both bounds are required.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ResultEngine<Self> {
        let start = required_date(start, "start date")?;
        let end = required_date(end, "end date")?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Two inclusive ranges overlap iff `s1 <= e2 && s2 <= e1`.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn required_date(raw: Option<&str>, label: &str) -> ResultEngine<NaiveDate> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::InvalidRange(format!("{label} is required")))?;
    parse_date(raw)
        .ok_or_else(|| EngineError::InvalidRange(format!("{label} '{raw}' is not a date")))
}

/// Parses `YYYY-MM-DD`, an RFC 3339 instant or a naive `YYYY-MM-DDTHH:MM:SS`.
///
/// Instants are reduced to their UTC calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn rejects_end_before_start() {
        let err = DateRange::new(date("2024-01-12"), date("2024-01-10")).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidRange(
                "end date 2024-01-10 is before start date 2024-01-12".to_string()
            )
        );
    }

    #[test]
    fn single_day_range_overlaps_range_containing_it() {
        let booking = DateRange::day(date("2024-01-11"));
        assert!(booking.overlaps(&range("2024-01-10", "2024-01-12")));
        assert!(booking.overlaps(&DateRange::day(date("2024-01-11"))));
        assert!(!booking.overlaps(&DateRange::day(date("2024-01-12"))));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let booked = range("2024-01-10", "2024-01-12");
        assert!(!booked.overlaps(&range("2024-01-13", "2024-01-15")));
        assert!(!booked.overlaps(&range("2024-01-01", "2024-01-09")));
        assert!(booked.overlaps(&range("2024-01-12", "2024-01-15")));
    }

    #[test]
    fn contains_is_inclusive() {
        let booked = range("2024-01-10", "2024-01-12");
        assert!(booked.contains(date("2024-01-10")));
        assert!(booked.contains(date("2024-01-12")));
        assert!(!booked.contains(date("2024-01-13")));
    }

    #[test]
    fn parse_accepts_dates_and_instants() {
        let parsed = DateRange::parse(Some("2024-01-10"), Some("2024-01-12T23:30:00Z")).unwrap();
        assert_eq!(parsed, range("2024-01-10", "2024-01-12"));

        let parsed =
            DateRange::parse(Some("2024-01-10T08:00:00.000"), Some(" 2024-01-10 ")).unwrap();
        assert_eq!(parsed, DateRange::day(date("2024-01-10")));
    }

    #[test]
    fn parse_rejects_missing_or_garbage_bounds() {
        assert_eq!(
            DateRange::parse(None, Some("2024-01-10")).unwrap_err(),
            EngineError::InvalidRange("start date is required".to_string())
        );
        assert_eq!(
            DateRange::parse(Some("2024-01-10"), Some("  ")).unwrap_err(),
            EngineError::InvalidRange("end date is required".to_string())
        );
        assert_eq!(
            DateRange::parse(Some("tomorrow"), Some("2024-01-10")).unwrap_err(),
            EngineError::InvalidRange("start date 'tomorrow' is not a date".to_string())
        );
    }

    fn any_range() -> impl Strategy<Value = DateRange> {
        (0i64..2000, 0i64..60).prop_map(|(offset, len)| {
            let start = date("2020-01-01") + chrono::Duration::days(offset);
            DateRange::new(start, start + chrono::Duration::days(len)).unwrap()
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in any_range(), b in any_range()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlap_is_reflexive(a in any_range()) {
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn overlap_matches_shared_day(a in any_range(), b in any_range()) {
            let shared = a.start().iter_days().take_while(|d| *d <= a.end()).any(|d| b.contains(d));
            prop_assert_eq!(a.overlaps(&b), shared);
        }
    }
}
