//! Meeting schedules: a day pattern plus a time period.

mod days;
mod period;

pub use days::Days;
pub use period::{Period, DAY_END, DAY_START};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EnlistmentError, Result};

/// When a section meets, e.g. `MTH 08:30-10:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Schedule {
    days: Days,
    period: Period,
}

impl Schedule {
    pub fn new(days: Days, period: Period) -> Self {
        Self { days, period }
    }

    pub fn days(&self) -> Days {
        self.days
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns true iff the schedules share a day and their periods overlap.
    ///
    /// Symmetric, since both `Days::intersects` and `Period::overlaps` are.
    pub fn conflicts_with(&self, other: &Schedule) -> bool {
        self.days.intersects(&other.days) && self.period.overlaps(&other.period)
    }
}

impl FromStr for Schedule {
    type Err = EnlistmentError;

    /// Parses `"<days> <start>-<end>"`, e.g. `"MTH 0830-1000"` or `"TF 1300-1430"`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || EnlistmentError::InvalidSchedule {
            value: s.to_string(),
        };

        let mut parts = s.split_whitespace();
        let (Some(days), Some(times), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let (start, end) = times.split_once('-').ok_or_else(malformed)?;
        let start: u32 = start.parse().map_err(|_| malformed())?;
        let end: u32 = end.parse().map_err(|_| malformed())?;

        Ok(Self::new(days.parse()?, Period::new(start, end)?))
    }
}

impl TryFrom<String> for Schedule {
    type Error = EnlistmentError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Schedule> for String {
    fn from(schedule: Schedule) -> Self {
        format!(
            "{} {:04}-{:04}",
            schedule.days,
            schedule.period.start_hhmm(),
            schedule.period.end_hhmm()
        )
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(days: Days, start: u32, end: u32) -> Schedule {
        Schedule::new(days, Period::new(start, end).unwrap())
    }

    #[test]
    fn test_same_days_overlapping_periods_conflict() {
        let first = schedule(Days::MTH, 830, 1000);
        let second = schedule(Days::MTH, 930, 1100);
        assert!(first.conflicts_with(&second));
        assert!(second.conflicts_with(&first));
    }

    #[test]
    fn test_disjoint_days_never_conflict() {
        let first = schedule(Days::MTH, 830, 1000);
        let second = schedule(Days::TF, 830, 1000);
        let third = schedule(Days::WS, 900, 1030);
        assert!(!first.conflicts_with(&second));
        assert!(!first.conflicts_with(&third));
    }

    #[test]
    fn test_shared_day_without_overlap() {
        let first = schedule(Days::MTH, 830, 1000);
        let second = schedule(Days::MWF, 1030, 1200);
        assert!(!first.conflicts_with(&second));
    }

    #[test]
    fn test_conflict_is_symmetric() {
        let mut schedules = Vec::new();
        for days in Days::ALL {
            for (start, end) in [(830, 1000), (930, 1100), (1000, 1130), (1300, 1730)] {
                schedules.push(schedule(days, start, end));
            }
        }

        for a in &schedules {
            for b in &schedules {
                assert_eq!(a.conflicts_with(b), b.conflicts_with(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_parse_schedule() {
        let parsed: Schedule = "MTH 0830-1000".parse().unwrap();
        assert_eq!(parsed, schedule(Days::MTH, 830, 1000));

        let parsed: Schedule = "tf 830-1000".parse().unwrap();
        assert_eq!(parsed.days(), Days::TF);
        assert_eq!(parsed.to_string(), "TF 08:30-10:00");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "MTH".parse::<Schedule>(),
            Err(EnlistmentError::InvalidSchedule { .. })
        ));
        assert!(matches!(
            "MTH 0830".parse::<Schedule>(),
            Err(EnlistmentError::InvalidSchedule { .. })
        ));
        assert!(matches!(
            "XYZ 0830-1000".parse::<Schedule>(),
            Err(EnlistmentError::InvalidDays { .. })
        ));
        assert!(matches!(
            "MTH 1000-0830".parse::<Schedule>(),
            Err(EnlistmentError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_serde_string_form() {
        let original = schedule(Days::WS, 1300, 1430);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"WS 1300-1430\"");
    }
}
