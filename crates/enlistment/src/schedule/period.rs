//! Half-open time-of-day intervals.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

use crate::error::{EnlistmentError, Result};

/// Earliest start of a class, as HHMM.
pub const DAY_START: u32 = 830;

/// Latest end of a class, as HHMM.
pub const DAY_END: u32 = 1730;

/// Class times fall on half-hour boundaries.
const INCREMENT_MINUTES: u32 = 30;

/// A half-open interval `[start, end)` within the school day.
///
/// Built from HHMM integers, e.g. `Period::new(830, 1000)` is 08:30 to 10:00.
///
/// # Invariants
/// `start < end`, both within [`DAY_START`, `DAY_END`] and on a half-hour boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    start: NaiveTime,
    end: NaiveTime,
}

impl Period {
    /// Creates a period from HHMM-encoded start and end times.
    ///
    /// # Returns
    /// * `Ok(Period)` - A valid period
    /// * `Err(InvalidPeriod)` - If either time is not a valid HHMM value, falls
    ///   outside the school day, is off the half-hour grid, or if `start >= end`
    pub fn new(start: u32, end: u32) -> Result<Self> {
        let invalid = |reason: &str| EnlistmentError::InvalidPeriod {
            start,
            end,
            reason: reason.to_string(),
        };

        let start_time =
            hhmm_to_time(start).ok_or_else(|| invalid("start is not a valid time"))?;
        let end_time = hhmm_to_time(end).ok_or_else(|| invalid("end is not a valid time"))?;

        if start < DAY_START || end > DAY_END {
            return Err(invalid("outside of 08:30-17:30"));
        }

        let on_grid = |time: NaiveTime| time.minute() % INCREMENT_MINUTES == 0;
        if !on_grid(start_time) || !on_grid(end_time) {
            return Err(invalid("not on a half-hour boundary"));
        }

        if start_time >= end_time {
            return Err(invalid("start must be before end"));
        }

        Ok(Self {
            start: start_time,
            end: end_time,
        })
    }

    /// Returns true iff the two intervals share at least one instant.
    ///
    /// Touching periods such as 08:30-10:00 and 10:00-11:30 do not overlap.
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Start as HHMM, e.g. `830`.
    pub fn start_hhmm(&self) -> u32 {
        time_to_hhmm(self.start)
    }

    /// End as HHMM, e.g. `1000`.
    pub fn end_hhmm(&self) -> u32 {
        time_to_hhmm(self.end)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

fn hhmm_to_time(hhmm: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hhmm / 100, hhmm % 100, 0)
}

fn time_to_hhmm(time: NaiveTime) -> u32 {
    time.hour() * 100 + time.minute()
}
