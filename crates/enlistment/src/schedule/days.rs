//! Weekday patterns a section meets on.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EnlistmentError, Result};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The fixed set of meeting-day patterns.
///
/// Each pattern is a bitset over the week (bit 0 is Monday), so intersection
/// is a single AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(clippy::upper_case_acronyms)]
pub enum Days {
    /// Monday and Thursday
    MTH,
    /// Tuesday and Friday
    TF,
    /// Wednesday and Saturday
    WS,
    /// Monday, Wednesday and Friday
    MWF,
    /// Tuesday and Thursday
    TTH,
    /// Saturday only
    SAT,
}

impl Days {
    pub const ALL: [Days; 6] = [Days::MTH, Days::TF, Days::WS, Days::MWF, Days::TTH, Days::SAT];

    fn mask(self) -> u8 {
        match self {
            Days::MTH => 0b000_1001,
            Days::TF => 0b001_0010,
            Days::WS => 0b010_0100,
            Days::MWF => 0b001_0101,
            Days::TTH => 0b000_1010,
            Days::SAT => 0b010_0000,
        }
    }

    /// Returns true iff the two patterns share at least one calendar day.
    pub fn intersects(&self, other: &Days) -> bool {
        self.mask() & other.mask() != 0
    }

    /// The weekdays in this pattern, Monday first.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> {
        let mask = self.mask();
        WEEK.into_iter()
            .enumerate()
            .filter(move |(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, day)| day)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Days::MTH => "MTH",
            Days::TF => "TF",
            Days::WS => "WS",
            Days::MWF => "MWF",
            Days::TTH => "TTH",
            Days::SAT => "SAT",
        }
    }
}

impl FromStr for Days {
    type Err = EnlistmentError;

    /// Parses a pattern token, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        Days::ALL
            .into_iter()
            .find(|days| days.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| EnlistmentError::InvalidDays {
                token: s.to_string(),
            })
    }
}

impl TryFrom<String> for Days {
    type Error = EnlistmentError;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<Days> for String {
    fn from(days: Days) -> Self {
        days.token().to_string()
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
