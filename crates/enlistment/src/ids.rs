//! Validated identifiers for sections, subjects, rooms and students.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::{EnlistmentError, Result};

static ALPHANUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

fn validate(kind: &'static str, value: String) -> Result<String> {
    if ALPHANUMERIC_REGEX.is_match(&value) {
        Ok(value)
    } else {
        Err(EnlistmentError::InvalidIdentifier { kind, value })
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, rejecting empty or non-alphanumeric values.
            pub fn new(id: impl Into<String>) -> Result<Self> {
                validate($kind, id.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = EnlistmentError;

            fn try_from(id: String) -> Result<Self> {
                Self::new(id)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = EnlistmentError;

            fn try_from(id: &str) -> Result<Self> {
                Self::new(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// A section identifier such as "SEC101".
    SectionId,
    "section"
);

string_id!(
    /// A subject code such as "MAT101". Subjects are equal when their codes are equal.
    SubjectCode,
    "subject"
);

string_id!(
    /// A room name such as "101".
    RoomName,
    "room"
);

/// A student number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentNumber(u32);

impl StudentNumber {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StudentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StudentNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}
