//! Error types for the enlistment rules.

use thiserror::Error;

use crate::ids::{RoomName, SectionId, SubjectCode};
use crate::schedule::Schedule;

/// Errors that can occur while building enlistment data or validating sections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnlistmentError {
    /// Period bounds are malformed or outside the school day
    #[error("Invalid period {start:04}-{end:04}: {reason}")]
    InvalidPeriod { start: u32, end: u32, reason: String },

    /// Unrecognized day pattern token
    #[error("Invalid days pattern: {token:?}")]
    InvalidDays { token: String },

    /// Schedule text is not of the form "MTH 0830-1000"
    #[error("Invalid schedule: {value:?}")]
    InvalidSchedule { value: String },

    /// Room name or capacity is invalid
    #[error("Invalid room {name:?}: {reason}")]
    InvalidRoom { name: String, reason: String },

    /// Subject units or prerequisite edit is invalid
    #[error("Invalid subject {code}: {reason}")]
    InvalidSubject { code: String, reason: String },

    /// Identifier is empty or not alphanumeric
    #[error("Invalid {kind} identifier: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// Section is already at room capacity
    #[error("Section {section} has reached its room capacity of {capacity}")]
    CapacityReached { section: SectionId, capacity: u32 },

    /// Two sections meet at overlapping times on a shared day
    #[error("Section {section} ({schedule}) conflicts with section {other} ({other_schedule})")]
    ScheduleConflict {
        section: SectionId,
        schedule: Schedule,
        other: SectionId,
        other_schedule: Schedule,
    },

    /// Two sections offer the same subject
    #[error("Sections {section} and {other} are both for subject {subject}")]
    SameSubject {
        section: SectionId,
        other: SectionId,
        subject: SubjectCode,
    },

    /// A prerequisite of the section's subject has not been taken
    #[error("Section {section}: prerequisite {prerequisite} of {subject} has not been taken")]
    NotTakenPrerequisite {
        section: SectionId,
        subject: SubjectCode,
        prerequisite: SubjectCode,
    },

    /// Subject code is not registered
    #[error("Unknown subject: {code}")]
    UnknownSubject { code: SubjectCode },

    /// Subject code is already registered
    #[error("Duplicate subject: {code}")]
    DuplicateSubject { code: SubjectCode },

    /// Room name is not registered
    #[error("Unknown room: {name}")]
    UnknownRoom { name: RoomName },

    /// Section id is already registered
    #[error("Duplicate section: {id}")]
    DuplicateSection { id: SectionId },

    /// Student is not enlisted in the section
    #[error("Not enlisted in section {id}")]
    NotEnlisted { id: SectionId },

    /// Catalog configuration could not be read or parsed
    #[error("Config error: {message}")]
    Config { message: String },
}

impl EnlistmentError {
    /// Returns true if this error is a failed enlistment rule rather than bad input.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            EnlistmentError::CapacityReached { .. }
                | EnlistmentError::ScheduleConflict { .. }
                | EnlistmentError::SameSubject { .. }
                | EnlistmentError::NotTakenPrerequisite { .. }
        )
    }

    /// Returns true if this error came from constructing a malformed value.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EnlistmentError::InvalidPeriod { .. }
                | EnlistmentError::InvalidDays { .. }
                | EnlistmentError::InvalidSchedule { .. }
                | EnlistmentError::InvalidRoom { .. }
                | EnlistmentError::InvalidSubject { .. }
                | EnlistmentError::InvalidIdentifier { .. }
        )
    }
}

impl From<serde_json::Error> for EnlistmentError {
    fn from(err: serde_json::Error) -> Self {
        EnlistmentError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EnlistmentError {
    fn from(err: std::io::Error) -> Self {
        EnlistmentError::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnlistmentError>;
