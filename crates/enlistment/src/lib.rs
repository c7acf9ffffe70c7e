//! Enlistment rules for university course sections.
//!
//! Value types ([`Period`], [`Days`], [`Schedule`], [`Room`], [`Subject`])
//! are validated at construction. A [`Section`] combines them and answers the
//! questions asked before a student is enlisted:
//!
//! - [`Section::check_for_duplicate_subjects`]
//! - [`Section::check_taken_prerequisite`]
//! - [`Section::check_schedule_conflict`]
//! - [`Section::check_section_room_capacity`] / [`Section::add_student`]
//!
//! [`Student::enlist`] applies them in that order against every section a
//! student already holds.

pub mod catalog;
pub mod error;
pub mod ids;
pub mod room;
pub mod schedule;
pub mod section;
pub mod student;
pub mod subject;

pub use catalog::{Catalog, CatalogConfig, CatalogStats};
pub use error::{EnlistmentError, Result};
pub use ids::{RoomName, SectionId, StudentNumber, SubjectCode};
pub use room::Room;
pub use schedule::{Days, Period, Schedule};
pub use section::Section;
pub use student::Student;
pub use subject::{Subject, SubjectRegistry};
