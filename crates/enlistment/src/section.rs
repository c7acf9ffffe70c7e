//! Sections and the rules a section must satisfy before a student is enlisted.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{EnlistmentError, Result};
use crate::ids::{SectionId, SubjectCode};
use crate::room::Room;
use crate::schedule::Schedule;
use crate::subject::Subject;

/// An offering of a subject in a room at a schedule.
///
/// Rooms and subjects are shared between sections. The enrolled count is the
/// only mutable state and is updated atomically, so a `Section` can be shared
/// across threads behind an `Arc`.
#[derive(Debug)]
pub struct Section {
    id: SectionId,
    schedule: Schedule,
    room: Arc<Room>,
    subject: Arc<Subject>,
    enrolled: AtomicU32,
}

impl Section {
    /// Creates a section with no students enlisted.
    pub fn new(
        id: impl Into<String>,
        schedule: Schedule,
        room: Arc<Room>,
        subject: Arc<Subject>,
    ) -> Result<Self> {
        Ok(Self {
            id: SectionId::new(id)?,
            schedule,
            room,
            subject,
            enrolled: AtomicU32::new(0),
        })
    }

    /// Reserves a seat for one more student.
    ///
    /// The capacity check and the increment happen as one atomic step: either
    /// the seat is taken and the new count is returned, or the section is full
    /// and the count is left untouched.
    ///
    /// # Returns
    /// * `Ok(count)` - The enrolled count including the new student
    /// * `Err(CapacityReached)` - If every seat is already taken
    pub fn add_student(&self) -> Result<u32> {
        let capacity = self.room.capacity();
        match self
            .enrolled
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < capacity).then_some(count + 1)
            }) {
            Ok(previous) => {
                debug!("Section {} enrolled {}/{}", self.id, previous + 1, capacity);
                Ok(previous + 1)
            }
            Err(_) => {
                warn!("Section {} is full ({} seats)", self.id, capacity);
                Err(EnlistmentError::CapacityReached {
                    section: self.id.clone(),
                    capacity,
                })
            }
        }
    }

    /// Releases a seat, returning the new enrolled count. Saturates at zero.
    pub fn remove_student(&self) -> u32 {
        match self
            .enrolled
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            }) {
            Ok(previous) => previous - 1,
            Err(_) => 0,
        }
    }

    /// Fails with `CapacityReached` if more students are enrolled than the room holds.
    pub fn check_section_room_capacity(&self) -> Result<()> {
        let capacity = self.room.capacity();
        if self.enrolled() > capacity {
            return Err(EnlistmentError::CapacityReached {
                section: self.id.clone(),
                capacity,
            });
        }
        Ok(())
    }

    /// Fails with `ScheduleConflict` if the two sections meet at the same time.
    pub fn check_schedule_conflict(&self, other: &Section) -> Result<()> {
        if self.schedule.conflicts_with(&other.schedule) {
            debug!("Section {} conflicts with {}", self.id, other.id);
            return Err(EnlistmentError::ScheduleConflict {
                section: self.id.clone(),
                schedule: self.schedule,
                other: other.id.clone(),
                other_schedule: other.schedule,
            });
        }
        Ok(())
    }

    /// Fails with `SameSubject` if both sections are for the same subject code.
    pub fn check_for_duplicate_subjects(&self, other: &Section) -> Result<()> {
        if self.subject.code() == other.subject.code() {
            debug!(
                "Sections {} and {} share subject {}",
                self.id,
                other.id,
                self.subject.code()
            );
            return Err(EnlistmentError::SameSubject {
                section: self.id.clone(),
                other: other.id.clone(),
                subject: self.subject.code().clone(),
            });
        }
        Ok(())
    }

    /// Fails with `NotTakenPrerequisite` naming the first prerequisite (in code
    /// order) of this section's subject that is missing from `taken`.
    pub fn check_taken_prerequisite(&self, taken: &HashSet<SubjectCode>) -> Result<()> {
        match self
            .subject
            .first_missing_prerequisite(|prerequisite| taken.contains(prerequisite))
        {
            Some(missing) => {
                debug!(
                    "Section {} requires {} which has not been taken",
                    self.id, missing
                );
                Err(EnlistmentError::NotTakenPrerequisite {
                    section: self.id.clone(),
                    subject: self.subject.code().clone(),
                    prerequisite: missing,
                })
            }
            None => Ok(()),
        }
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn room(&self) -> &Arc<Room> {
        &self.room
    }

    pub fn subject(&self) -> &Arc<Subject> {
        &self.subject
    }

    pub fn enrolled(&self) -> u32 {
        self.enrolled.load(Ordering::Acquire)
    }

    pub fn capacity(&self) -> u32 {
        self.room.capacity()
    }

    pub fn available_seats(&self) -> u32 {
        self.capacity().saturating_sub(self.enrolled())
    }

    pub fn is_full(&self) -> bool {
        self.available_seats() == 0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} room {}",
            self.id,
            self.subject.code(),
            self.schedule,
            self.room.name()
        )
    }
}
