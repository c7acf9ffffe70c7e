//! A student's enlistment: the subjects already taken and the sections held.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{EnlistmentError, Result};
use crate::ids::{SectionId, StudentNumber, SubjectCode};
use crate::section::Section;

/// One student's set of enlisted sections.
///
/// Every enlisted pair of sections is for different subjects and has
/// non-conflicting schedules.
#[derive(Debug)]
pub struct Student {
    number: StudentNumber,
    taken: HashSet<SubjectCode>,
    sections: Vec<Arc<Section>>,
}

impl Student {
    pub fn new(number: u32) -> Self {
        Self {
            number: StudentNumber::new(number),
            taken: HashSet::new(),
            sections: Vec::new(),
        }
    }

    /// Creates a student who has already passed the given subjects.
    pub fn with_taken_subjects(
        number: u32,
        taken: impl IntoIterator<Item = SubjectCode>,
    ) -> Self {
        Self {
            number: StudentNumber::new(number),
            taken: taken.into_iter().collect(),
            sections: Vec::new(),
        }
    }

    /// Enlists the student in a section.
    ///
    /// Checks run in this order, and the first failure is returned:
    /// 1. duplicate subject against every enlisted section
    /// 2. prerequisites against the taken subjects
    /// 3. schedule conflict against every enlisted section
    /// 4. seat reservation in the section
    ///
    /// On failure neither the student nor the section is changed.
    pub fn enlist(&mut self, section: Arc<Section>) -> Result<()> {
        if let Err(err) = self.validate(&section) {
            warn!(
                "Student {} cannot enlist in {}: {}",
                self.number,
                section.id(),
                err
            );
            return Err(err);
        }

        let enrolled = section.add_student()?;
        info!(
            "Student {} enlisted in {} ({}/{})",
            self.number,
            section.id(),
            enrolled,
            section.capacity()
        );
        self.sections.push(section);
        Ok(())
    }

    fn validate(&self, section: &Section) -> Result<()> {
        for enlisted in &self.sections {
            section.check_for_duplicate_subjects(enlisted)?;
        }
        section.check_taken_prerequisite(&self.taken)?;
        for enlisted in &self.sections {
            section.check_schedule_conflict(enlisted)?;
        }
        Ok(())
    }

    /// Drops an enlisted section and releases its seat.
    pub fn cancel(&mut self, id: &SectionId) -> Result<()> {
        let index = self
            .sections
            .iter()
            .position(|section| section.id() == id)
            .ok_or_else(|| EnlistmentError::NotEnlisted { id: id.clone() })?;

        let section = self.sections.remove(index);
        let enrolled = section.remove_student();
        info!(
            "Student {} cancelled {} ({}/{})",
            self.number,
            section.id(),
            enrolled,
            section.capacity()
        );
        Ok(())
    }

    /// Records a passed subject so it counts toward prerequisites.
    pub fn record_taken(&mut self, code: SubjectCode) -> bool {
        self.taken.insert(code)
    }

    pub fn has_taken(&self, code: &SubjectCode) -> bool {
        self.taken.contains(code)
    }

    pub fn number(&self) -> StudentNumber {
        self.number
    }

    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    pub fn is_enlisted_in(&self, id: &SectionId) -> bool {
        self.sections.iter().any(|section| section.id() == id)
    }

    /// Sum of units across enlisted sections.
    pub fn total_units(&self) -> u32 {
        self.sections
            .iter()
            .map(|section| section.subject().units())
            .sum()
    }
}
