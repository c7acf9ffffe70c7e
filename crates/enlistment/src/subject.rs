//! Subjects and the registry that owns them.
//!
//! Prerequisites are stored as subject codes rather than references, so a
//! cyclic prerequisite graph cannot create an ownership cycle.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{EnlistmentError, Result};
use crate::ids::SubjectCode;

/// A course with its credit units and prerequisite subjects.
///
/// Two subjects are equal when their codes are equal. The prerequisite set
/// stays editable while the subject is shared, and every holder of the `Arc`
/// sees the edit.
#[derive(Debug, Serialize)]
pub struct Subject {
    code: SubjectCode,
    units: u32,
    prerequisites: RwLock<BTreeSet<SubjectCode>>,
}

impl Subject {
    /// Creates a subject with no prerequisites.
    pub fn new(code: impl Into<String>, units: u32) -> Result<Self> {
        let code = SubjectCode::new(code)?;
        if units == 0 {
            return Err(EnlistmentError::InvalidSubject {
                code: code.to_string(),
                reason: "units must be positive".to_string(),
            });
        }

        Ok(Self {
            code,
            units,
            prerequisites: RwLock::new(BTreeSet::new()),
        })
    }

    /// Adds a prerequisite. Adding the same subject twice is a no-op.
    ///
    /// # Returns
    /// * `Ok(true)` - If the prerequisite was newly added
    /// * `Ok(false)` - If it was already present
    /// * `Err(InvalidSubject)` - If a subject is made its own prerequisite
    pub fn add_prerequisite(&self, prerequisite: &Subject) -> Result<bool> {
        self.add_prerequisite_code(prerequisite.code.clone())
    }

    fn add_prerequisite_code(&self, prerequisite: SubjectCode) -> Result<bool> {
        if prerequisite == self.code {
            return Err(EnlistmentError::InvalidSubject {
                code: self.code.to_string(),
                reason: "a subject cannot be its own prerequisite".to_string(),
            });
        }
        let mut prerequisites = self
            .prerequisites
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(prerequisites.insert(prerequisite))
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.read_prerequisites().is_empty()
    }

    /// Prerequisite codes in ascending order, as of this call.
    pub fn prerequisites(&self) -> Vec<SubjectCode> {
        self.read_prerequisites().iter().cloned().collect()
    }

    /// The first prerequisite, in code order, for which `is_taken` is false.
    pub fn first_missing_prerequisite(
        &self,
        mut is_taken: impl FnMut(&SubjectCode) -> bool,
    ) -> Option<SubjectCode> {
        self.read_prerequisites()
            .iter()
            .find(|&code| !is_taken(code))
            .cloned()
    }

    pub fn requires(&self, code: &SubjectCode) -> bool {
        self.read_prerequisites().contains(code)
    }

    pub fn code(&self) -> &SubjectCode {
        &self.code
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    fn read_prerequisites(&self) -> std::sync::RwLockReadGuard<'_, BTreeSet<SubjectCode>> {
        self.prerequisites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Subject {}

impl Hash for Subject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

/// Arena of subjects keyed by code.
///
/// Prerequisite edits go through the registry so both ends of the relation
/// are known to exist. Sections hold the same `Arc` the registry does, taken
/// via [`SubjectRegistry::share`].
#[derive(Debug, Default)]
pub struct SubjectRegistry {
    subjects: HashMap<SubjectCode, Arc<Subject>>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subject. Its prerequisites must already be registered.
    pub fn insert(&mut self, subject: Subject) -> Result<Arc<Subject>> {
        if self.subjects.contains_key(&subject.code) {
            return Err(EnlistmentError::DuplicateSubject {
                code: subject.code.clone(),
            });
        }
        if let Some(missing) =
            subject.first_missing_prerequisite(|code| self.subjects.contains_key(code))
        {
            return Err(EnlistmentError::UnknownSubject { code: missing });
        }

        let subject = Arc::new(subject);
        self.subjects.insert(subject.code.clone(), subject.clone());
        Ok(subject)
    }

    pub fn get(&self, code: &SubjectCode) -> Option<&Subject> {
        self.subjects.get(code).map(Arc::as_ref)
    }

    /// Makes `prerequisite` a prerequisite of `subject`; both must be registered.
    ///
    /// Sections already holding the subject see the new prerequisite.
    pub fn add_prerequisite(
        &self,
        subject: &SubjectCode,
        prerequisite: &SubjectCode,
    ) -> Result<bool> {
        if !self.subjects.contains_key(prerequisite) {
            return Err(EnlistmentError::UnknownSubject {
                code: prerequisite.clone(),
            });
        }
        let entry = self
            .subjects
            .get(subject)
            .ok_or_else(|| EnlistmentError::UnknownSubject {
                code: subject.clone(),
            })?;
        entry.add_prerequisite_code(prerequisite.clone())
    }

    /// Returns the registered subject for use by sections.
    pub fn share(&self, code: &SubjectCode) -> Result<Arc<Subject>> {
        self.subjects
            .get(code)
            .cloned()
            .ok_or_else(|| EnlistmentError::UnknownSubject { code: code.clone() })
    }

    /// Every subject reachable through the prerequisite relation, excluding
    /// `code` itself. Terminates on cyclic graphs.
    pub fn transitive_prerequisites(&self, code: &SubjectCode) -> Result<BTreeSet<SubjectCode>> {
        let root = self
            .subjects
            .get(code)
            .ok_or_else(|| EnlistmentError::UnknownSubject { code: code.clone() })?;

        let mut seen = BTreeSet::new();
        let mut pending = root.prerequisites();
        while let Some(next) = pending.pop() {
            if &next == code || seen.contains(&next) {
                continue;
            }
            if let Some(subject) = self.subjects.get(&next) {
                pending.extend(subject.prerequisites());
            }
            seen.insert(next);
        }

        Ok(seen)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values().map(Arc::as_ref)
    }
}
