//! The rooms, subjects and sections offered in a term.

mod config;

pub use config::{CatalogConfig, RoomConfig, SectionConfig, SubjectConfig};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{EnlistmentError, Result};
use crate::ids::{RoomName, SectionId, SubjectCode};
use crate::room::Room;
use crate::schedule::Schedule;
use crate::section::Section;
use crate::subject::{Subject, SubjectRegistry};

/// Catalog of offerings.
///
/// Rooms and subjects are fixed once built. Sections live in a DashMap so
/// they can be looked up and enlisted into from many threads without
/// external locking.
#[derive(Debug)]
pub struct Catalog {
    rooms: HashMap<RoomName, Arc<Room>>,
    subjects: SubjectRegistry,
    sections: DashMap<SectionId, Arc<Section>>,
}

impl Catalog {
    /// Creates a catalog from already-built rooms and subjects, with no sections.
    pub fn new(rooms: impl IntoIterator<Item = Room>, subjects: SubjectRegistry) -> Self {
        Self {
            rooms: rooms
                .into_iter()
                .map(|room| (room.name().clone(), Arc::new(room)))
                .collect(),
            subjects,
            sections: DashMap::new(),
        }
    }

    /// Validates a configuration and builds the catalog from it.
    ///
    /// Every value goes through its constructor, so malformed periods, days,
    /// rooms or identifiers are reported with the same errors as direct
    /// construction. Prerequisites may refer to subjects listed later.
    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        let mut rooms = HashMap::new();
        for room in config.rooms {
            let room = Room::new(room.name, room.capacity)?;
            if rooms.contains_key(room.name()) {
                return Err(EnlistmentError::InvalidRoom {
                    name: room.name().to_string(),
                    reason: "duplicate room name".to_string(),
                });
            }
            rooms.insert(room.name().clone(), Arc::new(room));
        }

        let mut subjects = SubjectRegistry::new();
        for subject in &config.subjects {
            subjects.insert(Subject::new(subject.code.clone(), subject.units)?)?;
        }
        for subject in &config.subjects {
            let code = SubjectCode::new(subject.code.clone())?;
            for prerequisite in &subject.prerequisites {
                subjects.add_prerequisite(&code, &SubjectCode::new(prerequisite.clone())?)?;
            }
        }

        let catalog = Self {
            rooms,
            subjects,
            sections: DashMap::new(),
        };

        for section in config.sections {
            let schedule: Schedule = section.schedule.parse()?;
            let room = catalog.room(&RoomName::new(section.room)?)?;
            let subject = catalog.subjects.share(&SubjectCode::new(section.subject)?)?;
            catalog.insert_section(Section::new(section.id, schedule, room, subject)?)?;
        }

        info!(
            "Loaded catalog with {} rooms, {} subjects, {} sections",
            catalog.rooms.len(),
            catalog.subjects.len(),
            catalog.sections.len()
        );

        Ok(catalog)
    }

    /// Parses and builds a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_config(CatalogConfig::from_json_str(json)?)
    }

    /// Looks up a room by name.
    pub fn room(&self, name: &RoomName) -> Result<Arc<Room>> {
        self.rooms
            .get(name)
            .cloned()
            .ok_or_else(|| EnlistmentError::UnknownRoom { name: name.clone() })
    }

    pub fn subjects(&self) -> &SubjectRegistry {
        &self.subjects
    }

    /// Adds a section, rejecting an id that is already in use.
    pub fn insert_section(&self, section: Section) -> Result<Arc<Section>> {
        match self.sections.entry(section.id().clone()) {
            Entry::Occupied(entry) => Err(EnlistmentError::DuplicateSection {
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!("Registered section {}", section);
                let section = Arc::new(section);
                entry.insert(section.clone());
                Ok(section)
            }
        }
    }

    /// Gets a section by id.
    pub fn section(&self, id: &SectionId) -> Option<Arc<Section>> {
        self.sections.get(id).map(|entry| entry.value().clone())
    }

    /// Removes a section. Students already holding it keep their `Arc`.
    pub fn remove_section(&self, id: &SectionId) -> Option<Arc<Section>> {
        self.sections.remove(id).map(|(_, section)| section)
    }

    /// All sections offering the given subject, sorted by section id.
    pub fn sections_for_subject(&self, code: &SubjectCode) -> Vec<Arc<Section>> {
        let mut sections: Vec<Arc<Section>> = self
            .sections
            .iter()
            .filter(|entry| entry.subject().code() == code)
            .map(|entry| entry.value().clone())
            .collect();
        sections.sort_by(|a, b| a.id().cmp(b.id()));
        sections
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Gets seat statistics across all sections.
    pub fn stats(&self) -> CatalogStats {
        let mut total = 0;
        let mut full = 0;
        let mut open_seats = 0;

        for entry in self.sections.iter() {
            total += 1;
            if entry.is_full() {
                full += 1;
            }
            open_seats += u64::from(entry.available_seats());
        }

        CatalogStats {
            total_sections: total,
            full_sections: full,
            open_seats,
        }
    }
}

/// Catalog statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_sections: usize,
    pub full_sections: usize,
    pub open_seats: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Days, Period};
    use crate::student::Student;
    use std::collections::HashSet;
    use std::thread;

    const CATALOG_JSON: &str = r#"{
        "rooms": [
            {"name": "101", "capacity": 30},
            {"name": "102", "capacity": 2}
        ],
        "subjects": [
            {"code": "MAT102", "units": 3, "prerequisites": ["MAT101"]},
            {"code": "MAT101", "units": 3}
        ],
        "sections": [
            {"id": "SEC101", "subject": "MAT101", "room": "101", "schedule": "MTH 0830-1000"},
            {"id": "SEC102", "subject": "MAT102", "room": "102", "schedule": "MTH 0930-1100"},
            {"id": "SEC103", "subject": "MAT101", "room": "102", "schedule": "TF 1300-1430"}
        ]
    }"#;

    fn id(s: &str) -> SectionId {
        SectionId::new(s).unwrap()
    }

    fn code(s: &str) -> SubjectCode {
        SubjectCode::new(s).unwrap()
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.subjects().len(), 2);

        let section = catalog.section(&id("SEC102")).unwrap();
        assert_eq!(section.capacity(), 2);
        assert!(section.subject().has_prerequisites());
        assert_eq!(section.schedule().days(), Days::MTH);

        let first = catalog.section(&id("SEC101")).unwrap();
        assert!(first.check_schedule_conflict(&section).is_err());
    }

    #[test]
    fn test_new_from_parts() {
        let mut subjects = SubjectRegistry::new();
        subjects.insert(Subject::new("MAT101", 3).unwrap()).unwrap();
        let catalog = Catalog::new([Room::new("101", 30).unwrap()], subjects);
        assert!(catalog.is_empty());

        let room = catalog.room(&RoomName::new("101").unwrap()).unwrap();
        let subject = catalog.subjects().share(&code("MAT101")).unwrap();
        let schedule: Schedule = "MTH 0830-1000".parse().unwrap();
        catalog
            .insert_section(Section::new("SEC101", schedule, room, subject).unwrap())
            .unwrap();
        assert_eq!(catalog.len(), 1);

        assert!(matches!(
            catalog.room(&RoomName::new("999").unwrap()),
            Err(EnlistmentError::UnknownRoom { .. })
        ));
    }

    #[test]
    fn test_sections_for_subject() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let ids: Vec<String> = catalog
            .sections_for_subject(&code("MAT101"))
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, vec!["SEC101", "SEC103"]);
    }

    #[test]
    fn test_unknown_references() {
        let unknown_room = r#"{
            "subjects": [{"code": "MAT101", "units": 3}],
            "sections": [
                {"id": "S1", "subject": "MAT101", "room": "999", "schedule": "MTH 0830-1000"}
            ]
        }"#;
        assert!(matches!(
            Catalog::from_json_str(unknown_room),
            Err(EnlistmentError::UnknownRoom { .. })
        ));

        let unknown_prerequisite = r#"{
            "subjects": [{"code": "MAT102", "units": 3, "prerequisites": ["MAT101"]}]
        }"#;
        assert!(matches!(
            Catalog::from_json_str(unknown_prerequisite),
            Err(EnlistmentError::UnknownSubject { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_days = r#"{
            "rooms": [{"name": "101", "capacity": 30}],
            "subjects": [{"code": "MAT101", "units": 3}],
            "sections": [
                {"id": "S1", "subject": "MAT101", "room": "101", "schedule": "XY 0830-1000"}
            ]
        }"#;
        assert!(matches!(
            Catalog::from_json_str(bad_days),
            Err(EnlistmentError::InvalidDays { .. })
        ));

        let bad_room = r#"{"rooms": [{"name": "101", "capacity": 0}]}"#;
        assert!(matches!(
            Catalog::from_json_str(bad_room),
            Err(EnlistmentError::InvalidRoom { .. })
        ));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let schedule = Schedule::new(Days::WS, Period::new(1300, 1430).unwrap());
        let room = catalog.room(&RoomName::new("101").unwrap()).unwrap();
        let subject = catalog.subjects().share(&code("MAT101")).unwrap();

        let duplicate = Section::new("SEC101", schedule, room.clone(), subject.clone()).unwrap();
        assert!(matches!(
            catalog.insert_section(duplicate),
            Err(EnlistmentError::DuplicateSection { .. })
        ));

        let fresh = Section::new("SEC104", schedule, room, subject).unwrap();
        catalog.insert_section(fresh).unwrap();
        assert_eq!(catalog.len(), 4);

        assert!(catalog.remove_section(&id("SEC104")).is_some());
        assert!(catalog.section(&id("SEC104")).is_none());
    }

    #[test]
    fn test_stats() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let section = catalog.section(&id("SEC103")).unwrap();
        section.add_student().unwrap();
        section.add_student().unwrap();

        let stats = catalog.stats();
        assert_eq!(stats.total_sections, 3);
        assert_eq!(stats.full_sections, 1);
        assert_eq!(stats.open_seats, 30 + 2);
    }

    #[test]
    fn test_prerequisite_added_after_load_applies_to_sections() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let section = catalog.section(&id("SEC101")).unwrap();
        let taken = HashSet::new();
        section.check_taken_prerequisite(&taken).unwrap();

        catalog
            .subjects()
            .add_prerequisite(&code("MAT101"), &code("MAT102"))
            .unwrap();

        assert!(Arc::ptr_eq(
            section.subject(),
            &catalog.subjects().share(&code("MAT101")).unwrap()
        ));
        assert!(matches!(
            section.check_taken_prerequisite(&taken),
            Err(EnlistmentError::NotTakenPrerequisite { ref prerequisite, .. })
                if prerequisite.as_str() == "MAT102"
        ));

        let mut student = Student::new(1);
        assert!(student.enlist(section.clone()).is_err());
        assert_eq!(section.enrolled(), 0);
    }

    #[test]
    fn test_concurrent_students_share_seats() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();

        let enlisted: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..10u32)
                .map(|number| {
                    let catalog = &catalog;
                    scope.spawn(move || {
                        let mut student = Student::new(number);
                        let section = catalog.section(&id("SEC103")).unwrap();
                        student.enlist(section).is_ok() as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(enlisted, 2);
        assert_eq!(catalog.section(&id("SEC103")).unwrap().enrolled(), 2);
    }
}
