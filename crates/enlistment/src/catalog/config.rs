/// Configuration for the rooms, subjects and sections offered in a term
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Top-level catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
    #[serde(default)]
    pub subjects: Vec<SubjectConfig>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

/// A room and its seating capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    pub capacity: u32,
}

/// A subject; prerequisites are subject codes and may appear anywhere in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectConfig {
    pub code: String,
    pub units: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// A section, referring to its subject and room by code/name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub subject: String,
    pub room: String,
    /// e.g. "MTH 0830-1000"
    pub schedule: String,
}

impl CatalogConfig {
    /// Parses a catalog from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a catalog from a single JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Loads and merges every `.json` file in a directory
    ///
    /// Files are read in file-name order so the merged catalog is deterministic.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding catalog fragments
    ///
    /// # Returns
    /// * `Ok(CatalogConfig)` - The merged catalog
    /// * `Err(Config)` - If the directory can't be read or a file can't be parsed
    pub fn load_from_directory(config_dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(config_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut merged = Self::default();
        for path in paths {
            merged.merge(Self::load_from_file(&path)?);
        }

        Ok(merged)
    }

    /// Appends another catalog's entries to this one
    pub fn merge(&mut self, other: CatalogConfig) {
        self.rooms.extend(other.rooms);
        self.subjects.extend(other.subjects);
        self.sections.extend(other.sections);
    }
}
