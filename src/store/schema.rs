use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::difficulty::Difficulty;
use crate::words::WordList;

pub const SCHEMA_VERSION: u32 = 1;

pub const POINTS_KEY: &str = "points.json";
pub const DIFFICULTY_KEY: &str = "difficulty.json";
pub const SAVED_FILES_KEY: &str = "saved_files.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFile {
    pub name: String,
    pub words: WordList,
    #[serde(alias = "date")]
    pub saved_at: DateTime<Utc>,
}

impl SavedFile {
    pub fn new(name: &str, words: WordList) -> Self {
        Self {
            name: name.to_string(),
            words,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointsData {
    pub schema_version: u32,
    pub points: u64,
}

impl Default for PointsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            points: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DifficultyData {
    pub schema_version: u32,
    pub difficulty: Difficulty,
}

impl Default for DifficultyData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            difficulty: Difficulty::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedFilesData {
    pub schema_version: u32,
    pub files: Vec<SavedFile>,
}

impl Default for SavedFilesData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            files: Vec::new(),
        }
    }
}

impl SavedFilesData {
    /// Insert or replace by name. A replaced entry moves to the end.
    pub fn upsert(&mut self, file: SavedFile) {
        self.files.retain(|f| f.name != file.name);
        self.files.push(file);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        self.files.len() != before
    }
}
