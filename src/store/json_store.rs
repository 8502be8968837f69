use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};

use crate::engine::difficulty::Difficulty;
use crate::store::Persistence;
use crate::store::schema::{
    DIFFICULTY_KEY, DifficultyData, POINTS_KEY, PointsData, SAVED_FILES_KEY, SavedFile,
    SavedFilesData,
};

/// One pretty-printed JSON document per storage key under `base_dir`.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(default_data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("cannot create data dir {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable {}: {e}", path.display());
                T::default()
            }),
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                T::default()
            }
        }
    }

    /// Write through a `.tmp` sibling and rename, so a crash never leaves a
    /// half-written document behind.
    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("cannot write {}", tmp_path.display()))?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn load_saved_files(&self) -> SavedFilesData {
        self.load(SAVED_FILES_KEY)
    }
}

impl Persistence for JsonStore {
    fn points(&self) -> u64 {
        self.load::<PointsData>(POINTS_KEY).points
    }

    fn set_points(&mut self, points: u64) -> Result<()> {
        self.save(
            POINTS_KEY,
            &PointsData {
                points,
                ..PointsData::default()
            },
        )
    }

    fn difficulty(&self) -> Difficulty {
        self.load::<DifficultyData>(DIFFICULTY_KEY).difficulty
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.save(
            DIFFICULTY_KEY,
            &DifficultyData {
                difficulty,
                ..DifficultyData::default()
            },
        )
    }

    fn saved_files(&self) -> Vec<SavedFile> {
        self.load_saved_files().files
    }

    fn save_file(&mut self, file: SavedFile) -> Result<()> {
        let mut data = self.load_saved_files();
        data.upsert(file);
        self.save(SAVED_FILES_KEY, &data)
    }

    fn delete_file(&mut self, name: &str) -> Result<()> {
        let mut data = self.load_saved_files();
        if data.remove(name) {
            self.save(SAVED_FILES_KEY, &data)?;
        }
        Ok(())
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordquiz")
}
