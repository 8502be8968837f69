pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::engine::difficulty::Difficulty;
use crate::store::schema::{SavedFile, SavedFilesData};

/// Device-local storage for progress and saved word lists.
///
/// Reads never fail: missing or unreadable data comes back as the default.
/// Writes report errors so the caller can fall back to memory-only play.
pub trait Persistence {
    fn points(&self) -> u64;
    fn set_points(&mut self, points: u64) -> Result<()>;

    fn difficulty(&self) -> Difficulty;
    fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()>;

    fn saved_files(&self) -> Vec<SavedFile>;
    /// Insert or replace the saved list with the same name.
    fn save_file(&mut self, file: SavedFile) -> Result<()>;
    fn delete_file(&mut self, name: &str) -> Result<()>;

    fn load_file(&self, name: &str) -> Option<SavedFile> {
        self.saved_files().into_iter().find(|f| f.name == name)
    }
}

/// Keeps everything in memory. Used when the data directory is unusable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    points: u64,
    difficulty: Difficulty,
    files: SavedFilesData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryStore {
    fn points(&self) -> u64 {
        self.points
    }

    fn set_points(&mut self, points: u64) -> Result<()> {
        self.points = points;
        Ok(())
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.difficulty = difficulty;
        Ok(())
    }

    fn saved_files(&self) -> Vec<SavedFile> {
        self.files.files.clone()
    }

    fn save_file(&mut self, file: SavedFile) -> Result<()> {
        self.files.upsert(file);
        Ok(())
    }

    fn delete_file(&mut self, name: &str) -> Result<()> {
        self.files.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordPair;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.set_points(70).unwrap();
        store.set_difficulty(Difficulty::Hard).unwrap();
        let words = vec![WordPair::new("b", "2"), WordPair::new("a", "1")];
        store.save_file(SavedFile::new("list.txt", words.clone())).unwrap();

        assert_eq!(store.points(), 70);
        assert_eq!(store.difficulty(), Difficulty::Hard);
        assert_eq!(store.load_file("list.txt").unwrap().words, words);

        store.delete_file("list.txt").unwrap();
        assert!(store.load_file("list.txt").is_none());
    }
}
