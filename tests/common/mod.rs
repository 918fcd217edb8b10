pub mod builders;
pub mod mocks;

use cinetech::{CollectionStore, JsonFileStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary state directory for a collection store that outlives restarts
pub struct TestContext {
    _temp_dir: TempDir,
    state_file: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state_file = temp_dir.path().join("cinetech").join("state.json");
        Self {
            _temp_dir: temp_dir,
            state_file,
        }
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Open a fresh store over the same file, as a new session would
    pub fn open_store(&self) -> CollectionStore {
        CollectionStore::open(JsonFileStore::new(&self.state_file))
    }
}
