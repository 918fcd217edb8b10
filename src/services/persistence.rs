use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::models::{CollectionKind, Record, Theme};
use crate::utils::errors::PersistenceError;

const THEME_KEY: &str = "theme";

/// Everything that survives a restart: theme plus the three collections
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub theme: Theme,
    pub favorites: Vec<Record>,
    pub watched: Vec<Record>,
    pub watch_later: Vec<Record>,
}

impl PersistedState {
    pub fn collection(&self, kind: CollectionKind) -> &[Record] {
        match kind {
            CollectionKind::Favorites => &self.favorites,
            CollectionKind::Watched => &self.watched,
            CollectionKind::WatchLater => &self.watch_later,
        }
    }

    pub fn collection_mut(&mut self, kind: CollectionKind) -> &mut Vec<Record> {
        match kind {
            CollectionKind::Favorites => &mut self.favorites,
            CollectionKind::Watched => &mut self.watched,
            CollectionKind::WatchLater => &mut self.watch_later,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Malformed(e.to_string()))
    }

    /// Decode a stored document.
    ///
    /// A document that is not a JSON object is `Malformed`. Inside a valid
    /// document each key is decoded on its own; a bad or missing key falls
    /// back to its default without affecting the others.
    pub fn from_json(raw: &str) -> Result<Self, PersistenceError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| PersistenceError::Malformed(e.to_string()))?;
        let Value::Object(document) = value else {
            return Err(PersistenceError::Malformed(
                "expected a JSON object at the document root".to_string(),
            ));
        };

        let mut state = PersistedState {
            theme: decode_key(&document, THEME_KEY),
            ..PersistedState::default()
        };
        for kind in CollectionKind::ALL {
            *state.collection_mut(kind) = decode_key(&document, kind.storage_key());
        }
        Ok(state)
    }
}

fn decode_key<T: DeserializeOwned + Default>(document: &Map<String, Value>, key: &str) -> T {
    match document.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("Discarding malformed persisted key '{}': {}", key, e);
            T::default()
        }),
    }
}

/// Durable storage for `PersistedState`, injected into the collection store
pub trait PersistencePort: Send + Sync + fmt::Debug {
    /// `Ok(None)` when nothing has been stored yet
    fn try_load(&self) -> Result<Option<PersistedState>, PersistenceError>;

    /// Write the whole state as one unit
    fn save(&self, state: &PersistedState) -> Result<(), PersistenceError>;

    /// Load, recovering from absent or unreadable data with empty defaults
    fn load(&self) -> PersistedState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No persisted state found, starting with empty collections");
                PersistedState::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable persisted state: {}", e);
                PersistedState::default()
            }
        }
    }
}

/// JSON document on disk, replaced atomically on every save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistencePort for JsonFileStore {
    fn try_load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        debug!("Loading persisted state from {:?}", self.path);
        let raw = fs::read_to_string(&self.path)?;
        PersistedState::from_json(&raw).map(Some)
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target then rename, so readers never see a partial file
        let temp = self.temp_path();
        fs::write(&temp, state.to_json()?)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!("Failed to remove {:?}: {}", temp, cleanup);
            }
            return Err(e.into());
        }

        debug!("Persisted state saved to {:?}", self.path);
        Ok(())
    }
}

/// In-memory port for tests and sessions that should not touch disk.
///
/// Clones share the same storage. The stored form is the same JSON document
/// `JsonFileStore` writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Arc<Mutex<Option<String>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an arbitrary document, valid or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut blob) = store.blob.lock() {
            *blob = Some(raw.into());
        }
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|blob| blob.clone())
    }

    /// Make subsequent saves fail with `Unavailable`
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl PersistencePort for MemoryStore {
    fn try_load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        match self.raw() {
            Some(raw) => PersistedState::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "memory store is rejecting writes".to_string(),
            ));
        }
        let json = state.to_json()?;
        let mut blob = self
            .blob
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory store lock poisoned".to_string()))?;
        *blob = Some(json);
        Ok(())
    }
}
