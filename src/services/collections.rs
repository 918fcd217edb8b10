//! Favorites, watched and watch-later lists with write-through persistence.

use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use super::persistence::{PersistedState, PersistencePort};
use crate::core::filters::Membership;
use crate::models::{CollectionKind, MembershipFlags, Record, RecordId, Theme};
use crate::utils::errors::PersistenceError;

/// One named collection: records in insertion order plus an id index
#[derive(Debug, Clone, Default)]
struct Collection {
    records: Vec<Record>,
    ids: HashSet<RecordId>,
}

impl Collection {
    fn from_records(records: Vec<Record>, kind: CollectionKind) -> Self {
        let mut collection = Self::default();
        for record in records {
            if !collection.insert(record.clone()) {
                warn!("Dropping duplicate record {} from stored {}", record.id, kind.storage_key());
            }
        }
        collection
    }

    fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    fn insert(&mut self, record: Record) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    fn remove(&mut self, id: RecordId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.records.retain(|r| r.id != id);
        true
    }

    fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
    }
}

/// The user's favorites, watched and watch-later lists plus theme preference.
///
/// Collections are keyed by `RecordId` only, so a movie and a series sharing
/// a numeric id are treated as the same entry. Every mutation writes the whole
/// state through the persistence port.
#[derive(Debug)]
pub struct CollectionStore {
    port: Box<dyn PersistencePort>,
    theme: Theme,
    favorites: Collection,
    watched: Collection,
    watch_later: Collection,
    dirty: bool,
}

impl CollectionStore {
    /// Load persisted state; absent or malformed data yields empty collections
    pub fn open(port: impl PersistencePort + 'static) -> Self {
        let state = port.load();
        info!(
            "Collections loaded: {} favorites, {} watched, {} watch later",
            state.favorites.len(),
            state.watched.len(),
            state.watch_later.len()
        );

        Self {
            port: Box::new(port),
            theme: state.theme,
            favorites: Collection::from_records(state.favorites, CollectionKind::Favorites),
            watched: Collection::from_records(state.watched, CollectionKind::Watched),
            watch_later: Collection::from_records(state.watch_later, CollectionKind::WatchLater),
            dirty: false,
        }
    }

    fn collection(&self, kind: CollectionKind) -> &Collection {
        match kind {
            CollectionKind::Favorites => &self.favorites,
            CollectionKind::Watched => &self.watched,
            CollectionKind::WatchLater => &self.watch_later,
        }
    }

    fn collection_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        match kind {
            CollectionKind::Favorites => &mut self.favorites,
            CollectionKind::Watched => &mut self.watched,
            CollectionKind::WatchLater => &mut self.watch_later,
        }
    }

    /// Add the record if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, kind: CollectionKind, record: &Record) -> bool {
        let collection = self.collection_mut(kind);
        let member = if collection.contains(record.id) {
            collection.remove(record.id);
            false
        } else {
            collection.insert(record.clone());
            true
        };

        debug!(
            "Toggled {} \"{}\" in {}: now {}",
            record.id,
            record.title,
            kind.storage_key(),
            if member { "member" } else { "absent" }
        );
        self.persist();
        member
    }

    pub fn is_member(&self, kind: CollectionKind, id: RecordId) -> bool {
        self.collection(kind).contains(id)
    }

    pub fn membership(&self, id: RecordId) -> MembershipFlags {
        MembershipFlags {
            favorite: self.favorites.contains(id),
            watched: self.watched.contains(id),
            watch_later: self.watch_later.contains(id),
        }
    }

    /// Stored payloads in insertion order, renderable without a fetch
    pub fn records(&self, kind: CollectionKind) -> &[Record] {
        &self.collection(kind).records
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        self.collection(kind).records.len()
    }

    pub fn is_empty(&self, kind: CollectionKind) -> bool {
        self.collection(kind).records.is_empty()
    }

    pub fn clear(&mut self, kind: CollectionKind) {
        if self.is_empty(kind) {
            return;
        }
        info!("Clearing {}", kind.storage_key());
        self.collection_mut(kind).clear();
        self.persist();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        self.persist();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            theme: self.theme,
            favorites: self.favorites.records.clone(),
            watched: self.watched.records.clone(),
            watch_later: self.watch_later.records.clone(),
        }
    }

    /// True when the last write failed and in-memory state is ahead of storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retry a failed write. Call before shutdown when `is_dirty()`.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.dirty {
            return Ok(());
        }
        self.port.save(&self.snapshot())?;
        self.dirty = false;
        info!("Pending collection changes flushed");
        Ok(())
    }

    fn persist(&mut self) {
        match self.port.save(&self.snapshot()) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                error!("Failed to persist collections: {}", e);
                self.dirty = true;
            }
        }
    }
}

impl Membership for CollectionStore {
    fn is_member(&self, kind: CollectionKind, id: RecordId) -> bool {
        CollectionStore::is_member(self, kind, id)
    }
}
