use serde::{Deserialize, Serialize};
use std::fmt;

/// The three user-curated lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKind {
    Favorites,
    Watched,
    WatchLater,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Favorites,
        CollectionKind::Watched,
        CollectionKind::WatchLater,
    ];

    /// Key of this collection inside the persisted document
    pub fn storage_key(&self) -> &'static str {
        match self {
            CollectionKind::Favorites => "favorites",
            CollectionKind::Watched => "watched",
            CollectionKind::WatchLater => "watchLater",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Favorites => write!(f, "My Selection"),
            CollectionKind::Watched => write!(f, "Already Watched"),
            CollectionKind::WatchLater => write!(f, "Watch Later"),
        }
    }
}

/// Colour scheme preference, persisted alongside the collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Membership of one record in every collection, for rendering a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MembershipFlags {
    pub favorite: bool,
    pub watched: bool,
    pub watch_later: bool,
}

impl MembershipFlags {
    pub fn get(&self, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Favorites => self.favorite,
            CollectionKind::Watched => self.watched,
            CollectionKind::WatchLater => self.watch_later,
        }
    }
}
