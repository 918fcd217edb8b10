pub mod collections;
pub mod genres;
mod identifiers;

pub use collections::{CollectionKind, MembershipFlags, Theme};
pub use genres::{GENRES, Genre, genre_name};
pub use identifiers::{GenreId, RecordId};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Whether a catalog entry is a film or a television series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Path segment the catalog uses for this kind (`movie` / `tv`)
    pub fn api_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    pub fn from_api_segment(segment: &str) -> Option<Self> {
        match segment {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Series => write!(f, "Series"),
        }
    }
}

/// Identity of a record across kinds.
///
/// The catalog numbers movies and series independently, so only the pair is
/// guaranteed unique. Collections are still keyed by `RecordId` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub kind: MediaKind,
    pub id: RecordId,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.api_segment(), self.id)
    }
}

/// A single catalog item, immutable once fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub kind: MediaKind,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub rating_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: BTreeSet<GenreId>,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub poster_ref: Option<String>,
    #[serde(default)]
    pub backdrop_ref: Option<String>,
}

impl Record {
    pub fn new(id: u64, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            kind,
            title: title.into(),
            release_date: None,
            rating_average: None,
            popularity: None,
            genre_ids: BTreeSet::new(),
            synopsis: String::new(),
            poster_ref: None,
            backdrop_ref: None,
        }
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating_average = Some(rating);
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = u32>) -> Self {
        self.genre_ids = genres.into_iter().map(GenreId::new).collect();
        self
    }

    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = synopsis.into();
        self
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            kind: self.kind,
            id: self.id,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// Rating formatted with one decimal, `N/A` when the catalog has none
    pub fn rating_label(&self) -> String {
        match self.rating_average {
            Some(rating) if rating > 0.0 => format!("{:.1}", rating),
            _ => "N/A".to_string(),
        }
    }

    pub fn has_genre(&self, genre: GenreId) -> bool {
        self.genre_ids.contains(&genre)
    }
}
