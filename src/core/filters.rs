//! Filter and sort over a working set of records.
//!
//! Stages run text, genre, then status, and each one only narrows. Sorting is
//! stable, so equal keys keep their input order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::{CollectionKind, GenreId, Record, RecordId};

/// Personal-status filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    #[default]
    All,
    Favorites,
    Watched,
    WatchLater,
}

impl StatusFilter {
    pub fn collection(&self) -> Option<CollectionKind> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Favorites => Some(CollectionKind::Favorites),
            StatusFilter::Watched => Some(CollectionKind::Watched),
            StatusFilter::WatchLater => Some(CollectionKind::WatchLater),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "All statuses"),
            StatusFilter::Favorites => write!(f, "My Favorites"),
            StatusFilter::Watched => write!(f, "Already Watched"),
            StatusFilter::WatchLater => write!(f, "Watch Later"),
        }
    }
}

/// Compound filter applied to the working set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive title substring; empty disables the stage
    pub text: String,
    pub genre: Option<GenreId>,
    pub status: StatusFilter,
}

impl FilterSpec {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_genre(mut self, genre: u32) -> Self {
        self.genre = Some(GenreId::new(genre));
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Check if any stage would narrow the input
    pub fn is_active(&self) -> bool {
        !self.text.is_empty() || self.genre.is_some() || self.status != StatusFilter::All
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Popularity,
    Rating,
    Date,
    Title,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Popularity => write!(f, "Popular"),
            SortKey::Rating => write!(f, "Rating"),
            SortKey::Date => write!(f, "Date"),
            SortKey::Title => write!(f, "Title"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Popularity,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort to use after the user selects `key`.
    ///
    /// Repeating the current key goes descending, ascending, then back to
    /// the default. A different key starts descending.
    pub fn cycle(self, key: SortKey) -> Self {
        if self.key != key {
            return Self::new(key, SortDirection::Descending);
        }
        match self.direction {
            SortDirection::Descending => Self::new(key, SortDirection::Ascending),
            SortDirection::Ascending => Self::default(),
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = match self.key {
            SortKey::Popularity => a
                .popularity
                .unwrap_or(0.0)
                .total_cmp(&b.popularity.unwrap_or(0.0)),
            SortKey::Rating => a
                .rating_average
                .unwrap_or(0.0)
                .total_cmp(&b.rating_average.unwrap_or(0.0)),
            SortKey::Date => a
                .release_date
                .unwrap_or(NaiveDate::MIN)
                .cmp(&b.release_date.unwrap_or(NaiveDate::MIN)),
            SortKey::Title => title_collation_key(&a.title).cmp(&title_collation_key(&b.title)),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Read access to collection membership, as needed by the status filter
pub trait Membership {
    fn is_member(&self, kind: CollectionKind, id: RecordId) -> bool;
}

/// Case- and accent-insensitive sort key, so "Élan" sorts beside "elan"
pub fn title_collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Filter then sort a working set. Never mutates `records`.
pub fn derive_view<M: Membership + ?Sized>(
    records: &[Record],
    filter: &FilterSpec,
    sort: &SortSpec,
    collections: &M,
) -> Vec<Record> {
    let filtered = filter_by_text(records.iter().collect(), &filter.text);
    let filtered = filter_by_genre(filtered, filter.genre);
    let filtered = filter_by_status(filtered, filter.status, collections);

    sort_records(filtered, sort).into_iter().cloned().collect()
}

fn filter_by_text<'a>(records: Vec<&'a Record>, text: &str) -> Vec<&'a Record> {
    if text.is_empty() {
        return records;
    }
    let needle = text.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.title.to_lowercase().contains(&needle))
        .collect()
}

fn filter_by_genre(records: Vec<&Record>, genre: Option<GenreId>) -> Vec<&Record> {
    match genre {
        None => records,
        Some(genre) => records
            .into_iter()
            .filter(|record| record.has_genre(genre))
            .collect(),
    }
}

fn filter_by_status<'a, M: Membership + ?Sized>(
    records: Vec<&'a Record>,
    status: StatusFilter,
    collections: &M,
) -> Vec<&'a Record> {
    match status.collection() {
        None => records,
        Some(kind) => records
            .into_iter()
            .filter(|record| collections.is_member(kind, record.id))
            .collect(),
    }
}

fn sort_records<'a>(mut records: Vec<&'a Record>, sort: &SortSpec) -> Vec<&'a Record> {
    // `sort_by` is stable: equal keys keep their input order in both directions
    records.sort_by(|a, b| sort.compare(a, b));
    records
}
