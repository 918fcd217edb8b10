use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{MediaKind, Record, RecordId};
use crate::utils::errors::FetchError;

/// Opaque description of a paged catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Listing path understood by the catalog, e.g. `movie/now_playing`
    pub category: String,
    /// Kind assumed for entries that do not declare their own
    pub kind: MediaKind,
}

impl CatalogQuery {
    pub fn new(category: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            category: category.into(),
            kind,
        }
    }

    pub fn now_playing() -> Self {
        Self::new("movie/now_playing", MediaKind::Movie)
    }

    pub fn upcoming() -> Self {
        Self::new("movie/upcoming", MediaKind::Movie)
    }

    pub fn trending_series() -> Self {
        Self::new("trending/tv/day", MediaKind::Series)
    }

    pub fn trending_movies() -> Self {
        Self::new("trending/movie/day", MediaKind::Movie)
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

/// A remote catalog that serves records in fixed-size pages.
///
/// Implementations must not retry or cache; every call is independent.
#[async_trait]
pub trait CatalogSource: Send + Sync + fmt::Debug {
    /// Number of records in a full page of this source
    fn chunk_size(&self) -> usize;

    /// Fetch one page (1-based, in the source's own chunk size), in source order
    async fn fetch_chunk(
        &self,
        query: &CatalogQuery,
        source_page: u32,
    ) -> Result<Vec<Record>, FetchError>;

    /// Fetch one page keeping every source position.
    ///
    /// Entries the adapter cannot represent come back as `None`, so offsets
    /// computed in the source's chunk size still line up. Sources that never
    /// drop entries can rely on the default.
    async fn fetch_slots(
        &self,
        query: &CatalogQuery,
        source_page: u32,
    ) -> Result<Vec<Option<Record>>, FetchError> {
        let records = self.fetch_chunk(query, source_page).await?;
        Ok(records.into_iter().map(Some).collect())
    }
}

/// Reference to a playable video hosted outside the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub site: String,
    pub key: String,
    pub name: String,
}

impl VideoRef {
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }

    pub fn watch_url(&self) -> Option<String> {
        self.is_youtube()
            .then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }

    pub fn embed_url(&self) -> Option<String> {
        self.is_youtube()
            .then(|| format!("https://www.youtube.com/embed/{}?autoplay=1", self.key))
    }
}

#[async_trait]
pub trait TrailerSource: Send + Sync + fmt::Debug {
    /// Look up a trailer; `Ok(None)` means none is available
    async fn find_trailer(
        &self,
        kind: MediaKind,
        id: RecordId,
    ) -> Result<Option<VideoRef>, FetchError>;
}
