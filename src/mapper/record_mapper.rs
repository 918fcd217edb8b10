//! Record mapping implementations

use chrono::NaiveDate;
use tracing::debug;

use crate::backends::tmdb::types::{TmdbListItem, TmdbVideo};
use crate::backends::traits::VideoRef;
use crate::models::{GenreId, MediaKind, Record, RecordId};

pub struct DateTransformer;

impl DateTransformer {
    /// Parse a `YYYY-MM-DD` date; blank or malformed values become `None`
    pub fn from_catalog(s: Option<&str>) -> Option<NaiveDate> {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

pub struct TextTransformer;

impl TextTransformer {
    pub fn non_empty(s: Option<String>) -> Option<String> {
        s.filter(|s| !s.trim().is_empty())
    }
}

pub struct RecordMapper;

impl RecordMapper {
    /// Map one listing entry. Entries whose declared media type is neither a
    /// movie nor a series (people in mixed listings) are dropped.
    pub fn from_list_item(item: TmdbListItem, fallback_kind: MediaKind) -> Option<Record> {
        let kind = match item.media_type.as_deref() {
            None => fallback_kind,
            Some(media_type) => match MediaKind::from_api_segment(media_type) {
                Some(kind) => kind,
                None => {
                    debug!("Skipping catalog entry {} of type {}", item.id, media_type);
                    return None;
                }
            },
        };

        let title = TextTransformer::non_empty(item.title)
            .or_else(|| TextTransformer::non_empty(item.name))
            .unwrap_or_default();

        let date = match kind {
            MediaKind::Movie => item.release_date.or(item.first_air_date),
            MediaKind::Series => item.first_air_date.or(item.release_date),
        };

        Some(Record {
            id: RecordId::new(item.id),
            kind,
            title,
            release_date: DateTransformer::from_catalog(date.as_deref()),
            rating_average: item.vote_average.map(|r| r.clamp(0.0, 10.0)),
            popularity: item.popularity.map(|p| p.max(0.0)),
            genre_ids: item.genre_ids.into_iter().map(GenreId::new).collect(),
            synopsis: item.overview.unwrap_or_default(),
            poster_ref: TextTransformer::non_empty(item.poster_path),
            backdrop_ref: TextTransformer::non_empty(item.backdrop_path),
        })
    }

    /// Map a whole page, preserving source order
    pub fn from_list(items: Vec<TmdbListItem>, fallback_kind: MediaKind) -> Vec<Record> {
        Self::slots_from_list(items, fallback_kind)
            .into_iter()
            .flatten()
            .collect()
    }

    /// Map a whole page, one slot per listed entry; skipped entries stay as `None`
    pub fn slots_from_list(
        items: Vec<TmdbListItem>,
        fallback_kind: MediaKind,
    ) -> Vec<Option<Record>> {
        items
            .into_iter()
            .map(|item| Self::from_list_item(item, fallback_kind))
            .collect()
    }

    /// Prefer a YouTube trailer, otherwise whatever video comes first
    pub fn select_trailer(videos: Vec<TmdbVideo>) -> Option<VideoRef> {
        let index = videos
            .iter()
            .position(|v| v.video_type == "Trailer" && v.site.eq_ignore_ascii_case("youtube"))
            .unwrap_or(0);

        videos.into_iter().nth(index).map(|v| VideoRef {
            site: v.site,
            key: v.key,
            name: v.name,
        })
    }
}
