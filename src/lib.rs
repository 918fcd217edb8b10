// Catalog curation engine: paged browsing, filter/sort and personal collections

#![allow(clippy::result_large_err)]

pub mod backends;
pub mod config;
pub mod constants;
pub mod core;
pub mod mapper;
pub mod models;
pub mod services;
pub mod utils;

pub use backends::{CatalogQuery, CatalogSource, ImageUrls, TmdbClient, TrailerSource, VideoRef};
pub use config::Config;
pub use crate::core::{
    CatalogBrowser, FilterSpec, Membership, SortDirection, SortKey, SortSpec, StatusFilter,
    ViewState, derive_view, featured_pick, map_display_page_to_source,
};
pub use models::{CollectionKind, MediaKind, Record, RecordId, Theme};
pub use services::{CollectionStore, JsonFileStore, MemoryStore, PersistencePort};
pub use utils::errors::{FetchError, PersistenceError, ValidationError};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once is harmless; only the first subscriber is installed.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logging initialized");
    }
}
