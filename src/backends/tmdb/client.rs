use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::types::{TmdbPageResponse, TmdbVideosResponse};
use crate::backends::traits::{CatalogQuery, CatalogSource, TrailerSource, VideoRef};
use crate::config::Config;
use crate::mapper::RecordMapper;
use crate::models::{MediaKind, Record, RecordId};
use crate::utils::errors::FetchError;

/// HTTP adapter for the TMDB v3 catalog.
///
/// Translates the catalog's JSON into `Record`s at the boundary and surfaces
/// every failure as a typed `FetchError`. No retries, no caching.
#[derive(Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    chunk_size: usize,
}

impl TmdbClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
        chunk_size: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).with_context(|| format!("Invalid catalog base URL {}", base_url))?;
        if chunk_size == 0 {
            anyhow::bail!("Catalog chunk size must be at least 1");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            language: language.into(),
            chunk_size,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key()
            .context("No catalog API key configured (set TMDB_API_KEY or catalog.api_key)")?;

        Self::new(
            config.catalog.base_url.as_str(),
            api_key,
            config.general.language.as_str(),
            config.catalog.chunk_size,
            Duration::from_secs(config.catalog.timeout_secs),
        )
    }

    pub(super) fn endpoint_url(&self, path: &str, page: Option<u32>) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| FetchError::Network(format!("Invalid request URL {}: {}", raw, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            query.append_pair("language", &self.language);
            if let Some(page) = page {
                query.append_pair("page", &page.to_string());
            }
        }

        Ok(url)
    }

    /// Execute a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        operation_name: &str,
    ) -> Result<T, FetchError> {
        debug!("[{}] GET {}", operation_name, url.path());

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        debug!("[{}] Response: {}", operation_name, status);

        if !status.is_success() {
            warn!(
                "[{}] Catalog returned error status {}",
                operation_name,
                status.as_u16()
            );
            return Err(FetchError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("[{}] Failed to decode response: {}", operation_name, e);
            FetchError::Decode(e.to_string())
        })
    }
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    async fn fetch_chunk(
        &self,
        query: &CatalogQuery,
        source_page: u32,
    ) -> Result<Vec<Record>, FetchError> {
        let slots = self.fetch_slots(query, source_page).await?;
        Ok(slots.into_iter().flatten().collect())
    }

    async fn fetch_slots(
        &self,
        query: &CatalogQuery,
        source_page: u32,
    ) -> Result<Vec<Option<Record>>, FetchError> {
        let url = self.endpoint_url(&query.category, Some(source_page))?;
        let page: TmdbPageResponse = self.get_json(url, "fetch_chunk").await?;
        let listed = page.results.len();

        let slots = RecordMapper::slots_from_list(page.results, query.kind);
        let mapped = slots.iter().filter(|slot| slot.is_some()).count();
        info!(
            "Fetched {} records ({} listed) from {} page {}/{:?}, {:?} results total",
            mapped, listed, query, page.page, page.total_pages, page.total_results
        );
        Ok(slots)
    }
}

#[async_trait]
impl TrailerSource for TmdbClient {
    async fn find_trailer(
        &self,
        kind: MediaKind,
        id: RecordId,
    ) -> Result<Option<VideoRef>, FetchError> {
        let path = format!("{}/{}/videos", kind.api_segment(), id);
        let url = self.endpoint_url(&path, None)?;
        let videos: TmdbVideosResponse = self.get_json(url, "find_trailer").await?;

        let trailer = RecordMapper::select_trailer(videos.results);
        if trailer.is_none() {
            info!("No trailer available for {}/{}", kind.api_segment(), id);
        }
        Ok(trailer)
    }
}
