use crate::config::CatalogConfig;
use crate::constants::POSTER_PLACEHOLDER_URL;
use crate::models::Record;

/// Resolves the relative image paths stored on records into full URLs
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
    poster_size: String,
    backdrop_size: String,
}

impl ImageUrls {
    pub fn new(
        base_url: impl Into<String>,
        poster_size: impl Into<String>,
        backdrop_size: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poster_size: poster_size.into(),
            backdrop_size: backdrop_size.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.image_base_url.as_str(),
            config.poster_size.as_str(),
            config.backdrop_size.as_str(),
        )
    }

    /// Poster URL, or the placeholder image when the record has none
    pub fn poster(&self, record: &Record) -> String {
        record
            .poster_ref
            .as_deref()
            .map(|path| self.build(&self.poster_size, path))
            .unwrap_or_else(|| POSTER_PLACEHOLDER_URL.to_string())
    }

    pub fn backdrop(&self, record: &Record) -> Option<String> {
        record
            .backdrop_ref
            .as_deref()
            .map(|path| self.build(&self.backdrop_size, path))
    }

    fn build(&self, size: &str, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}/{}/{}", self.base_url, size, path.trim_start_matches('/'))
        }
    }
}
