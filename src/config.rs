use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{API_KEY_ENV, APP_DIR_NAME, DEFAULT_DISPLAY_PAGE_SIZE, DEFAULT_SOURCE_CHUNK_SIZE};
use crate::utils::errors::ValidationError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub paging: PagingConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    #[serde(default = "default_poster_size")]
    pub poster_size: String,

    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Records per page as served by the catalog
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_display_page_size")]
    pub display_page_size: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config
            .validate()
            .context("Config file contains invalid values")?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Catalog credential, `TMDB_API_KEY` taking precedence over the file
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.catalog.api_key.clone())
    }

    /// Location of the persisted collections document
    pub fn state_file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.state_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to get data directory")?;
        Ok(data_dir.join(APP_DIR_NAME).join("state.json"))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.catalog.chunk_size == 0 {
            return Err(ValidationError::InvalidSpec(
                "catalog.chunk_size must be at least 1".to_string(),
            ));
        }
        if self.paging.display_page_size == 0 {
            return Err(ValidationError::InvalidSpec(
                "paging.display_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join(APP_DIR_NAME).join("config.toml"))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            backdrop_size: default_backdrop_size(),
            api_key: None,
            chunk_size: default_chunk_size(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            display_page_size: default_display_page_size(),
        }
    }
}

// Default value functions
fn default_language() -> String { "fr-FR".to_string() }
fn default_base_url() -> String { "https://api.themoviedb.org/3".to_string() }
fn default_image_base_url() -> String { "https://image.tmdb.org/t/p".to_string() }
fn default_poster_size() -> String { "w500".to_string() }
fn default_backdrop_size() -> String { "w1280".to_string() }
fn default_chunk_size() -> usize { DEFAULT_SOURCE_CHUNK_SIZE }
fn default_timeout() -> u64 { 30 }
fn default_display_page_size() -> usize { DEFAULT_DISPLAY_PAGE_SIZE }
