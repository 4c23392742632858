//! Configuration Management
//!
//! Handles persistent configuration storage for rek-loader.

use crate::resource::FetcherConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host used when nothing else is configured
pub const DEFAULT_HOST: &str = "http://localhost:3000";

/// Environment variable overriding the configured host
pub const HOST_ENV: &str = "REK_LOADER_HOST";

/// Supplies the content host the loader resolves resources and images against
pub trait HostConfig {
    fn host(&self) -> &str;
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content host, e.g. `https://content.example.org`
    #[serde(default = "default_host")]
    pub host: String,
    /// Read resources from the development directory instead of the host
    #[serde(default)]
    pub local_mode: bool,
    /// Purge the image cache before each load
    #[serde(default)]
    pub clear_image_cache_on_load: bool,
    #[serde(default)]
    pub dev_resources_dir: Option<PathBuf>,
    #[serde(default)]
    pub in_app_resources_dir: Option<PathBuf>,
    #[serde(default)]
    pub image_cache_dir: Option<PathBuf>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            local_mode: false,
            clear_image_cache_on_load: false,
            dev_resources_dir: None,
            in_app_resources_dir: None,
            image_cache_dir: None,
        }
    }
}

impl HostConfig for Config {
    fn host(&self) -> &str {
        &self.host
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rek-loader").join("config.json"))
    }

    /// Load configuration from disk, applying the host override
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };

        if let Ok(host) = std::env::var(HOST_ENV) {
            if !host.is_empty() {
                config.host = host;
            }
        }

        config
    }

    /// Load configuration from a specific file
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn effective_dev_resources_dir(&self) -> PathBuf {
        self.dev_resources_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("dev-resources"))
    }

    pub fn effective_in_app_resources_dir(&self) -> PathBuf {
        self.in_app_resources_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("in-app-resources"))
    }

    /// Image cache directory (config > user cache dir > ./images)
    pub fn effective_image_cache_dir(&self) -> PathBuf {
        self.image_cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|p| p.join("rek-loader").join("images")))
            .unwrap_or_else(|| PathBuf::from("images"))
    }

    /// Settings for the resource fetcher
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            local_mode: self.local_mode,
            dev_resources_dir: self.effective_dev_resources_dir(),
            host: self.host.clone(),
        }
    }
}
