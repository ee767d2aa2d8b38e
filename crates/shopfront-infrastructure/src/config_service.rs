//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `config.toml` and layers environment overrides
//! on top. A missing file is not an error; defaults apply.

use crate::paths::ShopfrontPaths;
use crate::storage::AtomicTomlFile;
use shopfront_core::config::ClientConfig;
use shopfront_core::error::{Result, ShopfrontError};
use std::path::{Path, PathBuf};

/// Environment variable that replaces `base_url`.
pub const BASE_URL_ENV: &str = "SHOPFRONT_BASE_URL";

/// Reads the client configuration from a single TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `ShopfrontPaths::config_file()`, which honours `SHOPFRONT_CONFIG`.
    pub fn new() -> Result<Self> {
        let path =
            ShopfrontPaths::config_file().map_err(|e| ShopfrontError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file and applies environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        Ok(apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Loads the file only.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let file = AtomicTomlFile::<ClientConfig>::new(self.path.clone());
        let config = file.load().map_err(|e| {
            ShopfrontError::config(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        match config {
            Some(config) => {
                tracing::debug!("[Config] Loaded {}", self.path.display());
                Ok(config)
            }
            None => {
                tracing::debug!(
                    "[Config] {} not found, using defaults",
                    self.path.display()
                );
                Ok(ClientConfig::default())
            }
        }
    }
}

/// Applies environment overrides read through `lookup`.
///
/// Blank values are ignored.
pub fn apply_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url.trim().to_string();
    }
    config
}
