//! Unified path management for shopfront files.
//!
//! All paths hang off the platform config directory resolved by `dirs`, so
//! Linux, macOS and Windows each get their conventional location.

use std::path::PathBuf;

/// Environment variable that points at an alternative `config.toml`.
pub const CONFIG_ENV: &str = "SHOPFRONT_CONFIG";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for shopfront.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/shopfront/         # Config directory
/// ├── config.toml              # Client configuration
/// └── session.toml             # Persisted session (token, role, ids)
/// ```
pub struct ShopfrontPaths;

impl ShopfrontPaths {
    /// Returns the shopfront configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/shopfront/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("shopfront"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the configuration file.
    ///
    /// `SHOPFRONT_CONFIG` takes precedence over the default location.
    pub fn config_file() -> Result<PathBuf, PathError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
