//! File-backed session store.
//!
//! Keeps the session map in memory and writes every change through to
//! `session.toml` under the file lock, so a login survives restarts of the
//! CLI and overlapping processes keep each other's keys.

use crate::paths::ShopfrontPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use async_trait::async_trait;
use shopfront_core::error::{Result, ShopfrontError};
use shopfront_core::session::SessionStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

type Entries = BTreeMap<String, String>;

impl From<AtomicTomlError> for ShopfrontError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            AtomicTomlError::Lock(message) => ShopfrontError::io(message),
        }
    }
}

/// `SessionStore` persisted as a flat TOML table.
///
/// The file holds credentials, so it is written with owner-only permissions.
/// Clearing the store deletes the file.
#[derive(Clone)]
pub struct TomlSessionStore {
    /// Entries as of the last load or write. The lock is held across the
    /// file update so that writes from this handle reach disk in order.
    entries: Arc<Mutex<Entries>>,
    file: AtomicTomlFile<Entries>,
}

impl TomlSessionStore {
    /// Opens the store at `path`, loading any existing entries.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let file = AtomicTomlFile::<Entries>::new(path).private();

        let loader = file.clone();
        let initial = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| ShopfrontError::internal(format!("Failed to join task: {}", e)))??
            .unwrap_or_default();

        tracing::debug!(
            "[SessionStore] Opened {} ({} entries)",
            file.path().display(),
            initial.len()
        );

        Ok(Self {
            entries: Arc::new(Mutex::new(initial)),
            file,
        })
    }

    /// Opens the store at `ShopfrontPaths::session_file()`.
    pub async fn open_default() -> Result<Self> {
        let path = ShopfrontPaths::session_file().map_err(|e| ShopfrontError::config(e.to_string()))?;
        Self::open(path).await
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Applies `change` to the entries currently on disk and refreshes the
    /// cache from what was written.
    async fn write<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Entries) + Send + 'static,
    {
        let mut entries = self.entries.lock().await;
        let file = self.file.clone();
        let written = tokio::task::spawn_blocking(move || {
            file.update(Entries::new(), |map| {
                change(map);
                Ok(())
            })
        })
        .await
        .map_err(|e| ShopfrontError::internal(format!("Failed to join task: {}", e)))??;
        *entries = written;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.write(move |map| {
            map.insert(key, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.write(move |map| {
            map.remove(&key);
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.write(|map| map.clear()).await
    }
}
