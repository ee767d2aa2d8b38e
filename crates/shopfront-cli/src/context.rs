//! Wiring of configuration, session storage and the HTTP client.

use crate::notifier::TerminalNotifier;
use anyhow::{Context, Result};
use shopfront_core::SessionManager;
use shopfront_core::config::ClientConfig;
use shopfront_infrastructure::{ConfigService, ShopfrontPaths, TomlSessionStore};
use shopfront_interaction::RestShopApi;
use std::path::PathBuf;
use std::sync::Arc;

/// Flags shared by every subcommand.
#[derive(Debug, Default)]
pub struct GlobalOptions {
    pub base_url: Option<String>,
    pub config: Option<PathBuf>,
    pub assume_yes: bool,
}

pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<RestShopApi>,
    pub sessions: SessionManager,
    pub notifier: Arc<TerminalNotifier>,
}

impl AppContext {
    pub async fn build(options: &GlobalOptions) -> Result<Self> {
        let config = resolve_config(options)?;
        tracing::debug!("[Cli] Using backend {}", config.base_url);

        let session_path = match &config.session_file {
            Some(path) => path.clone(),
            None => ShopfrontPaths::session_file()
                .context("Failed to locate the session file")?,
        };
        let store = TomlSessionStore::open(session_path.clone())
            .await
            .with_context(|| format!("Failed to open session file {}", session_path.display()))?;

        let api = RestShopApi::new(config.clone()).context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            api: Arc::new(api),
            sessions: SessionManager::new(Arc::new(store)),
            notifier: Arc::new(TerminalNotifier::new(options.assume_yes)),
        })
    }
}

/// File, then environment, then command-line flags.
fn resolve_config(options: &GlobalOptions) -> Result<ClientConfig> {
    let service = match &options.config {
        Some(path) => ConfigService::at(path),
        None => ConfigService::new().context("Failed to locate config.toml")?,
    };
    let config = service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;

    Ok(match &options.base_url {
        Some(base_url) => config.with_base_url(base_url.clone()),
        None => config,
    })
}
