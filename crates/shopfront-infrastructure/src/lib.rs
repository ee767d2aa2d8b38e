//! File-system adapters for the Shopfront client: platform paths, client
//! configuration and the persisted session store.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_session_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::ShopfrontPaths;
pub use crate::toml_session_store::TomlSessionStore;
