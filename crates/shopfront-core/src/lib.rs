//! Domain layer for the Shopfront client.
//!
//! Holds the session model and its manager, catalog types, reply
//! interpretation for the authentication screens, and the ports
//! (`ShopApi`, `SessionStore`, `Notifier`) the outer crates implement.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;

pub use api::{ApiError, ShopApi};
pub use error::{Result, ShopfrontError};
pub use notify::Notifier;
pub use session::{Role, Session, SessionManager};
