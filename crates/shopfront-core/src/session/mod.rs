//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `Role` and the persisted `SessionKey`s
//! - `repository`: `SessionStore` key/value port and an in-memory implementation
//! - `manager`: `SessionManager`, the only writer of session state

mod manager;
mod model;
mod repository;

pub use manager::SessionManager;
pub use model::{Role, Session, SessionKey};
pub use repository::{MemorySessionStore, SessionStore};
