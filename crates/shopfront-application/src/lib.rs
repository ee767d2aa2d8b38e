//! Application layer for Shopfront.
//!
//! Use cases behind the three screens: `AuthFlow` for login and signup,
//! `SellerConsole` for the seller dashboard. Both receive their
//! collaborators (`ShopApi`, `SessionManager`, `Notifier`) explicitly.

pub mod auth_flow;
pub mod seller_console;

#[cfg(test)]
mod test_support;

pub use auth_flow::{AuthFailure, AuthFlow, AuthForm};
pub use seller_console::{ModalMode, OrdersTicket, ProductModal, SellerConsole, Tab};
