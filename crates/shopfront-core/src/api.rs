//! Backend API port.
//!
//! Defines what the client needs from the shop backend. The HTTP transport
//! lives in `shopfront-interaction`; tests substitute in-memory doubles.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{Order, OrderDecodeError, Product, ProductDraft};
use crate::session::Role;

/// Credentials posted to a login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Fields posted to a signup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Failure talking to the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced an HTTP response (connection, timeout, ...).
    #[error("request failed: {message}")]
    Transport { message: String },

    /// Non-2xx response. `body` is the parsed JSON, a JSON string when the
    /// body was not JSON, or `Null` when it was empty.
    #[error("backend returned status {status}")]
    Status { status: u16, body: Value },

    /// 2xx response whose body does not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode { message: String },

    /// Orders response contained a malformed positional record.
    #[error("malformed order record: {0}")]
    Orders(#[from] OrderDecodeError),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self::Status { status, body }
    }
}

/// Operations the client performs against the shop backend.
///
/// Authentication calls hand back the raw 2xx body because the backend
/// reports some failures inside successful responses; interpreting that
/// body is the caller's job (see [`crate::auth`]).
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// `POST` to the login endpoint of `role`.
    async fn login(&self, role: Role, request: &LoginRequest) -> Result<Value, ApiError>;

    /// `POST` to the signup endpoint of `role`.
    async fn signup(&self, role: Role, request: &SignupRequest) -> Result<Value, ApiError>;

    /// `GET /api/products/shopkeeper/{id}`
    async fn list_products(&self, shopkeeper_id: i64) -> Result<Vec<Product>, ApiError>;

    /// `POST /api/products/create/{id}`
    async fn create_product(&self, shopkeeper_id: i64, draft: &ProductDraft)
    -> Result<(), ApiError>;

    /// `DELETE /api/products/{id}`
    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError>;

    /// `GET /api/products/shopkeeper/{id}/orders`
    async fn list_orders(&self, shopkeeper_id: i64) -> Result<Vec<Order>, ApiError>;
}

/// Path helpers shared by every `ShopApi` implementation.
pub mod paths {
    pub fn products_of(shopkeeper_id: i64) -> String {
        format!("/api/products/shopkeeper/{shopkeeper_id}")
    }

    pub fn orders_of(shopkeeper_id: i64) -> String {
        format!("/api/products/shopkeeper/{shopkeeper_id}/orders")
    }

    pub fn create_product(shopkeeper_id: i64) -> String {
        format!("/api/products/create/{shopkeeper_id}")
    }

    pub fn product(product_id: i64) -> String {
        format!("/api/products/{product_id}")
    }
}
