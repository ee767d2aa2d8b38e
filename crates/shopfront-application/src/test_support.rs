//! Hand-written doubles for the backend and the user prompts.

use async_trait::async_trait;
use serde_json::Value;
use shopfront_core::{Notifier, Role};
use shopfront_core::api::{ApiError, LoginRequest, ShopApi, SignupRequest};
use shopfront_core::catalog::{Order, Price, Product, ProductDraft, Rating};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type Queue<T> = Mutex<VecDeque<Result<T, ApiError>>>;

fn next<T>(queue: &Queue<T>, what: &str) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::transport(format!("no canned reply for {what}"))))
}

/// Mock `ShopApi` that replays queued replies and records every call.
#[derive(Default)]
pub struct MockShopApi {
    login: Queue<Value>,
    signup: Queue<Value>,
    products: Queue<Vec<Product>>,
    orders: Queue<Vec<Order>>,
    creates: Queue<()>,
    deletes: Queue<()>,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl MockShopApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auth calls wait on `gate` before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_login(&self, reply: Result<Value, ApiError>) -> &Self {
        self.login.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_signup(&self, reply: Result<Value, ApiError>) -> &Self {
        self.signup.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_products(&self, reply: Result<Vec<Product>, ApiError>) -> &Self {
        self.products.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_orders(&self, reply: Result<Vec<Order>, ApiError>) -> &Self {
        self.orders.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_create(&self, reply: Result<(), ApiError>) -> &Self {
        self.creates.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_delete(&self, reply: Result<(), ApiError>) -> &Self {
        self.deletes.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ShopApi for MockShopApi {
    async fn login(
        &self,
        role: Role,
        request: &LoginRequest,
    ) -> Result<Value, ApiError> {
        self.record(format!("POST {} {}", role.login_path(), request.email));
        self.wait_gate().await;
        next(&self.login, "login")
    }

    async fn signup(
        &self,
        role: Role,
        request: &SignupRequest,
    ) -> Result<Value, ApiError> {
        self.record(format!("POST {} {}", role.signup_path(), request.email));
        self.wait_gate().await;
        next(&self.signup, "signup")
    }

    async fn list_products(&self, shopkeeper_id: i64) -> Result<Vec<Product>, ApiError> {
        self.record(format!("GET products {shopkeeper_id}"));
        next(&self.products, "list_products")
    }

    async fn create_product(
        &self,
        shopkeeper_id: i64,
        draft: &ProductDraft,
    ) -> Result<(), ApiError> {
        self.record(format!("POST create {shopkeeper_id} {}", draft.name));
        next(&self.creates, "create_product")
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE {product_id}"));
        next(&self.deletes, "delete_product")
    }

    async fn list_orders(&self, shopkeeper_id: i64) -> Result<Vec<Order>, ApiError> {
        self.record(format!("GET orders {shopkeeper_id}"));
        next(&self.orders, "list_orders")
    }
}

/// Notifier that records alerts and answers confirms with a fixed value.
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    answer: bool,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
            answer,
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.confirms.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

pub fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        image_url: format!("http://img/{id}"),
        name: name.to_string(),
        description: format!("{name} description"),
        rating: Rating::default(),
        price: Price::try_from(10.0).unwrap(),
    }
}
