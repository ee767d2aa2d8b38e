//! Seller dashboard use case.
//!
//! `SellerConsole` owns everything the seller dashboard shows: the product
//! list, the orders list, the active tab and the add/edit modal. Every
//! mutation is followed by an authoritative product refetch.

use shopfront_core::Notifier;
use shopfront_core::api::{ApiError, ShopApi};
use shopfront_core::auth::Route;
use shopfront_core::catalog::{DraftField, Order, Product, ProductDraft};
use shopfront_core::error::{Result, ShopfrontError};
use shopfront_core::session::{Role, SessionManager};
use std::sync::Arc;
use strum::{Display, EnumString};

pub const PRODUCT_ADDED: &str = "Product added successfully!";
pub const ADD_FAILED: &str = "Failed to add product.";
pub const DELETE_PROMPT: &str = "Delete this product?";
pub const DELETE_FAILED: &str = "Failed to delete product.";
pub const ORDERS_FAILED: &str = "Failed to load orders.";
pub const PRODUCTS_FAILED: &str = "Failed to load products.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    Products,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    /// Editing the product with this id.
    Edit(i64),
}

/// Open add/edit dialog and its form buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductModal {
    pub mode: ModalMode,
    pub draft: ProductDraft,
}

/// Handle for one orders fetch. Only the most recently issued ticket can
/// update the orders list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct OrdersTicket {
    generation: u64,
}

pub struct SellerConsole {
    api: Arc<dyn ShopApi>,
    sessions: SessionManager,
    notifier: Arc<dyn Notifier>,
    shopkeeper_id: i64,
    tab: Tab,
    products: Vec<Product>,
    orders: Vec<Order>,
    modal: Option<ProductModal>,
    orders_generation: u64,
}

impl SellerConsole {
    /// Opens the dashboard for the seller stored in `sessions`.
    ///
    /// Fails with `ShopfrontError::Security` unless the current session is a
    /// seller's with a stored seller id. Ids are additive, so a leftover
    /// `shopkeeperId` from an earlier seller login is not enough.
    /// A failed initial product fetch is reported but does not prevent the
    /// console from opening.
    pub async fn open(
        api: Arc<dyn ShopApi>,
        sessions: SessionManager,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let shopkeeper_id = match sessions.load().await? {
            Some(session) if session.role == Role::Seller => session.shopkeeper_id,
            _ => None,
        }
        .ok_or_else(|| ShopfrontError::security("not logged in as a seller"))?;

        let mut console = Self {
            api,
            sessions,
            notifier,
            shopkeeper_id,
            tab: Tab::default(),
            products: Vec::new(),
            orders: Vec::new(),
            modal: None,
            orders_generation: 0,
        };
        tracing::info!("[Seller] Opened console for shopkeeper {}", shopkeeper_id);

        if let Err(e) = console.load_products().await {
            tracing::warn!("[Seller] Initial product load failed: {}", e);
            console.notifier.alert(PRODUCTS_FAILED);
        }
        Ok(console)
    }

    pub fn shopkeeper_id(&self) -> i64 {
        self.shopkeeper_id
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn modal(&self) -> Option<&ProductModal> {
        self.modal.as_ref()
    }

    /// Replaces the product list with the backend's current view.
    ///
    /// On failure the current list is kept.
    pub async fn load_products(&mut self) -> Result<()> {
        let products = self.api.list_products(self.shopkeeper_id).await?;
        tracing::debug!("[Seller] Loaded {} products", products.len());
        self.products = products;
        Ok(())
    }

    /// Switches tabs. Entering `Orders` always refetches orders.
    ///
    /// A failed fetch is alerted, keeps the previous list and is returned as
    /// the error.
    pub async fn activate_tab(&mut self, tab: Tab) -> Result<()> {
        self.tab = tab;
        if tab != Tab::Orders {
            return Ok(());
        }

        let ticket = self.begin_orders_fetch();
        let result = self.api.list_orders(self.shopkeeper_id).await;
        let failure = result.as_ref().err().cloned();
        self.complete_orders_fetch(ticket, result);
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Starts an orders fetch, invalidating any fetch still in flight.
    pub fn begin_orders_fetch(&mut self) -> OrdersTicket {
        self.orders_generation += 1;
        OrdersTicket {
            generation: self.orders_generation,
        }
    }

    /// Applies the result of the fetch started with `ticket`.
    ///
    /// Returns `false` when the ticket was superseded and the result dropped.
    pub fn complete_orders_fetch(
        &mut self,
        ticket: OrdersTicket,
        result: std::result::Result<Vec<Order>, ApiError>,
    ) -> bool {
        if ticket.generation != self.orders_generation {
            tracing::debug!(
                "[Seller] Dropping stale orders response (generation {} < {})",
                ticket.generation,
                self.orders_generation
            );
            return false;
        }

        match result {
            Ok(orders) => {
                tracing::debug!("[Seller] Loaded {} orders", orders.len());
                self.orders = orders;
            }
            Err(e) => {
                tracing::warn!("[Seller] Orders fetch failed: {}", e);
                self.notifier.alert(ORDERS_FAILED);
            }
        }
        true
    }

    /// Opens the modal in add mode with a fresh buffer.
    pub fn open_add(&mut self) {
        self.modal = Some(ProductModal {
            mode: ModalMode::Add,
            draft: ProductDraft::default(),
        });
    }

    /// Opens the modal in edit mode, pre-filled from `product`.
    pub fn open_edit(&mut self, product: &Product) {
        self.modal = Some(ProductModal {
            mode: ModalMode::Edit(product.id),
            draft: ProductDraft::from(product),
        });
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Applies one form change to the open modal.
    pub fn update_field(&mut self, field: DraftField, value: &str) -> Result<()> {
        let modal = self
            .modal
            .as_mut()
            .ok_or_else(|| ShopfrontError::internal("no product form is open"))?;
        modal.draft.set(field, value)?;
        Ok(())
    }

    /// Submits the open modal.
    ///
    /// Add mode creates the product, refetches the list and closes the
    /// modal. Edit mode is rejected as unsupported. On any failure the modal
    /// stays open with its buffer intact.
    pub async fn submit_modal(&mut self) -> Result<()> {
        let modal = self
            .modal
            .as_ref()
            .ok_or_else(|| ShopfrontError::internal("no product form is open"))?;

        let draft = match modal.mode {
            ModalMode::Edit(id) => {
                tracing::warn!("[Seller] Edit submitted for product {}", id);
                return Err(ShopfrontError::unsupported(
                    "editing products is not supported by the backend",
                ));
            }
            ModalMode::Add => modal.draft.clone(),
        };
        draft.validate()?;

        if let Err(e) = self.api.create_product(self.shopkeeper_id, &draft).await {
            tracing::error!("[Seller] Failed to add product '{}': {}", draft.name, e);
            self.notifier.alert(ADD_FAILED);
            return Err(e.into());
        }
        tracing::info!("[Seller] Added product '{}'", draft.name);

        if let Err(e) = self.load_products().await {
            tracing::warn!("[Seller] Refetch after add failed: {}", e);
        }
        self.notifier.alert(PRODUCT_ADDED);
        self.modal = None;
        Ok(())
    }

    /// Deletes a product after confirmation.
    ///
    /// Returns `Ok(false)` when the user declined.
    pub async fn delete_product(&mut self, product_id: i64) -> Result<bool> {
        if !self.notifier.confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        if let Err(e) = self.api.delete_product(product_id).await {
            tracing::error!("[Seller] Failed to delete product {}: {}", product_id, e);
            self.notifier.alert(DELETE_FAILED);
            return Err(e.into());
        }
        tracing::info!("[Seller] Deleted product {}", product_id);

        self.products.retain(|p| p.id != product_id);
        if let Err(e) = self.load_products().await {
            tracing::warn!("[Seller] Refetch after delete failed: {}", e);
        }
        Ok(true)
    }

    /// Clears the session. No request is sent.
    pub async fn logout(self) -> Result<Route> {
        self.sessions.clear().await?;
        tracing::info!("[Seller] Logged out shopkeeper {}", self.shopkeeper_id);
        Ok(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockShopApi, RecordingNotifier, product};
    use serde_json::json;
    use shopfront_core::catalog::OrderDecodeError;
    use shopfront_core::session::{MemorySessionStore, Session};

    struct Fixture {
        api: Arc<MockShopApi>,
        notifier: Arc<RecordingNotifier>,
        sessions: SessionManager,
    }

    async fn fixture(confirm: bool) -> Fixture {
        let sessions = SessionManager::new(Arc::new(MemorySessionStore::new()));
        sessions
            .save(&Session {
                token: "t".to_string(),
                username: "sam".to_string(),
                role: Role::Seller,
                customer_id: None,
                shopkeeper_id: Some(7),
            })
            .await
            .unwrap();
        Fixture {
            api: Arc::new(MockShopApi::new()),
            notifier: Arc::new(RecordingNotifier::answering(confirm)),
            sessions,
        }
    }

    async fn open(fx: &Fixture) -> SellerConsole {
        SellerConsole::open(fx.api.clone(), fx.sessions.clone(), fx.notifier.clone())
            .await
            .unwrap()
    }

    fn order(id: i64) -> Order {
        Order::from_positional(&json!([
            id, "PENDING", 1, "Mug", 9.5, "u", "d", 4, 3, "c@x.com"
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn test_open_requires_seller_id() {
        let sessions = SessionManager::new(Arc::new(MemorySessionStore::new()));
        let result = SellerConsole::open(
            Arc::new(MockShopApi::new()),
            sessions,
            Arc::new(RecordingNotifier::answering(true)),
        )
        .await;

        assert!(result.err().unwrap().is_security());
    }

    #[tokio::test]
    async fn test_open_rejects_customer_with_leftover_seller_id() {
        let fx = fixture(true).await;
        fx.sessions
            .save(&Session {
                token: "c".to_string(),
                username: "ann".to_string(),
                role: Role::Customer,
                customer_id: Some(3),
                shopkeeper_id: None,
            })
            .await
            .unwrap();

        let result =
            SellerConsole::open(fx.api.clone(), fx.sessions.clone(), fx.notifier.clone()).await;

        assert!(result.err().unwrap().is_security());
        assert!(fx.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_open_loads_products() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![product(1, "Mug")]));

        let console = open(&fx).await;

        assert_eq!(console.tab(), Tab::Products);
        assert_eq!(console.products().len(), 1);
        assert_eq!(fx.api.calls(), vec!["GET products 7"]);
    }

    #[tokio::test]
    async fn test_orders_tab_fetches_every_time() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        fx.api.push_orders(Ok(vec![order(1)]));
        fx.api.push_orders(Ok(vec![order(1), order(2)]));
        let mut console = open(&fx).await;

        console.activate_tab(Tab::Orders).await.unwrap();
        console.activate_tab(Tab::Products).await.unwrap();
        console.activate_tab(Tab::Orders).await.unwrap();

        assert_eq!(console.orders().len(), 2);
        assert_eq!(
            fx.api.calls(),
            vec!["GET products 7", "GET orders 7", "GET orders 7"]
        );
    }

    #[tokio::test]
    async fn test_malformed_orders_keep_previous_list() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        fx.api.push_orders(Ok(vec![order(1)]));
        fx.api.push_orders(Err(ApiError::Orders(OrderDecodeError::WrongArity {
            expected: 10,
            found: 3,
        })));
        let mut console = open(&fx).await;

        console.activate_tab(Tab::Orders).await.unwrap();
        let err = console.activate_tab(Tab::Orders).await.unwrap_err();

        assert!(matches!(err, ShopfrontError::Api(ApiError::Orders(_))));
        assert_eq!(console.orders(), &[order(1)]);
        assert_eq!(fx.notifier.alerts(), vec![ORDERS_FAILED]);
    }

    #[tokio::test]
    async fn test_stale_orders_response_is_dropped() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        let mut console = open(&fx).await;

        let first = console.begin_orders_fetch();
        let second = console.begin_orders_fetch();

        assert!(console.complete_orders_fetch(second, Ok(vec![order(2)])));
        assert!(!console.complete_orders_fetch(first, Ok(vec![order(1)])));
        assert_eq!(console.orders(), &[order(2)]);
    }

    #[tokio::test]
    async fn test_add_posts_refetches_and_closes() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        fx.api.push_create(Ok(()));
        fx.api.push_products(Ok(vec![product(3, "Lamp")]));
        let mut console = open(&fx).await;

        console.open_add();
        assert_eq!(console.modal().unwrap().draft, ProductDraft::default());
        console.update_field(DraftField::ImageUrl, "http://img").unwrap();
        console.update_field(DraftField::Name, "Lamp").unwrap();
        console.update_field(DraftField::Description, "Warm").unwrap();
        console.update_field(DraftField::Price, "19.99").unwrap();
        console.submit_modal().await.unwrap();

        assert!(console.modal().is_none());
        assert_eq!(console.products()[0].name, "Lamp");
        assert_eq!(fx.notifier.alerts(), vec![PRODUCT_ADDED]);
        assert_eq!(
            fx.api.calls(),
            vec!["GET products 7", "POST create 7 Lamp", "GET products 7"]
        );
    }

    #[tokio::test]
    async fn test_failed_add_keeps_modal_open() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        fx.api.push_create(Err(ApiError::status(500, json!(null))));
        let mut console = open(&fx).await;

        console.open_add();
        console.update_field(DraftField::ImageUrl, "u").unwrap();
        console.update_field(DraftField::Name, "Lamp").unwrap();
        console.update_field(DraftField::Description, "Warm").unwrap();
        assert!(console.submit_modal().await.is_err());

        assert_eq!(console.modal().unwrap().draft.name, "Lamp");
        assert_eq!(fx.notifier.alerts(), vec![ADD_FAILED]);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        let mut console = open(&fx).await;

        console.open_add();
        let err = console.submit_modal().await.unwrap_err();

        assert!(matches!(err, ShopfrontError::Validation(_)));
        assert_eq!(fx.api.calls(), vec!["GET products 7"]);
        assert!(console.update_field(DraftField::Rating, "five").is_err());
    }

    #[tokio::test]
    async fn test_edit_submit_is_unsupported() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![product(1, "Mug")]));
        let mut console = open(&fx).await;

        let existing = console.products()[0].clone();
        console.open_edit(&existing);
        assert_eq!(console.modal().unwrap().draft.name, "Mug");

        let err = console.submit_modal().await.unwrap_err();
        assert!(err.is_unsupported());
        assert!(console.modal().is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_and_reconciles() {
        let fx = fixture(true).await;
        fx.api
            .push_products(Ok(vec![product(1, "A"), product(2, "B"), product(3, "C")]));
        fx.api.push_delete(Ok(()));
        fx.api.push_products(Err(ApiError::transport("offline")));
        let mut console = open(&fx).await;

        assert!(console.delete_product(2).await.unwrap());

        let ids: Vec<i64> = console.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(fx.notifier.confirms(), vec![DELETE_PROMPT]);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let fx = fixture(false).await;
        fx.api.push_products(Ok(vec![product(1, "A")]));
        let mut console = open(&fx).await;

        assert!(!console.delete_product(1).await.unwrap());
        assert_eq!(console.products().len(), 1);
        assert_eq!(fx.api.calls(), vec!["GET products 7"]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![product(1, "A")]));
        fx.api.push_delete(Err(ApiError::status(404, json!(null))));
        let mut console = open(&fx).await;

        assert!(console.delete_product(1).await.is_err());
        assert_eq!(console.products().len(), 1);
        assert_eq!(fx.notifier.alerts(), vec![DELETE_FAILED]);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let fx = fixture(true).await;
        fx.api.push_products(Ok(vec![]));
        let console = open(&fx).await;

        assert_eq!(console.logout().await.unwrap(), Route::Login);
        assert!(fx.sessions.load().await.unwrap().is_none());
        assert!(fx.sessions.shopkeeper_id().await.unwrap().is_none());
    }
}
