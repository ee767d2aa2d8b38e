//! RestShopApi - `ShopApi` over the backend's JSON REST endpoints.
//!
//! Owns transport details only: URL building, timeout, status mapping and
//! body decoding. Interpreting authentication replies is left to the caller.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use shopfront_core::api::{ApiError, LoginRequest, ShopApi, SignupRequest, paths};
use shopfront_core::catalog::{Order, Product, ProductDraft};
use shopfront_core::config::ClientConfig;
use shopfront_core::session::Role;

/// HTTP client for the shop backend.
#[derive(Clone)]
pub struct RestShopApi {
    client: Client,
    config: ClientConfig,
}

impl RestShopApi {
    /// Builds a client for `config`.
    ///
    /// The request timeout is only applied when the configuration sets one.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::transport(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let request = self.client.get(self.url(path));
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        Ok(parse_body(body.as_ref()))
    }
}

#[async_trait]
impl ShopApi for RestShopApi {
    async fn login(&self, role: Role, request: &LoginRequest) -> Result<Value, ApiError> {
        self.post_json(role.login_path(), request).await
    }

    async fn signup(&self, role: Role, request: &SignupRequest) -> Result<Value, ApiError> {
        self.post_json(role.signup_path(), request).await
    }

    async fn list_products(&self, shopkeeper_id: i64) -> Result<Vec<Product>, ApiError> {
        let body = self.get_json(&paths::products_of(shopkeeper_id)).await?;
        decode_products(body)
    }

    async fn create_product(
        &self,
        shopkeeper_id: i64,
        draft: &ProductDraft,
    ) -> Result<(), ApiError> {
        self.post_json(&paths::create_product(shopkeeper_id), draft)
            .await
            .map(|_| ())
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&paths::product(product_id)));
        self.send(request).await.map(|_| ())
    }

    async fn list_orders(&self, shopkeeper_id: i64) -> Result<Vec<Order>, ApiError> {
        let body = self.get_json(&paths::orders_of(shopkeeper_id)).await?;
        decode_orders(body)
    }
}

/// Reads a response body the way a browser client would: JSON when it
/// parses, the raw text otherwise, `Null` when empty.
pub fn parse_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "failed"
    };
    tracing::error!("[Api] Request {}: {}", kind, err);
    ApiError::transport(format!("request {kind}: {err}"))
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    tracing::debug!("[Api] Backend answered {}", status);
    ApiError::status(status.as_u16(), parse_body(body))
}

fn decode_products(body: Value) -> Result<Vec<Product>, ApiError> {
    serde_json::from_value(body)
        .map_err(|err| ApiError::decode(format!("invalid product list: {err}")))
}

fn decode_orders(body: Value) -> Result<Vec<Order>, ApiError> {
    let Value::Array(records) = body else {
        return Err(ApiError::decode("order list is not an array"));
    };
    Ok(Order::decode_all(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfront_core::catalog::{OrderDecodeError, OrderStatus};

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(b""), Value::Null);
        assert_eq!(parse_body(b"  \n"), Value::Null);
        assert_eq!(parse_body(b"{\"a\":1}"), json!({"a": 1}));
        assert_eq!(
            parse_body(b"\"Credentials Invalid !!\""),
            json!("Credentials Invalid !!")
        );
        assert_eq!(
            parse_body(b"User already exists"),
            json!("User already exists")
        );
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = map_status_error(StatusCode::CONFLICT, b"Email exists");
        assert_eq!(err, ApiError::status(409, json!("Email exists")));

        let err = map_status_error(StatusCode::BAD_REQUEST, b"{\"message\":\"bad\"}");
        assert_eq!(err, ApiError::status(400, json!({"message": "bad"})));
    }

    #[test]
    fn test_decode_products_validates_rating() {
        let body = json!([
            {"id": 1, "imageUrl": "u", "name": "Mug", "description": "d", "rating": 4, "price": 9.5}
        ]);
        let products = decode_products(body).unwrap();
        assert_eq!(products[0].name, "Mug");

        let bad = json!([
            {"id": 1, "imageUrl": "u", "name": "Mug", "description": "d", "rating": 9, "price": 9.5}
        ]);
        assert!(matches!(decode_products(bad), Err(ApiError::Decode { .. })));
    }

    #[test]
    fn test_decode_orders() {
        let body = json!([
            [1, "PENDING", 10, "Mug", 9.5, "u", "d", 4, 3, "c@x.com"]
        ]);
        let orders = decode_orders(body).unwrap();
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].customer_email, "c@x.com");

        let short = json!([[1, "PENDING"]]);
        assert_eq!(
            decode_orders(short),
            Err(ApiError::Orders(OrderDecodeError::WrongArity {
                expected: 10,
                found: 2
            }))
        );

        assert!(matches!(
            decode_orders(json!({"orders": []})),
            Err(ApiError::Decode { .. })
        ));
    }

    #[test]
    fn test_new_honours_config() {
        let api = RestShopApi::new(ClientConfig::default().with_base_url("http://shop.test/"))
            .unwrap();
        assert_eq!(api.url("/api/products/3"), "http://shop.test/api/products/3");
    }
}
