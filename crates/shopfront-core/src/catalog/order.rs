//! Orders as reported to a seller.
//!
//! The backend sends each order as a fixed-arity JSON array rather than an
//! object. [`Order::from_positional`] is the single place that knows the
//! index-to-field mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Field names in wire order.
pub const ORDER_FIELDS: [&str; 10] = [
    "orderId",
    "status",
    "productId",
    "productName",
    "price",
    "imageUrl",
    "description",
    "rating",
    "customerId",
    "customerEmail",
];

/// Why a positional order record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderDecodeError {
    #[error("order record is not an array")]
    NotAnArray,

    #[error("order record has {found} fields, expected {expected}")]
    WrongArity { expected: usize, found: usize },

    #[error("order field {index} ({field}) should be {expected}")]
    FieldType {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => Self::Pending,
            "DELIVERED" => Self::Delivered,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Delivered => "DELIVERED",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order line. Read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub status: OrderStatus,
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub image_url: String,
    pub description: String,
    pub rating: i64,
    pub customer_id: i64,
    pub customer_email: String,
}

impl Order {
    /// Decodes one positional record.
    ///
    /// The record must have exactly [`ORDER_FIELDS`]`.len()` elements and each
    /// element must have the expected JSON type.
    pub fn from_positional(record: &Value) -> Result<Self, OrderDecodeError> {
        let fields = record.as_array().ok_or(OrderDecodeError::NotAnArray)?;
        if fields.len() != ORDER_FIELDS.len() {
            return Err(OrderDecodeError::WrongArity {
                expected: ORDER_FIELDS.len(),
                found: fields.len(),
            });
        }

        let record = Positional(fields);
        Ok(Self {
            order_id: record.int(0)?,
            status: OrderStatus::from(record.text(1)?),
            product_id: record.int(2)?,
            product_name: record.text(3)?,
            price: record.number(4)?,
            image_url: record.text(5)?,
            description: record.text(6)?,
            rating: record.int(7)?,
            customer_id: record.int(8)?,
            customer_email: record.text(9)?,
        })
    }

    /// Decodes a whole response; one bad record rejects the batch.
    pub fn decode_all(records: &[Value]) -> Result<Vec<Self>, OrderDecodeError> {
        records.iter().map(Self::from_positional).collect()
    }
}

struct Positional<'a>(&'a [Value]);

impl Positional<'_> {
    fn mismatch(index: usize, expected: &'static str) -> OrderDecodeError {
        OrderDecodeError::FieldType {
            index,
            field: ORDER_FIELDS[index],
            expected,
        }
    }

    fn int(&self, index: usize) -> Result<i64, OrderDecodeError> {
        self.0[index]
            .as_i64()
            .ok_or_else(|| Self::mismatch(index, "an integer"))
    }

    fn number(&self, index: usize) -> Result<f64, OrderDecodeError> {
        self.0[index]
            .as_f64()
            .ok_or_else(|| Self::mismatch(index, "a number"))
    }

    fn text(&self, index: usize) -> Result<String, OrderDecodeError> {
        self.0[index]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::mismatch(index, "a string"))
    }
}
