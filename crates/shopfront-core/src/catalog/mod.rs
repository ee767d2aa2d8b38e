//! Seller catalog: products, the product form buffer, and orders.

mod order;
mod product;

pub use order::{ORDER_FIELDS, Order, OrderDecodeError, OrderStatus};
pub use product::{DraftField, Price, Product, ProductDraft, ProductValidationError, Rating};
