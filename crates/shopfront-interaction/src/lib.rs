//! Outbound adapters that talk to the shop backend.

pub mod rest_shop_api;

pub use rest_shop_api::RestShopApi;
