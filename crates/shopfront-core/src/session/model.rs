//! Session domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::auth::Route;

/// Client-selected account type.
///
/// Chosen by the user on the login/signup screens; it selects the endpoint
/// and the post-login destination. The backend never echoes it back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Seller,
}

impl Role {
    /// Flips between customer and seller.
    pub fn toggle(self) -> Self {
        match self {
            Role::Customer => Role::Seller,
            Role::Seller => Role::Customer,
        }
    }

    /// Login endpoint for this role.
    pub fn login_path(self) -> &'static str {
        match self {
            Role::Customer => "/api/auth/customer/login",
            Role::Seller => "/api/auth/shopkeeper/login",
        }
    }

    /// Signup endpoint for this role.
    pub fn signup_path(self) -> &'static str {
        match self {
            Role::Customer => "/api/auth/customer/signup",
            Role::Seller => "/api/auth/shopkeeper/signup",
        }
    }

    /// Where a freshly authenticated user of this role lands.
    pub fn home(self) -> Route {
        match self {
            Role::Customer => Route::CustomerDashboard,
            Role::Seller => Route::SellerDashboard,
        }
    }
}

/// Keys under which a session is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
pub enum SessionKey {
    #[strum(serialize = "token")]
    Token,
    #[strum(serialize = "username")]
    Username,
    #[strum(serialize = "role")]
    Role,
    #[strum(serialize = "customerId")]
    CustomerId,
    #[strum(serialize = "shopkeeperId")]
    ShopkeeperId,
}

/// The client-held record of an authenticated identity.
///
/// No expiry is tracked: the token is assumed valid until the backend
/// rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopkeeper_id: Option<i64>,
}
