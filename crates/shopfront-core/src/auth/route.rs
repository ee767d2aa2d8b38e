use serde::{Deserialize, Serialize};

/// Client-side destinations the screens navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Signup,
    CustomerDashboard,
    SellerDashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::CustomerDashboard => "/dashboard",
            Route::SellerDashboard => "/seller-dashboard",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn test_role_homes() {
        assert_eq!(Role::Customer.home().path(), "/dashboard");
        assert_eq!(Role::Seller.home().path(), "/seller-dashboard");
        assert_eq!(Route::Login.to_string(), "/login");
    }
}
