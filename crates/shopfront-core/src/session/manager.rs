use std::sync::Arc;

use super::model::{Role, Session, SessionKey};
use super::repository::SessionStore;
use crate::error::{Result, ShopfrontError};

/// Owns the lifecycle of the persisted session.
///
/// `SessionManager` is responsible for:
/// - Writing a session after successful authentication
/// - Reading individual fields or the whole session back
/// - Clearing everything on logout
///
/// It is constructed once and handed to each screen, so no code reaches
/// storage behind its back.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Persists all present fields of `session`.
    ///
    /// Ids are additive: an absent `customer_id` or `shopkeeper_id` leaves
    /// whatever was stored under that key untouched.
    pub async fn save(&self, session: &Session) -> Result<()> {
        self.store
            .set(SessionKey::Token.as_ref(), session.token.clone())
            .await?;
        self.store
            .set(SessionKey::Username.as_ref(), session.username.clone())
            .await?;
        self.store
            .set(SessionKey::Role.as_ref(), session.role.to_string())
            .await?;
        if let Some(id) = session.customer_id {
            self.store
                .set(SessionKey::CustomerId.as_ref(), id.to_string())
                .await?;
        }
        if let Some(id) = session.shopkeeper_id {
            self.store
                .set(SessionKey::ShopkeeperId.as_ref(), id.to_string())
                .await?;
        }

        tracing::info!(
            "[Session] Saved session for '{}' as {}",
            session.username,
            session.role
        );
        Ok(())
    }

    /// Returns the raw stored value for `key`.
    pub async fn read(&self, key: SessionKey) -> Option<String> {
        self.store.get(key.as_ref()).await
    }

    /// Rebuilds the stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))` when token, username and role are all present
    /// - `Ok(None)` when any of them is missing (logged out)
    /// - `Err(ShopfrontError::Decode)` when a stored value is malformed
    pub async fn load(&self) -> Result<Option<Session>> {
        let (Some(token), Some(username), Some(role)) = (
            self.read(SessionKey::Token).await,
            self.read(SessionKey::Username).await,
            self.read(SessionKey::Role).await,
        ) else {
            return Ok(None);
        };

        let role: Role = role
            .parse()
            .map_err(|_| ShopfrontError::decode(format!("stored role '{role}' is not recognised")))?;

        Ok(Some(Session {
            token,
            username,
            role,
            customer_id: self.read_id(SessionKey::CustomerId).await?,
            shopkeeper_id: self.read_id(SessionKey::ShopkeeperId).await?,
        }))
    }

    /// The persisted seller id, if any.
    pub async fn shopkeeper_id(&self) -> Result<Option<i64>> {
        self.read_id(SessionKey::ShopkeeperId).await
    }

    /// Removes every persisted key unconditionally.
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        tracing::info!("[Session] Cleared session");
        Ok(())
    }

    async fn read_id(&self, key: SessionKey) -> Result<Option<i64>> {
        match self.read(key).await {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
                ShopfrontError::decode(format!("stored {key} '{raw}' is not an integer"))
            }),
        }
    }
}
