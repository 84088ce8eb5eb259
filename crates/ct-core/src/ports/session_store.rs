//! Client-side session store port
//!
//! Keeps the opaque token and user payload returned by the account API, the
//! way a browser keeps them in local storage.

use async_trait::async_trait;

use crate::auth::AuthSession;

#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Persist the fields present in `session`; absent fields keep their stored value.
    async fn save(&self, session: &AuthSession) -> anyhow::Result<()>;

    /// Stored session, `None` when nothing was ever saved.
    async fn load(&self) -> anyhow::Result<Option<AuthSession>>;

    async fn clear(&self) -> anyhow::Result<()>;
}
