//! File-based session store
//!
//! Keeps the auth token and the raw user payload in a small JSON file, the
//! desktop counterpart of the browser's `authToken` / `user` storage keys.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use ct_core::auth::AuthSession;
use ct_core::ports::SessionStorePort;

pub const DEFAULT_SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl From<StoredSession> for AuthSession {
    fn from(stored: StoredSession) -> Self {
        AuthSession {
            token: stored.auth_token,
            user: stored.user,
        }
    }
}

pub struct FileSessionStore {
    session_file_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(session_file_path: PathBuf) -> Self {
        Self { session_file_path }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            session_file_path: base_dir.join(DEFAULT_SESSION_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.session_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn read_stored(&self) -> anyhow::Result<Option<StoredSession>> {
        if !fs::try_exists(&self.session_file_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.session_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse session file: {e}"))?;
        Ok(Some(stored))
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn save(&self, session: &AuthSession) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        // An unreadable file is replaced rather than blocking the save.
        let mut stored = match self.read_stored().await {
            Ok(existing) => existing.unwrap_or_default(),
            Err(err) => {
                log::warn!("Discarding unreadable session file: {err}");
                StoredSession::default()
            }
        };
        if let Some(token) = &session.token {
            stored.auth_token = Some(token.clone());
        }
        if let Some(user) = &session.user {
            stored.user = Some(user.clone());
        }

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| anyhow::anyhow!("Failed to serialize session: {e}"))?;

        let mut file = fs::File::create(&self.session_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create session file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write session file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync session file: {e}"))?;

        log::debug!(
            "Session saved to {}",
            self.session_file_path.display()
        );
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        Ok(self.read_stored().await?.map(AuthSession::from))
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.session_file_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(anyhow::anyhow!("Failed to remove session file: {err}")),
        }
    }
}
