//! In-process access token cache

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::client::{ClientError, MiniProgramClient};

/// Tokens are refreshed this long before WeChat expires them
const REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn new(token: String, expires_in: i64, now: DateTime<Utc>) -> Self {
        let lifetime = (expires_in - REFRESH_MARGIN_SECS).max(0);
        Self {
            token,
            expires_at: now + Duration::seconds(lifetime),
        }
    }

    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Shares one access token between all callers until it nears expiry
pub struct AccessTokenCache {
    client: Arc<MiniProgramClient>,
    cached: RwLock<Option<CachedToken>>,
}

impl AccessTokenCache {
    pub fn new(client: Arc<MiniProgramClient>) -> Self {
        Self {
            client,
            cached: RwLock::new(None),
        }
    }

    /// Cached token if valid, otherwise fetch a fresh one
    pub async fn get(&self) -> Result<String, ClientError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.is_valid(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        let mut slot = self.cached.write().await;
        // another caller may have refreshed while we waited for the lock
        if let Some(cached) = slot.as_ref() {
            if cached.is_valid(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        debug!("Access token missing or expired, fetching");
        let result = self.client.get_access_token(None, None).await?;
        if result.access_token.is_empty() {
            return Err(ClientError::MissingField("access_token"));
        }
        let fresh = CachedToken::new(result.access_token, result.expires_in, Utc::now());
        info!("Refreshed access token, valid until {}", fresh.expires_at);
        let token = fresh.token.clone();
        *slot = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token unconditionally
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Drop the cached token only if it is still `stale`, the token WeChat
    /// rejected (errcode 40001). A token refreshed by another caller is kept.
    pub async fn invalidate_if(&self, stale: &str) {
        let mut slot = self.cached.write().await;
        if slot.as_ref().is_some_and(|cached| cached.token == stale) {
            *slot = None;
        } else {
            debug!("Cached access token already replaced, keeping it");
        }
    }
}
