//! Application state

use common::Config;
use std::sync::Arc;
use wechat::{AccessTokenCache, MiniProgramClient};

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub client: Arc<MiniProgramClient>,
    pub access_token: AccessTokenCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = MiniProgramClient::from_config(&config);
        Self::with_client(config, client)
    }

    pub fn with_client(config: Config, client: MiniProgramClient) -> Self {
        let client = Arc::new(client);
        let access_token = AccessTokenCache::new(client.clone());
        Self {
            config,
            client,
            access_token,
        }
    }
}
