// Configuration layer for building remote clients

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::http::HttpRemoteClient;
use crate::traits::{ChatService, ConversationService, RemoteClient};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where the conversation store and assistant backend live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    /// Bearer token used when a request carries none of its own
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.auth_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(trimmed)
            .with_context(|| format!("Invalid remote base URL: {}", self.base_url))?;
        Ok(trimmed.to_string())
    }
}

/// Factory for creating remote clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a client for both remote services
    pub fn create_client(config: RemoteConfig) -> Result<Arc<dyn RemoteClient>> {
        let client = HttpRemoteClient::from_config(&config)?;
        Ok(Arc::new(client))
    }

    /// Create a conversation store client
    pub fn create_conversation_service(
        config: RemoteConfig,
    ) -> Result<Arc<dyn ConversationService>> {
        let client = HttpRemoteClient::from_config(&config)?;
        Ok(Arc::new(client))
    }

    /// Create an assistant backend client
    pub fn create_chat_service(config: RemoteConfig) -> Result<Arc<dyn ChatService>> {
        let client = HttpRemoteClient::from_config(&config)?;
        Ok(Arc::new(client))
    }
}
