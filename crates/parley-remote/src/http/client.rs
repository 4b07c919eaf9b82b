// HTTP binding for the conversation store and assistant backend

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::traits::{ChatService, ConversationService, RemoteClient};
use crate::types::{ChatReply, ChatRequest, ConversationDetail, ConversationList};

/// Client for the chat backend's REST API
pub struct HttpRemoteClient {
    http_client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpRemoteClient {
    /// Create a client with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&RemoteConfig::new(base_url))
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        let base_url = Url::parse(&config.normalized_base_url()?)
            .context("Invalid remote base URL")?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Remote base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token.or(self.auth_token.as_deref()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("{} API error ({}): {}", what, status, error_text);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }
}

#[async_trait]
impl ConversationService for HttpRemoteClient {
    async fn list(&self, limit: u32, offset: u32) -> Result<ConversationList> {
        let url = self.endpoint(&["api", "conversations"])?;
        debug!(%url, limit, offset, "listing remote conversations");

        let response = self
            .authorize(self.http_client.get(url), None)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response, "Conversation list").await
    }

    async fn get(&self, conversation_id: &str) -> Result<ConversationDetail> {
        let url = self.endpoint(&["api", "conversations", conversation_id])?;
        debug!(%url, "fetching remote conversation");

        let response = self
            .authorize(self.http_client.get(url), None)
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response, "Conversation").await
    }
}

#[async_trait]
impl ChatService for HttpRemoteClient {
    async fn send(&self, request: ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint(&["api", "chat", "assistant"])?;
        debug!(%url, messages = request.messages.len(), "sending chat turn");

        let response = self
            .authorize(self.http_client.post(url), request.auth_token.as_deref())
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response, "Assistant").await
    }
}

impl RemoteClient for HttpRemoteClient {}
