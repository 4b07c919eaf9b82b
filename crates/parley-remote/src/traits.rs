use anyhow::Result;
use async_trait::async_trait;

use crate::types::{ChatReply, ChatRequest, ConversationDetail, ConversationList};

/// Authoritative store of conversations
///
/// A response with `success == false` and an `Err` are equivalent failures to
/// callers; implementations should not retry.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// List conversation summaries, newest first
    async fn list(&self, limit: u32, offset: u32) -> Result<ConversationList>;

    /// Full message history of one conversation
    async fn get(&self, conversation_id: &str) -> Result<ConversationDetail>;
}

/// Assistant backend answering a conversation turn
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send the whole history and return the assistant's reply.
    ///
    /// `ok == false` in the reply is a failure, same as an `Err`.
    async fn send(&self, request: ChatRequest) -> Result<ChatReply>;
}

/// Convenience trait for clients that talk to both services
pub trait RemoteClient: ConversationService + ChatService {}
