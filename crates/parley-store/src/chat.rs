use std::sync::Arc;

use parley_remote::{ChatRequest, ChatService};
use parley_types::{now_millis, Message};
use tracing::{debug, warn};

use crate::error::ChatError;
use crate::store::Store;

/// Sends user turns to the assistant and records both sides in the cache
pub struct ChatSession {
    store: Store,
    service: Arc<dyn ChatService>,
}

impl ChatSession {
    pub fn new(store: Store, service: Arc<dyn ChatService>) -> Self {
        Self { store, service }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Append `text` as a user message, ask the assistant, and append its
    /// reply.
    ///
    /// Blank text or an unknown conversation does nothing and yields
    /// `Ok(None)`. The user message is appended before the request and stays
    /// even when the request fails.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<Option<Message>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let user_message = Message::user(text)
            .with_attachments(Vec::new())
            .with_timestamp(now_millis());

        let request = self.store.modify(|state| {
            let settings = state.settings.clone();
            let conversation = state.conversation_mut(conversation_id)?;
            conversation.push_message(user_message);
            Some(ChatRequest::from_history(&conversation.messages, &settings))
        });
        let Some(request) = request else {
            debug!(conversation_id, "Send to unknown conversation ignored");
            return Ok(None);
        };

        debug!(conversation_id, history = request.messages.len(), "Sending chat turn");
        let reply = match self.service.send(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(conversation_id, "Chat request failed: {:#}", e);
                return Err(ChatError::Transport(e));
            }
        };
        if !reply.ok {
            warn!(conversation_id, "Assistant reported failure");
            return Err(ChatError::Rejected {
                metadata: reply.metadata,
            });
        }

        let assistant = Message::assistant(reply.answer)
            .with_attachments(reply.sources.unwrap_or_default())
            .with_timestamp(now_millis());
        if !self.store.append_message(conversation_id, assistant.clone()) {
            debug!(conversation_id, "Conversation removed before the reply arrived");
        }
        Ok(Some(assistant))
    }
}
