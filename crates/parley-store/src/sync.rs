//! Reconciliation with the remote conversation store.
//!
//! Both operations await the remote without holding the state lock and fold
//! the result back in one atomic mutation, so whichever response resolves last
//! wins. Failures leave the cache untouched.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use parley_remote::{ConversationService, ConversationSummary, RemoteMessage};
use parley_types::{now_millis, Conversation, Message};
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::store::Store;

/// Page size requested by [`SyncEngine::sync_list`]
pub const DEFAULT_SYNC_LIMIT: u32 = 100;

/// Title given to remote conversations that have none
pub const UNTITLED: &str = "Untitled";

pub struct SyncEngine {
    store: Store,
    service: Arc<dyn ConversationService>,
    limit: u32,
    offset: u32,
}

impl SyncEngine {
    pub fn new(store: Store, service: Arc<dyn ConversationService>) -> Self {
        Self {
            store,
            service,
            limit: DEFAULT_SYNC_LIMIT,
            offset: 0,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Pull the remote listing and merge it into the cache.
    ///
    /// Returns whether the merge was applied; failures are logged, never raised.
    pub async fn sync_list(&self) -> bool {
        match self.try_sync_list().await {
            Ok(count) => {
                info!(remote = count, "Conversation list synced");
                true
            }
            Err(e) => {
                warn!("Conversation list sync failed: {}", e);
                false
            }
        }
    }

    /// [`sync_list`](Self::sync_list) with the failure reason. Returns the
    /// number of remote conversations merged.
    pub async fn try_sync_list(&self) -> Result<usize, SyncError> {
        let listing = self.service.list(self.limit, self.offset).await?;
        if !listing.success {
            return Err(SyncError::Rejected);
        }

        let now = now_millis();
        let stubs: Vec<Conversation> = listing
            .conversations
            .into_iter()
            .map(|summary| stub_from_summary(summary, now))
            .collect();
        let count = stubs.len();

        self.store.modify(|state| {
            let local = std::mem::take(&mut state.conversations);
            state.conversations = merge_remote(stubs, local);
            Some(())
        });
        Ok(count)
    }

    /// Fetch one conversation's history and install it wholesale.
    ///
    /// Returns whether the history was installed.
    pub async fn hydrate(&self, conversation_id: &str) -> bool {
        match self.try_hydrate(conversation_id).await {
            Ok(count) => {
                debug!(conversation_id, messages = count, "Conversation hydrated");
                true
            }
            Err(SyncError::Vanished(id)) => {
                debug!(conversation_id = %id, "Conversation removed during hydration, result dropped");
                false
            }
            Err(e) => {
                warn!(conversation_id, "Hydration failed: {}", e);
                false
            }
        }
    }

    /// [`hydrate`](Self::hydrate) with the failure reason. Returns the number
    /// of messages installed.
    pub async fn try_hydrate(&self, conversation_id: &str) -> Result<usize, SyncError> {
        let detail = self.service.get(conversation_id).await?;
        if !detail.success {
            return Err(SyncError::Rejected);
        }

        let messages: Vec<Message> = detail.messages.into_iter().map(message_from_remote).collect();
        let count = messages.len();

        self.store
            .modify(|state| {
                let conversation = state.conversation_mut(conversation_id)?;
                conversation.messages = messages;
                Some(())
            })
            .ok_or_else(|| SyncError::Vanished(conversation_id.to_string()))?;
        Ok(count)
    }
}

/// Remote stubs in remote order, then local conversations the remote does not
/// know about. Shared ids are replaced by the remote stub.
pub fn merge_remote(remote: Vec<Conversation>, local: Vec<Conversation>) -> Vec<Conversation> {
    let remote_ids: HashSet<String> = remote.iter().map(|c| c.id.clone()).collect();
    let mut merged = remote;
    merged.extend(local.into_iter().filter(|c| !remote_ids.contains(&c.id)));
    merged
}

fn stub_from_summary(summary: ConversationSummary, now: DateTime<Utc>) -> Conversation {
    let created_at = summary.created_at.map(|t| t.trunc_subsecs(3)).unwrap_or(now);
    let updated_at = summary
        .updated_at
        .map(|t| t.trunc_subsecs(3))
        .unwrap_or(now)
        .max(created_at);
    let title = summary
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    Conversation::stub(summary.id, title, created_at, updated_at)
}

fn message_from_remote(remote: RemoteMessage) -> Message {
    let timestamp = remote.timestamp.map(|t| t.trunc_subsecs(3));
    let stamp = timestamp
        .map(|t| t.timestamp_millis().to_string())
        .unwrap_or_default();

    let message = Message::new(remote.role, remote.content).with_id(format!("{}-{}", stamp, remote.role));
    match timestamp {
        Some(t) => message.with_timestamp(t),
        None => message,
    }
}
