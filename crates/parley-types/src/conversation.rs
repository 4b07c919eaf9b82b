use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Title given to a locally created conversation until its first message arrives
pub const DEFAULT_TITLE: &str = "New Conversation";

/// Number of characters of the first message used as the automatic title
pub const TITLE_MAX_CHARS: usize = 50;

/// A conversation as held by the local cache.
///
/// An empty `messages` list does not mean the conversation has no history:
/// records produced by a remote listing are stubs until they are hydrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create an empty conversation with the given id
    pub fn new(id: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an empty conversation whose id is the current clock reading in
    /// milliseconds. Callers creating several per millisecond must pick ids
    /// themselves.
    pub fn new_local() -> Self {
        let now = now_millis();
        let mut conv = Self::new(now.timestamp_millis().to_string());
        conv.created_at = now;
        conv.updated_at = now;
        conv
    }

    /// Metadata-only record awaiting hydration. Timestamps are truncated to
    /// milliseconds.
    pub fn stub(
        id: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: Vec::new(),
            created_at: created_at.trunc_subsecs(3),
            updated_at: updated_at.trunc_subsecs(3),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a message, bump `updated_at`, and derive the title when this is
    /// the first message of an empty conversation.
    pub fn push_message(&mut self, message: Message) {
        if self.messages.is_empty() {
            self.title = derive_title(&message.content);
        }
        self.messages.push(message);
        self.touch();
    }

    /// Set `updated_at` to now, never earlier than `created_at`
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.created_at);
    }
}

/// Current time truncated to the millisecond precision timestamps are stored with
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// First [`TITLE_MAX_CHARS`] characters of `content`
pub fn derive_title(content: &str) -> String {
    content.chars().take(TITLE_MAX_CHARS).collect()
}
