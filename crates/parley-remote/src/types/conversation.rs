use chrono::{DateTime, Utc};
use parley_types::Role;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// One entry of a remote conversation listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ConversationSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,
}

impl ConversationList {
    pub fn ok(conversations: Vec<ConversationSummary>) -> Self {
        Self {
            success: true,
            conversations,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

/// A message as returned by the remote history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, with = "timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RemoteMessage {
    pub fn new(role: Role, content: impl Into<String>, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<RemoteMessage>,
}

impl ConversationDetail {
    pub fn ok(messages: Vec<RemoteMessage>) -> Self {
        Self {
            success: true,
            messages,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}
