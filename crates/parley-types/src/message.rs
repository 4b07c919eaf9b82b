use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque attachment reference (a file handle or a cited source).
pub type Attachment = serde_json::Value;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation. Never mutated after it has been appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Rendering key assigned by hydration; not unique across conversations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub role: Role,

    /// Raw text, may contain markdown
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            content: content.into(),
            attachments: None,
            timestamp: None,
        }
    }

    /// Create user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    /// Set the timestamp, truncated to the millisecond precision it is stored with
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp.trunc_subsecs(3));
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "user", "content": "hi" }));
    }

    #[test]
    fn test_timestamp_is_epoch_millis() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let msg = Message::assistant("ok").with_timestamp(ts);

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["timestamp"], serde_json::json!(1_700_000_000_123i64));

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back.timestamp, Some(ts));
    }

    #[test]
    fn test_clock_timestamp_survives_serialization() {
        let msg = Message::user("now").with_timestamp(Utc::now());

        let back: Message = serde_json::from_value(serde_json::to_value(&msg).unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_deserialize_with_attachments() {
        let msg: Message = serde_json::from_str(
            r#"{"role":"assistant","content":"see","attachments":[{"url":"https://example.com"}]}"#,
        )
        .unwrap();

        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.attachments.as_ref().map(Vec::len), Some(1));
        assert!(msg.id.is_none());
    }
}
