use parley_types::{Attachment, Message, Role, Settings};
use serde::{Deserialize, Serialize};

/// User id sent when the settings carry none
pub const DEFAULT_USER_ID: &str = "default";

/// A history entry as the assistant backend expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
            attachments: message.attachments.clone().unwrap_or_default(),
        }
    }
}

/// One chat turn: the full history plus the caller's settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    pub user_id: String,
    pub use_memory: bool,
    pub use_research: bool,
    pub internet_allowed: bool,
    pub auto_learn: bool,
    pub use_batch_processing: bool,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Sent as a bearer header, never in the body
    #[serde(skip)]
    pub auth_token: Option<String>,
}

impl ChatRequest {
    /// Build a request from a conversation history and the current settings
    pub fn from_history(history: &[Message], settings: &Settings) -> Self {
        Self {
            messages: history.iter().map(WireMessage::from).collect(),
            user_id: settings
                .user_id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            use_memory: settings.use_memory,
            use_research: settings.use_research,
            internet_allowed: settings.internet_access,
            auto_learn: settings.auto_learn,
            use_batch_processing: settings.use_batch_processing,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            auth_token: settings.auth_token.clone().filter(|t| !t.is_empty()),
        }
    }
}

/// Assistant backend reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ChatReply {
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            ok: true,
            answer: answer.into(),
            sources: None,
            metadata: None,
        }
    }

    pub fn with_sources(mut self, sources: Vec<Attachment>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::SettingsPatch;
    use serde_json::json;

    #[test]
    fn test_request_carries_settings() {
        let mut settings = Settings::default();
        settings.apply(
            SettingsPatch::new()
                .use_research(false)
                .internet_access(false)
                .user_id("alice")
                .auth_token("secret"),
        );
        let history = vec![
            Message::user("hi").with_attachments(vec![json!({"file_id": "f1"})]),
            Message::assistant("hello"),
        ];

        let request = ChatRequest::from_history(&history, &settings);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["user_id"], "alice");
        assert_eq!(body["use_memory"], true);
        assert_eq!(body["use_research"], false);
        assert_eq!(body["internet_allowed"], false);
        assert_eq!(body["model"], "gpt-4-turbo-preview");
        assert_eq!(body["messages"][0]["attachments"], json!([{"file_id": "f1"}]));
        assert_eq!(body["messages"][1]["attachments"], json!([]));
        assert!(body.get("auth_token").is_none());
        assert_eq!(request.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_request_defaults_user_id() {
        let request = ChatRequest::from_history(&[], &Settings::default());
        assert_eq!(request.user_id, DEFAULT_USER_ID);
        assert_eq!(request.auth_token, None);
    }

    #[test]
    fn test_reply_parsing() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"ok": true, "answer": "42", "sources": [{"url": "https://a"}], "metadata": {"ms": 12}}"#,
        )
        .unwrap();
        assert!(reply.ok);
        assert_eq!(reply.answer, "42");
        assert_eq!(reply.sources.map(|s| s.len()), Some(1));

        let bare: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(!bare.ok);
    }
}
