use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::settings::Settings;

/// Root aggregate: the unit that is persisted, exported and observed.
///
/// `conversations` is ordered most-recently-created first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub current_conversation_id: Option<String>,
    #[serde(default)]
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            conversations: Vec::new(),
            current_conversation_id: None,
            settings,
        }
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// The conversation the pointer refers to, if it exists
    pub fn current_conversation(&self) -> Option<&Conversation> {
        self.current_conversation_id
            .as_deref()
            .and_then(|id| self.conversation(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversation(id).is_some()
    }
}
