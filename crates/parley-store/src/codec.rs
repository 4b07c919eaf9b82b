//! Portable export document: `{ conversations, settings, exportedAt }`.

use chrono::{DateTime, Utc};
use parley_types::{AppState, Conversation, Settings};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::store::Store;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRef<'a> {
    conversations: &'a [Conversation],
    settings: &'a Settings,
    exported_at: DateTime<Utc>,
}

/// A parsed import document. Absent or null fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub conversations: Option<Vec<Conversation>>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

impl ImportDocument {
    pub fn parse(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document)
    }

    /// Replace conversations and settings wholesale; the current pointer is
    /// left as it is. Missing conversations become an empty list, missing
    /// settings keep the current ones.
    pub fn apply_to(self, state: &mut AppState) {
        state.conversations = self.conversations.unwrap_or_default();
        if let Some(settings) = self.settings {
            state.settings = settings;
        }
    }
}

/// Serialize conversations and settings as a pretty-printed export document
pub fn export_document(state: &AppState, exported_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportRef {
        conversations: &state.conversations,
        settings: &state.settings,
        exported_at,
    })
}

impl Store {
    /// Export document for the current state
    pub fn export(&self) -> serde_json::Result<String> {
        self.read(|state| export_document(state, Utc::now()))
    }

    /// Import an export document. A document that fails to parse changes
    /// nothing and returns `false`.
    ///
    /// An imported theme that differs from the current one goes through the
    /// same fast path and hook as [`Store::update_settings`].
    pub fn import(&self, document: &str) -> bool {
        let parsed = match ImportDocument::parse(document) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Import rejected, document unreadable: {}", e);
                return false;
            }
        };

        let count = parsed.conversations.as_ref().map_or(0, Vec::len);
        let new_theme = self
            .modify(|state| {
                let before = state.settings.theme;
                parsed.apply_to(state);
                let after = state.settings.theme;
                Some((after != before).then_some(after))
            })
            .flatten();
        info!(conversations = count, "Import applied");

        if let Some(theme) = new_theme {
            self.persist_theme(theme);
            self.apply_theme(theme);
        }
        true
    }
}
