use std::sync::Arc;

use parley_persist::SnapshotStore;
use parley_types::{AppState, Theme};
use tracing::{debug, info, warn};

use crate::settings::ThemeHook;
use crate::store::Store;

/// Builder for a [`Store`] with optional persistence and theme hook
pub struct StoreBuilder {
    initial_state: Option<AppState>,
    snapshots: Option<SnapshotStore>,
    theme_hook: Option<ThemeHook>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            initial_state: None,
            snapshots: None,
            theme_hook: None,
        }
    }

    /// Start from this state instead of defaults. Ignored by [`open`](Self::open).
    pub fn initial_state(mut self, state: AppState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Durable storage for the theme fast path and rehydration
    pub fn snapshot_store(mut self, snapshots: SnapshotStore) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    /// Called with the theme at startup and on every theme change
    pub fn theme_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        self.theme_hook = Some(Arc::new(hook));
        self
    }

    /// Build without reading durable storage
    pub fn build(self) -> Store {
        let state = self.initial_state.unwrap_or_default();
        Store::from_parts(state, self.snapshots, self.theme_hook)
    }

    /// Build and rehydrate from the snapshot store.
    ///
    /// The fast-path theme is read and applied first so the presentation layer
    /// never renders with the wrong theme. It then overrides the snapshot's
    /// theme, which may lag behind it. A missing or unreadable snapshot yields
    /// the default state.
    pub fn open(self) -> Store {
        let Some(snapshots) = self.snapshots else {
            return Store::from_parts(self.initial_state.unwrap_or_default(), None, self.theme_hook);
        };

        let fast_theme = match snapshots.load_theme() {
            Ok(theme) => theme,
            Err(e) => {
                warn!("Stored theme unreadable, ignoring: {}", e);
                None
            }
        };
        if let (Some(theme), Some(hook)) = (fast_theme, &self.theme_hook) {
            debug!(%theme, "Applying stored theme");
            hook(theme);
        }

        let mut state = snapshots.load_state_or_default();
        match fast_theme {
            Some(theme) => state.settings.theme = theme,
            None => {
                if let Some(hook) = &self.theme_hook {
                    hook(state.settings.theme);
                }
            }
        }

        info!(
            conversations = state.conversations.len(),
            current = ?state.current_conversation_id,
            "Store rehydrated"
        );
        Store::from_parts(state, Some(snapshots), self.theme_hook)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
