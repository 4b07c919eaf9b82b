use std::sync::Arc;

use parley_persist::SnapshotStore;
use parley_types::{AppState, Conversation, Message, Settings};
use tokio::sync::watch;
use tracing::debug;

use crate::builder::StoreBuilder;
use crate::cache;
use crate::settings::ThemeHook;

/// Shared handle to the application state.
///
/// Cloning is cheap and every clone sees the same state. Mutators run to
/// completion under the channel lock and never await, so each one is atomic
/// with respect to the others.
#[derive(Clone)]
pub struct Store {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) state: watch::Sender<AppState>,
    pub(crate) snapshots: Option<SnapshotStore>,
    pub(crate) theme_hook: Option<ThemeHook>,
}

impl Store {
    /// In-memory store starting from `state`
    pub fn new(state: AppState) -> Self {
        Self::builder().initial_state(state).build()
    }

    /// Rehydrate from durable storage
    pub fn open(snapshots: SnapshotStore) -> Self {
        Self::builder().snapshot_store(snapshots).open()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_parts(
        state: AppState,
        snapshots: Option<SnapshotStore>,
        theme_hook: Option<ThemeHook>,
    ) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                state,
                snapshots,
                theme_hook,
            }),
        }
    }

    /// Observe every state change. The receiver starts with the current
    /// state marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot_store(&self) -> Option<&SnapshotStore> {
        self.inner.snapshots.as_ref()
    }

    /// Run `f` against the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Apply `f` under the lock; subscribers are notified only when it
    /// returns `Some`.
    pub(crate) fn modify<R>(&self, f: impl FnOnce(&mut AppState) -> Option<R>) -> Option<R> {
        let mut result = None;
        self.inner.state.send_if_modified(|state| {
            result = f(state);
            result.is_some()
        });
        result
    }

    // Queries

    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.read(|s| s.conversations.clone())
    }

    pub fn conversation(&self, id: &str) -> Option<Conversation> {
        self.read(|s| s.conversation(id).cloned())
    }

    pub fn current_conversation_id(&self) -> Option<String> {
        self.read(|s| s.current_conversation_id.clone())
    }

    pub fn current_conversation(&self) -> Option<Conversation> {
        self.read(|s| s.current_conversation().cloned())
    }

    pub fn settings(&self) -> Settings {
        self.read(|s| s.settings.clone())
    }

    // Conversation cache

    pub fn create_conversation(&self, conversation: Conversation) {
        debug!(id = %conversation.id, "Creating conversation");
        self.modify(|state| {
            cache::create(state, conversation);
            Some(())
        });
    }

    /// Create an empty local conversation, make it current and return it
    pub fn new_conversation(&self) -> Conversation {
        let conversation = Conversation::new_local();
        self.create_conversation(conversation.clone());
        conversation
    }

    pub fn delete_conversation(&self, id: &str) -> bool {
        let removed = self
            .modify(|state| cache::delete(state, id).then_some(()))
            .is_some();
        debug!(id, removed, "Delete conversation");
        removed
    }

    pub fn set_current_conversation(&self, id: impl Into<String>) {
        let id = id.into();
        self.modify(|state| {
            cache::set_current(state, id);
            Some(())
        });
    }

    pub fn append_message(&self, conversation_id: &str, message: Message) -> bool {
        let found = self
            .modify(|state| cache::append_message(state, conversation_id, message).then_some(()))
            .is_some();
        if !found {
            debug!(conversation_id, "Append to unknown conversation ignored");
        }
        found
    }

    pub fn clear_conversations(&self) {
        self.modify(|state| {
            cache::clear(state);
            Some(())
        });
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.read(|state| {
            f.debug_struct("Store")
                .field("conversations", &state.conversations.len())
                .field("current_conversation_id", &state.current_conversation_id)
                .field("persistent", &self.inner.snapshots.is_some())
                .finish()
        })
    }
}
