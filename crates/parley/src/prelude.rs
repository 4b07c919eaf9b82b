//! Prelude module for convenient imports
//!
//! ```rust
//! use parley::prelude::*;
//! ```

pub use crate::{
    AppState, Conversation, Message, Role, Settings, SettingsPatch, Theme,
    SnapshotStore, PersistError,
    ChatService, ClientFactory, ConversationService, HttpRemoteClient, RemoteClient, RemoteConfig,
    ChatError, ChatSession, Persister, Store, SyncEngine,
};
