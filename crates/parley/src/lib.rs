//! # Parley
//!
//! Client-side chat conversation cache with a locally persisted view that
//! reconciles with an authoritative remote store.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parley::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let snapshots = SnapshotStore::builder().build()?;
//!     let store = Store::open(snapshots.clone());
//!     let persister = Persister::spawn(&store, snapshots);
//!
//!     let remote = Arc::new(HttpRemoteClient::new("http://localhost:8080")?);
//!     let sync = SyncEngine::new(store.clone(), remote.clone());
//!     sync.sync_list().await;
//!
//!     let conversation = store.new_conversation();
//!     let chat = ChatSession::new(store.clone(), remote);
//!     if let Some(reply) = chat.send_message(&conversation.id, "Hello!").await? {
//!         println!("{}", reply.content);
//!     }
//!
//!     persister.shutdown()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`parley-types`**: conversations, messages, settings and the root state
//! - **`parley-persist`**: durable slots and the snapshot store
//! - **`parley-remote`**: remote conversation and chat services over HTTP
//! - **`parley-store`**: the store handle, sync engine, send path and persister

pub mod prelude;

pub use parley_types::{
    derive_title, now_millis, AppState, Attachment, Conversation, Message, Role, Settings,
    SettingsPatch, Theme, DEFAULT_TITLE, TITLE_MAX_CHARS,
};

pub use parley_persist::{
    DurableSlot, FileSlot, MemorySlot, PersistError, SnapshotStore, SnapshotStoreBuilder,
    SNAPSHOT_KEY, THEME_KEY,
};

pub use parley_remote::{
    ChatReply, ChatRequest, ChatService, ClientFactory, ConversationDetail, ConversationList,
    ConversationService, ConversationSummary, HttpRemoteClient, RemoteClient, RemoteConfig,
    RemoteMessage,
};

pub use parley_store::{
    ChatError, ChatSession, Persister, Store, StoreBuilder, SyncEngine, SyncError, ThemeHook,
};
