//! Client-side conversation state: an owned [`AppState`] behind a [`Store`]
//! handle, kept in sync with a remote conversation store and persisted through
//! a [`Persister`] observing every change.

pub mod builder;
pub mod cache;
pub mod chat;
pub mod codec;
pub mod error;
pub mod persister;
pub mod settings;
pub mod store;
pub mod sync;

pub use builder::StoreBuilder;
pub use chat::ChatSession;
pub use error::{ChatError, SyncError};
pub use persister::Persister;
pub use settings::ThemeHook;
pub use store::Store;
pub use sync::{SyncEngine, DEFAULT_SYNC_LIMIT, UNTITLED};

pub use parley_types::AppState;
