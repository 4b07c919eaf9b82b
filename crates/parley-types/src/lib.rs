//! Core data model shared by every Parley crate.
//!
//! Everything here is plain data: the mutation rules live in `parley-store`.
//! Field names serialize in camelCase and timestamps as epoch milliseconds so
//! a snapshot written by one client can be read back by another.

pub mod conversation;
pub mod message;
pub mod settings;
pub mod state;

pub use conversation::{derive_title, now_millis, Conversation, DEFAULT_TITLE, TITLE_MAX_CHARS};
pub use message::{Attachment, Message, Role};
pub use settings::{ParseThemeError, Settings, SettingsPatch, Theme};
pub use state::AppState;
