pub mod chat;
pub mod conversation;
mod timestamp;

pub use chat::{ChatReply, ChatRequest, WireMessage, DEFAULT_USER_ID};
pub use conversation::{ConversationDetail, ConversationList, ConversationSummary, RemoteMessage};
