pub mod config;
pub mod http;
pub mod traits;
pub mod types;

pub use config::{ClientFactory, RemoteConfig};
pub use http::HttpRemoteClient;
pub use traits::{ChatService, ConversationService, RemoteClient};
pub use types::{
    ChatReply, ChatRequest, ConversationDetail, ConversationList, ConversationSummary,
    RemoteMessage, WireMessage, DEFAULT_USER_ID,
};
