use thiserror::Error;

/// Failure of a remote sync or hydrate round-trip.
///
/// Never surfaces past [`SyncEngine`](crate::SyncEngine)'s boolean API; the
/// `try_*` variants expose it for callers that want the reason.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("remote request failed: {0:#}")]
    Remote(#[from] anyhow::Error),

    #[error("remote reported failure")]
    Rejected,

    #[error("conversation '{0}' no longer exists locally")]
    Vanished(String),
}

/// Failure of a chat turn, shown to the user inline
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0:#}")]
    Transport(#[source] anyhow::Error),

    #[error("assistant could not answer")]
    Rejected {
        metadata: Option<serde_json::Value>,
    },
}
