use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to determine data directory")]
    NoDataDir,

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid stored theme: {0}")]
    InvalidTheme(String),

    #[error("Snapshot version {found} is newer than supported {supported}")]
    VersionTooNew { found: u32, supported: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
