use std::sync::Arc;

use anyhow::{Context as _, Result};
use parley_persist::SnapshotStore;
use parley_remote::{HttpRemoteClient, RemoteConfig};
use parley_store::{ChatSession, Persister, Store, SyncEngine};
use tracing::debug;

use crate::config::Config;

/// Everything a command needs, wired once at startup.
///
/// The store handle is shared by the sync engine and the chat session so both
/// fold their results into the same state.
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Store,
    pub sync: SyncEngine,
    pub chat: ChatSession,
    persister: Persister,
}

impl AppContext {
    /// Open the configured snapshot store and connect the remote client
    pub fn open(config: Config) -> Result<Self> {
        let snapshots = config
            .snapshot_store()
            .context("Failed to open snapshot storage")?;
        Self::with_snapshots(config, snapshots)
    }

    pub fn with_snapshots(config: Config, snapshots: SnapshotStore) -> Result<Self> {
        let store = Store::builder()
            .snapshot_store(snapshots.clone())
            .theme_hook(|theme| debug!(%theme, "Theme applied"))
            .open();
        let persister = Persister::spawn(&store, snapshots);

        let remote = Arc::new(HttpRemoteClient::from_config(&RemoteConfig::from(&config))?);
        let sync = SyncEngine::new(store.clone(), remote.clone()).with_limit(config.remote.page_size);
        let chat = ChatSession::new(store.clone(), remote);

        Ok(Self {
            config: Arc::new(config),
            store,
            sync,
            chat,
            persister,
        })
    }

    /// Write the final snapshot
    pub fn close(self) -> Result<()> {
        self.persister
            .shutdown()
            .context("Failed to write final snapshot")
    }
}
