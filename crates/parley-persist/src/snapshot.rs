use std::sync::Arc;

use parley_types::{AppState, Theme};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PersistError, Result};
use crate::slot::DurableSlot;

/// Key holding the whole application state
pub const SNAPSHOT_KEY: &str = "parley-chat-storage";

/// Key holding the bare theme string, read before the snapshot at startup
pub const THEME_KEY: &str = "parley-theme";

/// Envelope version written with every snapshot
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a AppState,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    state: AppState,
    #[serde(default)]
    version: u32,
}

/// Typed access to the snapshot and theme slots
#[derive(Clone)]
pub struct SnapshotStore {
    slot: Arc<dyn DurableSlot>,
    snapshot_key: String,
    theme_key: String,
}

impl SnapshotStore {
    pub fn new(slot: Arc<dyn DurableSlot>) -> Self {
        Self {
            slot,
            snapshot_key: SNAPSHOT_KEY.to_string(),
            theme_key: THEME_KEY.to_string(),
        }
    }

    pub(crate) fn with_keys(
        slot: Arc<dyn DurableSlot>,
        snapshot_key: String,
        theme_key: String,
    ) -> Self {
        Self {
            slot,
            snapshot_key,
            theme_key,
        }
    }

    pub fn builder() -> crate::builder::SnapshotStoreBuilder {
        crate::builder::SnapshotStoreBuilder::new()
    }

    pub fn slot(&self) -> &Arc<dyn DurableSlot> {
        &self.slot
    }

    /// Write the full state snapshot
    pub fn save_state(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(&EnvelopeRef {
            state,
            version: SNAPSHOT_VERSION,
        })?;
        self.slot.save(&self.snapshot_key, &json)?;
        debug!(
            conversations = state.conversations.len(),
            bytes = json.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Read the state snapshot, `None` on first run
    pub fn load_state(&self) -> Result<Option<AppState>> {
        let Some(raw) = self.slot.load(&self.snapshot_key)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let envelope: Envelope = serde_json::from_str(&raw)?;
        if envelope.version > SNAPSHOT_VERSION {
            return Err(PersistError::VersionTooNew {
                found: envelope.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(Some(envelope.state))
    }

    /// Startup rehydration: the stored state, or defaults when the snapshot is
    /// missing or unreadable
    pub fn load_state_or_default(&self) -> AppState {
        match self.load_state() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No snapshot found, starting with defaults");
                AppState::default()
            }
            Err(e) => {
                warn!("Stored snapshot unreadable, starting with defaults: {}", e);
                AppState::default()
            }
        }
    }

    /// Write the fast-path theme value
    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.slot.save(&self.theme_key, theme.as_str())
    }

    pub fn load_theme(&self) -> Result<Option<Theme>> {
        match self.slot.load(&self.theme_key)? {
            Some(raw) => raw
                .parse::<Theme>()
                .map(Some)
                .map_err(|e| PersistError::InvalidTheme(e.0)),
            None => Ok(None),
        }
    }

    /// Delete both slots
    pub fn wipe(&self) -> Result<()> {
        self.slot.remove(&self.snapshot_key)?;
        self.slot.remove(&self.theme_key)
    }
}
