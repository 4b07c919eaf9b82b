use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::slot::DurableSlot;
use crate::slots::{FileSlot, MemorySlot};
use crate::snapshot::{SnapshotStore, SNAPSHOT_KEY, THEME_KEY};

enum Backend {
    DefaultDir,
    Dir(PathBuf),
    Memory,
    Custom(Arc<dyn DurableSlot>),
}

pub struct SnapshotStoreBuilder {
    backend: Backend,
    snapshot_key: String,
    theme_key: String,
}

impl SnapshotStoreBuilder {
    pub fn new() -> Self {
        Self {
            backend: Backend::DefaultDir,
            snapshot_key: SNAPSHOT_KEY.to_string(),
            theme_key: THEME_KEY.to_string(),
        }
    }

    /// Store files under `dir` instead of the platform data directory
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backend = Backend::Dir(dir.into());
        self
    }

    /// Keep everything in memory (nothing survives the process)
    pub fn in_memory(mut self) -> Self {
        self.backend = Backend::Memory;
        self
    }

    pub fn slot(mut self, slot: Arc<dyn DurableSlot>) -> Self {
        self.backend = Backend::Custom(slot);
        self
    }

    /// Override the snapshot key, e.g. to keep one snapshot per profile
    pub fn snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    pub fn theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = key.into();
        self
    }

    pub fn build(self) -> Result<SnapshotStore> {
        let slot: Arc<dyn DurableSlot> = match self.backend {
            Backend::DefaultDir => Arc::new(FileSlot::new()?),
            Backend::Dir(dir) => Arc::new(FileSlot::with_dir(dir)),
            Backend::Memory => Arc::new(MemorySlot::new()),
            Backend::Custom(slot) => slot,
        };

        Ok(SnapshotStore::with_keys(slot, self.snapshot_key, self.theme_key))
    }
}

impl Default for SnapshotStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
