use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::slot::DurableSlot;

/// In-process slot, used in tests and for ephemeral sessions
#[derive(Debug, Default)]
pub struct MemorySlot {
    store: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, to exercise write-failure paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.read().ok()?.get(key).cloned()
    }

    fn poisoned() -> PersistError {
        PersistError::Internal("memory slot lock poisoned".to_string())
    }
}

impl DurableSlot for MemorySlot {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let store = self.store.read().map_err(|_| Self::poisoned())?;
        Ok(store.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistError::Internal(format!("write to '{}' rejected", key)));
        }
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;
        store.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;
        store.remove(key);
        Ok(())
    }
}
