use std::sync::{Arc, Mutex, PoisonError};

use parley_persist::{PersistError, SnapshotStore};
use parley_types::AppState;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::store::Store;

/// Background task writing a snapshot after every state change.
///
/// Writes never block mutators and failures only get logged. Bursts of
/// changes collapse into a single write of the latest state.
pub struct Persister {
    writer: Arc<SnapshotWriter>,
    rx: watch::Receiver<AppState>,
    handle: JoinHandle<()>,
}

/// Serializes writes and always writes the state current at write time, so a
/// slow background write can never overwrite a newer flush.
struct SnapshotWriter {
    snapshots: SnapshotStore,
    gate: Mutex<()>,
}

impl SnapshotWriter {
    fn write_latest(&self, rx: &watch::Receiver<AppState>) -> Result<(), PersistError> {
        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        let state = rx.borrow().clone();
        self.snapshots.save_state(&state)
    }
}

impl Persister {
    /// Start observing `store`. Must be called inside a Tokio runtime.
    pub fn spawn(store: &Store, snapshots: SnapshotStore) -> Self {
        let writer = Arc::new(SnapshotWriter {
            snapshots,
            gate: Mutex::new(()),
        });
        let rx = store.subscribe();
        let handle = tokio::spawn(Self::run(rx.clone(), Arc::clone(&writer)));
        debug!("Persister started");

        Self { writer, rx, handle }
    }

    async fn run(mut rx: watch::Receiver<AppState>, writer: Arc<SnapshotWriter>) {
        while rx.changed().await.is_ok() {
            rx.borrow_and_update();
            let writer = Arc::clone(&writer);
            let latest = rx.clone();

            match tokio::task::spawn_blocking(move || writer.write_latest(&latest)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Failed to write snapshot: {}", e),
                Err(e) => error!("Snapshot writer panicked: {}", e),
            }
        }
    }

    /// Write the current state now, on the calling thread
    pub fn flush(&self) -> Result<(), PersistError> {
        self.writer.write_latest(&self.rx)
    }

    /// Stop observing and write the final state
    pub fn shutdown(self) -> Result<(), PersistError> {
        self.handle.abort();
        self.flush()?;
        debug!("Persister stopped");
        Ok(())
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
