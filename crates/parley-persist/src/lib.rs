pub mod builder;
pub mod error;
pub mod slot;
pub mod slots;
pub mod snapshot;

pub use builder::SnapshotStoreBuilder;
pub use error::{PersistError, Result};
pub use slot::DurableSlot;
pub use slots::{FileSlot, MemorySlot};
pub use snapshot::{SnapshotStore, SNAPSHOT_KEY, SNAPSHOT_VERSION, THEME_KEY};
