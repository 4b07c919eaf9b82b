use crate::error::Result;

/// Trait for durable key/value storage
///
/// Implementations hold whole string values under fixed keys, like a browser's
/// local storage. Calls are synchronous and expected to be cheap: the theme
/// slot is written inline while a settings update runs.
pub trait DurableSlot: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever saved
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`; missing keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}
