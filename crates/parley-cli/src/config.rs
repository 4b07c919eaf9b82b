use config::{Config as ConfigLoader, ConfigError, Environment, File};
use parley_persist::{PersistError, SnapshotStore};
use parley_remote::RemoteConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(skip_deserializing)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_timeout_secs() -> u64 {
    parley_remote::config::DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    parley_store::DEFAULT_SYNC_LIMIT
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            base_url: parley_remote::config::DEFAULT_BASE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Snapshot directory; the platform data directory when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl From<&Config> for RemoteConfig {
    fn from(config: &Config) -> Self {
        let remote = RemoteConfig::new(config.remote.base_url.clone())
            .with_timeout_secs(config.remote.timeout_secs);
        match &config.auth_token {
            Some(token) => remote.with_auth_token(token.clone()),
            None => remote,
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (`PARLEY_REMOTE__BASE_URL`, `PARLEY_LOGGING__LEVEL`, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("config"), &env)
    }

    /// Same layering as [`load`](Self::load) with an explicit config directory
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::from(dir.join("default")).required(false))
            // 2. Load environment-specific config
            .add_source(File::from(dir.join(env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::with_prefix("PARLEY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.auth_token = std::env::var("PARLEY_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Snapshot store rooted at the configured directory
    pub fn snapshot_store(&self) -> Result<SnapshotStore, PersistError> {
        let builder = SnapshotStore::builder();
        match &self.storage.dir {
            Some(dir) => builder.dir(dir.clone()).build(),
            None => builder.build(),
        }
    }
}
