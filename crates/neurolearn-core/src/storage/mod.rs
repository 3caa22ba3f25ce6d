mod config;
pub mod database;
pub mod memory;

pub use config::{AssistantConfig, Config, ProgressConfig, SessionConfig, StatsConfig};
pub use database::Database;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};

/// Persisted key layout. The engine is the only writer of these keys.
pub mod keys {
    pub const XP: &str = "xp";
    pub const STREAK: &str = "streak";
    pub const LAST_SESSION_DATE: &str = "lastSessionDate";
    pub const SESSION_HISTORY: &str = "sessionHistory";
}

/// Narrow asynchronous key-value store contract.
///
/// Values are UTF-8 strings (plain or JSON). Any failure of the underlying
/// medium is reported as [`StorageError::Unavailable`]. Implementations
/// assume a single writer per key; callers serialize mutations.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Returns `~/.config/neurolearn[-dev]/` based on NEUROLEARN_ENV.
///
/// Set NEUROLEARN_ENV=dev to use development data directory, or
/// NEUROLEARN_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("NEUROLEARN_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("NEUROLEARN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("neurolearn-dev")
            } else {
                base_dir.join("neurolearn")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
