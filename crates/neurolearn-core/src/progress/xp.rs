//! XP ledger.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::storage::{keys, KvStore};

/// XP credited for one completed session unless configured otherwise.
pub const DEFAULT_SESSION_REWARD: u64 = 10;

/// Non-negative experience counter persisted under `xp`.
pub struct XpLedger {
    store: Arc<dyn KvStore>,
    session_reward: u64,
    write_lock: Mutex<()>,
}

impl XpLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_reward(store, DEFAULT_SESSION_REWARD)
    }

    pub fn with_reward(store: Arc<dyn KvStore>, session_reward: u64) -> Self {
        Self {
            store,
            session_reward,
            write_lock: Mutex::new(()),
        }
    }

    pub fn session_reward(&self) -> u64 {
        self.session_reward
    }

    /// Current XP, 0 when never written.
    pub async fn get_xp(&self) -> Result<u64, StorageError> {
        match self.store.get(keys::XP).await? {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| StorageError::corrupt(keys::XP, format!("'{raw}': {e}"))),
        }
    }

    /// Add `amount` and return the persisted total.
    ///
    /// The read-modify-write holds the ledger lock, so concurrent callers
    /// on the same ledger cannot lose an update.
    pub async fn add_xp(&self, amount: u64) -> Result<u64, StorageError> {
        let _guard = self.write_lock.lock().await;
        let total = self.get_xp().await?.saturating_add(amount);
        self.store.set(keys::XP, &total.to_string()).await?;
        Ok(total)
    }

    /// Credit one completed session.
    pub async fn add_session_reward(&self) -> Result<u64, StorageError> {
        self.add_xp(self.session_reward).await
    }
}
