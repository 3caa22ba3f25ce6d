//! Append-only session history.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::session::SessionRecord;
use crate::storage::{keys, KvStore};

/// JSON array of [`SessionRecord`] under `sessionHistory`, oldest first.
///
/// No size cap and no deduplication: committing the same record twice
/// stores it twice.
pub struct SessionHistory {
    store: Arc<dyn KvStore>,
    write_lock: Mutex<()>,
}

impl SessionHistory {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get_session_history(&self) -> Result<Vec<SessionRecord>, StorageError> {
        match self.store.get(keys::SESSION_HISTORY).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::corrupt(keys::SESSION_HISTORY, e.to_string())),
        }
    }

    /// Append and persist the whole sequence. Returns the new length.
    pub async fn add_session_history(&self, record: SessionRecord) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.get_session_history().await?;
        history.push(record);
        let json = serde_json::to_string(&history)
            .map_err(|e| StorageError::corrupt(keys::SESSION_HISTORY, e.to_string()))?;
        self.store.set(keys::SESSION_HISTORY, &json).await?;
        Ok(history.len())
    }
}
