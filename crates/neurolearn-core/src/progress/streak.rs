//! Daily streak tracking.
//!
//! A streak grows by one for each consecutive calendar day that has at
//! least one completed session. It is evaluated purely from the stored
//! `lastSessionDate`, so app restarts and multi-day gaps need no
//! background bookkeeping.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::error::StorageError;
use crate::storage::{keys, KvStore};

/// Value written by [`StreakTracker::reset_streak`].
pub const STREAK_RESET_VALUE: u32 = 0;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a session affected the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// A session was already counted today.
    AlreadyCounted,
    /// Last session was yesterday.
    Extended,
    /// No previous session, or the chain was broken.
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub streak: u32,
    pub outcome: StreakOutcome,
}

/// Continuity rule, independent of storage.
///
/// A `last` date in the future (clock moved backwards) is treated as a
/// broken chain.
pub fn next_streak(current: u32, last: Option<NaiveDate>, today: NaiveDate) -> StreakUpdate {
    match last {
        Some(last) if last == today => StreakUpdate {
            streak: current,
            outcome: StreakOutcome::AlreadyCounted,
        },
        Some(last) if today.pred_opt() == Some(last) => StreakUpdate {
            streak: current.saturating_add(1),
            outcome: StreakOutcome::Extended,
        },
        _ => StreakUpdate {
            streak: 1,
            outcome: StreakOutcome::Restarted,
        },
    }
}

/// Persists `streak` and `lastSessionDate`.
pub struct StreakTracker {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl StreakTracker {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get_streak(&self) -> Result<u32, StorageError> {
        match self.store.get(keys::STREAK).await? {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| StorageError::corrupt(keys::STREAK, format!("'{raw}': {e}"))),
        }
    }

    pub async fn get_last_session_date(&self) -> Result<Option<NaiveDate>, StorageError> {
        match self.store.get(keys::LAST_SESSION_DATE).await? {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(Some)
                .map_err(|e| {
                    StorageError::corrupt(keys::LAST_SESSION_DATE, format!("'{raw}': {e}"))
                }),
        }
    }

    /// Credit today's session to the streak using the injected clock.
    pub async fn record_session_for_streak(&self) -> Result<StreakUpdate, StorageError> {
        self.record_session_on(self.clock.today()).await
    }

    /// Credit a session completed on `today`.
    ///
    /// Writes `lastSessionDate` before `streak`. If the streak write fails
    /// the day is already marked as counted, so a retry leaves the stale
    /// streak alone instead of crediting the day twice.
    pub async fn record_session_on(&self, today: NaiveDate) -> Result<StreakUpdate, StorageError> {
        let _guard = self.write_lock.lock().await;
        let last = self.get_last_session_date().await?;
        let current = self.get_streak().await?;
        let update = next_streak(current, last, today);

        if update.outcome != StreakOutcome::AlreadyCounted {
            self.store
                .set(
                    keys::LAST_SESSION_DATE,
                    &today.format(DATE_FORMAT).to_string(),
                )
                .await?;
            self.store
                .set(keys::STREAK, &update.streak.to_string())
                .await?;
        }
        Ok(update)
    }

    /// Administrative reset. `lastSessionDate` is left as is.
    pub async fn reset_streak(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.store
            .set(keys::STREAK, &STREAK_RESET_VALUE.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Rejects the first write to `key`, then behaves normally.
    struct FlakyStore {
        inner: MemoryStore,
        key: &'static str,
        tripped: AtomicBool,
    }

    impl FlakyStore {
        fn new(key: &'static str) -> Self {
            Self {
                inner: MemoryStore::new(),
                key,
                tripped: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl KvStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.key && !self.tripped.swap(true, Ordering::SeqCst) {
                return Err(StorageError::Unavailable(format!("write to {key} failed")));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }

        async fn clear(&self) -> Result<(), StorageError> {
            self.inner.clear().await
        }
    }

    async fn tracker_on_day_two(store: Arc<FlakyStore>, clock: &ManualClock) -> StreakTracker {
        store.inner.set("streak", "2").await.unwrap();
        store.inner.set("lastSessionDate", "2024-05-02").await.unwrap();
        clock.set(day("2024-05-03"));
        StreakTracker::new(store, Arc::new(clock.clone()))
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn continuity_rule() {
        let today = day("2024-03-01");
        assert_eq!(next_streak(0, None, today).streak, 1);
        assert_eq!(
            next_streak(4, Some(today), today).outcome,
            StreakOutcome::AlreadyCounted
        );
        // leap day is yesterday
        assert_eq!(next_streak(4, Some(day("2024-02-29")), today).streak, 5);
        assert_eq!(next_streak(4, Some(day("2024-02-27")), today).streak, 1);
        assert_eq!(
            next_streak(4, Some(day("2024-03-09")), today).outcome,
            StreakOutcome::Restarted
        );
    }

    #[tokio::test]
    async fn same_day_is_idempotent() {
        let clock = ManualClock::new(day("2024-05-01"));
        let tracker = StreakTracker::new(Arc::new(MemoryStore::new()), Arc::new(clock));
        assert_eq!(tracker.record_session_for_streak().await.unwrap().streak, 1);
        let again = tracker.record_session_for_streak().await.unwrap();
        assert_eq!(again.streak, 1);
        assert_eq!(again.outcome, StreakOutcome::AlreadyCounted);
    }

    #[tokio::test]
    async fn consecutive_days_then_gap() {
        let clock = ManualClock::new(day("2024-05-01"));
        let tracker = StreakTracker::new(Arc::new(MemoryStore::new()), Arc::new(clock.clone()));

        tracker.record_session_for_streak().await.unwrap();
        clock.advance_days(1);
        assert_eq!(tracker.record_session_for_streak().await.unwrap().streak, 2);
        clock.advance_days(3);
        let update = tracker.record_session_for_streak().await.unwrap();
        assert_eq!(update.streak, 1);
        assert_eq!(update.outcome, StreakOutcome::Restarted);
        assert_eq!(
            tracker.get_last_session_date().await.unwrap(),
            Some(day("2024-05-05"))
        );
    }

    #[tokio::test]
    async fn reset_keeps_last_date() {
        let clock = ManualClock::new(day("2024-05-01"));
        let store = Arc::new(MemoryStore::new());
        let tracker = StreakTracker::new(store.clone(), Arc::new(clock.clone()));
        tracker.record_session_for_streak().await.unwrap();
        clock.advance_days(1);
        tracker.record_session_for_streak().await.unwrap();

        tracker.reset_streak().await.unwrap();
        assert_eq!(tracker.get_streak().await.unwrap(), STREAK_RESET_VALUE);
        assert_eq!(
            store.get("lastSessionDate").await.unwrap().as_deref(),
            Some("2024-05-02")
        );
    }

    #[tokio::test]
    async fn corrupt_date_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.set("lastSessionDate", "yesterday").await.unwrap();
        let tracker = StreakTracker::new(store, Arc::new(ManualClock::new(day("2024-05-01"))));
        assert!(matches!(
            tracker.record_session_for_streak().await,
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn failed_date_write_retries_cleanly() {
        let store = Arc::new(FlakyStore::new("lastSessionDate"));
        let clock = ManualClock::new(day("2024-05-02"));
        let tracker = tracker_on_day_two(store.clone(), &clock).await;

        assert!(tracker.record_session_for_streak().await.is_err());
        assert_eq!(tracker.get_streak().await.unwrap(), 2);

        let retry = tracker.record_session_for_streak().await.unwrap();
        assert_eq!(retry.streak, 3);
        assert_eq!(tracker.get_streak().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn failed_streak_write_is_not_counted_twice() {
        let store = Arc::new(FlakyStore::new("streak"));
        let clock = ManualClock::new(day("2024-05-02"));
        let tracker = tracker_on_day_two(store.clone(), &clock).await;

        assert!(tracker.record_session_for_streak().await.is_err());
        assert_eq!(
            tracker.get_last_session_date().await.unwrap(),
            Some(day("2024-05-03"))
        );

        let retry = tracker.record_session_for_streak().await.unwrap();
        assert_eq!(retry.outcome, StreakOutcome::AlreadyCounted);
        assert_eq!(tracker.get_streak().await.unwrap(), 2);
    }
}
