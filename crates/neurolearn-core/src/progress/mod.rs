//! Progress tracking for NeuroLearn
//!
//! Three persisted ledgers (XP, streak, session history) and the
//! [`ProgressEngine`] that commits a reviewed session across all three.
//!
//! A commit always runs XP, then streak, then history. If a step fails the
//! remaining steps are skipped and the error is returned; earlier steps
//! are not rolled back.

mod history;
mod streak;
mod xp;

pub use history::SessionHistory;
pub use streak::{next_streak, StreakOutcome, StreakTracker, StreakUpdate, STREAK_RESET_VALUE};
pub use xp::{XpLedger, DEFAULT_SESSION_REWARD};

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::error::{CoreError, Result, StorageError};
use crate::events::Event;
use crate::session::{SessionRecord, SessionReview};
use crate::stats::{self, AggregateOptions, Summary};
use crate::storage::{Config, KvStore};

/// What a successful commit produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub xp: u64,
    pub streak: u32,
    pub record: SessionRecord,
}

impl CommitOutcome {
    pub fn to_event(&self) -> Event {
        Event::SessionCommitted {
            xp: self.xp,
            streak: self.streak,
            record: self.record.clone(),
            at: Utc::now(),
        }
    }
}

/// Values shown in the home screen header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStats {
    pub xp: u64,
    pub streak: u32,
    pub today_minutes: u64,
    /// `today_minutes` formatted as `45m` or `1h 5m`.
    pub today_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyGoal {
    pub xp: u64,
    pub goal: u64,
    /// Percentage in 0..=100.
    pub progress: f64,
}

/// Composes the ledgers over one shared store and clock.
pub struct ProgressEngine {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    xp: XpLedger,
    streak: StreakTracker,
    history: SessionHistory,
    config: Config,
    commit_lock: Mutex<()>,
}

impl ProgressEngine {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            xp: XpLedger::with_reward(store.clone(), config.progress.xp_per_session),
            streak: StreakTracker::new(store.clone(), clock.clone()),
            history: SessionHistory::new(store.clone()),
            store,
            clock,
            config,
            commit_lock: Mutex::new(()),
        }
    }

    pub fn xp(&self) -> &XpLedger {
        &self.xp
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validate `review` and commit it as a session of `focused_minutes`.
    ///
    /// Nothing is written when validation fails.
    pub async fn complete_session(
        &self,
        review: SessionReview,
        focused_minutes: u32,
    ) -> Result<CommitOutcome> {
        review.validate()?;

        let _guard = self.commit_lock.lock().await;
        let today = self.clock.today();

        let xp = self
            .xp
            .add_session_reward()
            .await
            .map_err(|e| commit_failed("xp", e))?;
        let update = self
            .streak
            .record_session_on(today)
            .await
            .map_err(|e| commit_failed("streak", e))?;
        let record = review.into_record(today, focused_minutes);
        self.history
            .add_session_history(record.clone())
            .await
            .map_err(|e| commit_failed("history", e))?;

        tracing::info!(
            topic = %record.topic,
            xp,
            streak = update.streak,
            outcome = ?update.outcome,
            "session committed"
        );

        Ok(CommitOutcome {
            xp,
            streak: update.streak,
            record,
        })
    }

    pub async fn get_session_history(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.history.get_session_history().await?)
    }

    /// Aggregate the full history with the configured week start.
    pub async fn summary(&self) -> Result<Summary> {
        let history = self.history.get_session_history().await?;
        Ok(stats::aggregate_with(&history, self.aggregate_options()))
    }

    pub async fn header_stats(&self) -> Result<HeaderStats> {
        let xp = self.xp.get_xp().await?;
        let streak = self.streak.get_streak().await?;
        let history = self.history.get_session_history().await?;
        let today_minutes = stats::today_minutes(
            &history,
            self.clock.today(),
            self.config.session.duration_minutes,
        );
        Ok(HeaderStats {
            xp,
            streak,
            today_minutes,
            today_label: stats::format_minutes(today_minutes),
        })
    }

    /// XP earned today, derived from today's records.
    pub async fn today_xp(&self) -> Result<u64> {
        let today = self.clock.today();
        let count = self
            .history
            .get_session_history()
            .await?
            .iter()
            .filter(|r| r.date == today)
            .count() as u64;
        Ok(count.saturating_mul(self.config.progress.xp_per_session))
    }

    pub async fn daily_goal(&self) -> Result<DailyGoal> {
        let xp = self.today_xp().await?;
        let goal = self.config.progress.daily_goal_xp;
        Ok(DailyGoal {
            xp,
            goal,
            progress: stats::daily_goal_progress(xp, goal),
        })
    }

    /// Wipe every persisted key. Waits for any in-flight commit.
    pub async fn clear_all_data(&self) -> Result<()> {
        let _guard = self.commit_lock.lock().await;
        self.store.clear().await?;
        tracing::info!("all progress data cleared");
        Ok(())
    }

    pub async fn reset_streak(&self) -> Result<()> {
        self.streak.reset_streak().await?;
        tracing::info!("streak reset");
        Ok(())
    }

    fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            week_start: self.config.stats.week_start,
            fallback_minutes: self.config.session.duration_minutes,
        }
    }
}

fn commit_failed(step: &str, err: StorageError) -> CoreError {
    tracing::warn!(step, error = %err, "session commit aborted");
    CoreError::Storage(err)
}
