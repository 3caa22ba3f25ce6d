use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;
use crate::timer::TimerStatus;

/// Every state change in the system produces an Event.
/// Front ends render them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        topic: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; the review hand-off follows after the grace delay.
    TimerExpired {
        topic: String,
        at: DateTime<Utc>,
    },
    /// The topic is handed to the review step. Emitted once per run.
    ReviewReady {
        topic: String,
        focused_minutes: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        topic: Option<String>,
        remaining_secs: u32,
        total_secs: u32,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// XP, streak and history were all committed for a reviewed session.
    SessionCommitted {
        xp: u64,
        streak: u32,
        record: SessionRecord,
        at: DateTime<Utc>,
    },
}
