//! Focus timer state machine.
//!
//! The timer is a logical-clock state machine. It does not use internal
//! threads or read the wall clock - every call to `tick()` is one second
//! of focus. A [`TickSource`](super::TickSource) drives it in real time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!         Expired --(grace)--> review hand-off
//! reset(): any state -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = FocusTimer::new(1500, 1);
//! timer.start("Math")?;
//! // Once per second:
//! timer.tick(); // Some(Event::ReviewReady { .. }) when the topic is handed off
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::SessionConfig;

/// Externally visible state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Expired,
}

/// The run in progress. Only exists outside `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveRun {
    topic: String,
    remaining_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Running(ActiveRun),
    Paused(ActiveRun),
    Expired {
        run: ActiveRun,
        /// Ticks left before the hand-off; `None` once handed off.
        grace_left: Option<u32>,
    },
}

/// Single-session focus countdown.
///
/// Holds no persisted state; dropping it abandons the session.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    total_secs: u32,
    grace_ticks: u32,
    phase: Phase,
}

impl FocusTimer {
    /// Create an idle timer counting down `total_secs`, handing off to
    /// review `grace_ticks` ticks after expiry (at least one).
    pub fn new(total_secs: u32, grace_ticks: u32) -> Self {
        Self {
            total_secs: total_secs.max(1),
            grace_ticks: grace_ticks.max(1),
            phase: Phase::Idle,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.duration_seconds(), config.grace_seconds)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        match self.phase {
            Phase::Idle => TimerStatus::Idle,
            Phase::Running(_) => TimerStatus::Running,
            Phase::Paused(_) => TimerStatus::Paused,
            Phase::Expired { .. } => TimerStatus::Expired,
        }
    }

    fn run(&self) -> Option<&ActiveRun> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Running(run) | Phase::Paused(run) | Phase::Expired { run, .. } => Some(run),
        }
    }

    pub fn topic(&self) -> Option<&str> {
        self.run().map(|r| r.topic.as_str())
    }

    pub fn remaining_secs(&self) -> u32 {
        self.run().map(|r| r.remaining_secs).unwrap_or(self.total_secs)
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        1.0 - (self.remaining_secs() as f64 / self.total_secs as f64)
    }

    /// Seconds actually counted down. Paused time is not included.
    pub fn focused_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs()
    }

    /// Focused time rounded up to whole minutes.
    pub fn focused_minutes(&self) -> u32 {
        self.focused_secs().div_ceil(60)
    }

    /// Whether the review hand-off has already been emitted.
    pub fn is_handed_off(&self) -> bool {
        matches!(self.phase, Phase::Expired { grace_left: None, .. })
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status(),
            topic: self.topic().map(str::to_string),
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. Only valid from `Idle`; other states return `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyTopic`] if the trimmed topic is empty.
    /// The state is left untouched.
    pub fn start(&mut self, topic: &str) -> Result<Option<Event>, ValidationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        if self.phase != Phase::Idle {
            return Ok(None);
        }
        self.phase = Phase::Running(ActiveRun {
            topic: topic.to_string(),
            remaining_secs: self.total_secs,
        });
        tracing::debug!(topic = %topic, duration_secs = self.total_secs, "focus timer started");
        Ok(Some(Event::TimerStarted {
            topic: topic.to_string(),
            duration_secs: self.total_secs,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        let Phase::Running(run) = &self.phase else {
            return None;
        };
        let run = run.clone();
        let remaining_secs = run.remaining_secs;
        self.phase = Phase::Paused(run);
        tracing::debug!(remaining_secs, "focus timer paused");
        Some(Event::TimerPaused {
            remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        let Phase::Paused(run) = &self.phase else {
            return None;
        };
        let run = run.clone();
        let remaining_secs = run.remaining_secs;
        self.phase = Phase::Running(run);
        tracing::debug!(remaining_secs, "focus timer resumed");
        Some(Event::TimerResumed {
            remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to `Idle` from any state, discarding the topic.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Idle;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Called when the topic-entry screen is shown again. No session
    /// survives a revisit.
    pub fn reenter(&mut self) -> Option<Event> {
        self.reset()
    }

    /// Advance one second. Returns `TimerExpired` when the countdown hits
    /// zero and `ReviewReady` once the grace delay has passed.
    pub fn tick(&mut self) -> Option<Event> {
        match &mut self.phase {
            Phase::Running(run) => {
                run.remaining_secs = run.remaining_secs.saturating_sub(1);
                if run.remaining_secs > 0 {
                    return None;
                }
                let run = run.clone();
                let topic = run.topic.clone();
                self.phase = Phase::Expired {
                    run,
                    grace_left: Some(self.grace_ticks),
                };
                tracing::debug!(topic = %topic, "focus timer expired");
                Some(Event::TimerExpired {
                    topic,
                    at: Utc::now(),
                })
            }
            Phase::Expired { run, grace_left } => {
                let left = (*grace_left)?;
                if left > 1 {
                    *grace_left = Some(left - 1);
                    return None;
                }
                *grace_left = None;
                let topic = run.topic.clone();
                let focused_minutes = (self.total_secs - run.remaining_secs).div_ceil(60);
                Some(Event::ReviewReady {
                    topic,
                    focused_minutes,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> FocusTimer {
        FocusTimer::from_config(&SessionConfig::default())
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = timer();
        assert_eq!(timer.status(), TimerStatus::Idle);

        assert!(timer.start("Math").unwrap().is_some());
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.remaining_secs(), 1500);

        assert!(timer.pause().is_some());
        assert_eq!(timer.status(), TimerStatus::Paused);

        assert!(timer.resume().is_some());
        assert_eq!(timer.status(), TimerStatus::Running);
    }

    #[test]
    fn empty_topic_is_rejected_without_transition() {
        let mut timer = timer();
        assert!(matches!(timer.start("   "), Err(ValidationError::EmptyTopic)));
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert!(timer.topic().is_none());
    }

    #[test]
    fn start_only_from_idle() {
        let mut timer = timer();
        timer.start("Math").unwrap();
        timer.tick();
        assert!(timer.start("Physics").unwrap().is_none());
        assert_eq!(timer.topic(), Some("Math"));
        assert_eq!(timer.remaining_secs(), 1499);
    }

    #[test]
    fn pause_and_resume_are_guarded() {
        let mut timer = timer();
        assert!(timer.pause().is_none());
        assert!(timer.resume().is_none());
        assert_eq!(timer.status(), TimerStatus::Idle);

        timer.start("Math").unwrap();
        assert!(timer.resume().is_none());
        assert_eq!(timer.status(), TimerStatus::Running);

        timer.pause();
        assert!(timer.pause().is_none());
        assert_eq!(timer.status(), TimerStatus::Paused);
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut timer = timer();
        timer.start("Math").unwrap();
        for _ in 0..10 {
            timer.tick();
        }
        timer.pause();
        for _ in 0..100 {
            assert!(timer.tick().is_none());
        }
        assert_eq!(timer.remaining_secs(), 1490);
        timer.resume();
        assert_eq!(timer.remaining_secs(), 1490);
    }

    #[test]
    fn full_countdown_expires_then_hands_off_once() {
        let mut timer = timer();
        timer.start("Math").unwrap();
        for _ in 0..1499 {
            assert!(timer.tick().is_none());
        }
        assert!(matches!(timer.tick(), Some(Event::TimerExpired { .. })));
        assert_eq!(timer.status(), TimerStatus::Expired);
        assert_eq!(timer.progress(), 1.0);

        match timer.tick() {
            Some(Event::ReviewReady {
                topic,
                focused_minutes,
                ..
            }) => {
                assert_eq!(topic, "Math");
                assert_eq!(focused_minutes, 25);
            }
            other => panic!("Expected ReviewReady, got {other:?}"),
        }
        assert!(timer.is_handed_off());
        assert!(timer.tick().is_none());
        assert_eq!(timer.status(), TimerStatus::Expired);
    }

    #[test]
    fn longer_grace_delays_hand_off() {
        let mut timer = FocusTimer::new(2, 3);
        timer.start("Piano").unwrap();
        timer.tick();
        assert!(matches!(timer.tick(), Some(Event::TimerExpired { .. })));
        assert!(timer.tick().is_none());
        assert!(timer.tick().is_none());
        assert!(matches!(timer.tick(), Some(Event::ReviewReady { .. })));
    }

    #[test]
    fn progress_is_monotonic() {
        let mut timer = FocusTimer::new(10, 1);
        assert_eq!(timer.progress(), 0.0);
        timer.start("Math").unwrap();
        let mut last = timer.progress();
        for _ in 0..10 {
            timer.tick();
            assert!(timer.progress() >= last);
            last = timer.progress();
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn reset_returns_to_idle_from_any_state() {
        let mut timer = FocusTimer::new(3, 1);
        timer.start("Math").unwrap();
        timer.tick();
        timer.pause();
        timer.reset();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.remaining_secs(), 3);
        assert!(timer.topic().is_none());

        timer.start("Math").unwrap();
        for _ in 0..3 {
            timer.tick();
        }
        assert_eq!(timer.status(), TimerStatus::Expired);
        timer.reenter();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn focused_minutes_rounds_partial_minutes_up() {
        let mut timer = timer();
        timer.start("Math").unwrap();
        for _ in 0..61 {
            timer.tick();
        }
        assert_eq!(timer.focused_secs(), 61);
        assert_eq!(timer.focused_minutes(), 2);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let timer = timer();
        match timer.snapshot() {
            Event::StateSnapshot {
                status,
                remaining_secs,
                total_secs,
                topic,
                ..
            } => {
                assert_eq!(status, TimerStatus::Idle);
                assert_eq!(remaining_secs, 1500);
                assert_eq!(total_secs, 1500);
                assert!(topic.is_none());
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
