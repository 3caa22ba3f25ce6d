//! # NeuroLearn Core Library
//!
//! Core logic for the NeuroLearn focus-session tracker. Every operation is
//! available through the standalone `neurolearn` CLI; any GUI is a thin
//! layer over this library.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine for one focus countdown, ending
//!   in a single hand-off to the review step
//! - **Progress**: XP ledger, daily streak tracker and session history, all
//!   persisted through the [`KvStore`] contract
//! - **Stats**: pure aggregation of the history for charts and headers
//! - **Storage**: in-memory and SQLite key-value stores plus TOML config
//! - **Assistant**: prompt building and an HTTP client for study advice
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: countdown state machine
//! - [`ProgressEngine`]: commits a reviewed session across the ledgers
//! - [`Database`]: SQLite-backed key-value store
//! - [`Config`]: application configuration management

pub mod assistant;
pub mod clock;
pub mod error;
pub mod events;
pub mod progress;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use assistant::AssistantClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AssistantError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use progress::{CommitOutcome, DailyGoal, HeaderStats, ProgressEngine};
pub use session::{GoalStatus, Mood, SessionRecord, SessionReview};
pub use stats::{Summary, WeekStart};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use timer::{FocusTimer, TimerStatus};
