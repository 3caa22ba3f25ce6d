//! Completed-session records and the post-session review.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Self-reported mood after a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
        };
        f.write_str(s)
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            other => Err(ValidationError::InvalidValue {
                field: "mood".into(),
                message: format!("expected happy, neutral or sad, got '{other}'"),
            }),
        }
    }
}

/// Whether the session goal was reached.
///
/// Older records stored a boolean; `true`/`false` read back as `Yes`/`No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "GoalRepr")]
pub enum GoalStatus {
    Yes,
    No,
    NotYet,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GoalRepr {
    Flag(bool),
    Text(String),
}

impl TryFrom<GoalRepr> for GoalStatus {
    type Error = ValidationError;

    fn try_from(repr: GoalRepr) -> Result<Self, Self::Error> {
        match repr {
            GoalRepr::Flag(true) => Ok(GoalStatus::Yes),
            GoalRepr::Flag(false) => Ok(GoalStatus::No),
            GoalRepr::Text(s) => s.parse(),
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalStatus::Yes => "yes",
            GoalStatus::No => "no",
            GoalStatus::NotYet => "not_yet",
        };
        f.write_str(s)
    }
}

impl FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(GoalStatus::Yes),
            "no" => Ok(GoalStatus::No),
            "not_yet" | "not-yet" => Ok(GoalStatus::NotYet),
            other => Err(ValidationError::InvalidValue {
                field: "goalAchieved".into(),
                message: format!("expected yes, no or not_yet, got '{other}'"),
            }),
        }
    }
}

/// One completed focus session, as persisted under `sessionHistory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Local calendar date at commit time.
    pub date: NaiveDate,
    pub topic: String,
    pub concentration: u8,
    pub mood: Mood,
    pub goal_achieved: GoalStatus,
    /// Absent on records written before durations were tracked.
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl SessionRecord {
    /// Recorded duration, or `fallback` for legacy records.
    pub fn duration_or(&self, fallback: u32) -> u32 {
        self.duration_minutes.unwrap_or(fallback)
    }
}

/// The rating a user gives once the timer hands off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReview {
    pub topic: String,
    pub concentration: u8,
    pub mood: Mood,
    pub goal_achieved: GoalStatus,
}

impl SessionReview {
    /// Check the review before anything is committed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        if !(1..=5).contains(&self.concentration) {
            return Err(ValidationError::ConcentrationOutOfRange(self.concentration));
        }
        Ok(())
    }

    /// Build the persisted record. Durations below one minute round up to one.
    pub fn into_record(self, date: NaiveDate, duration_minutes: u32) -> SessionRecord {
        SessionRecord {
            date,
            topic: self.topic.trim().to_string(),
            concentration: self.concentration,
            mood: self.mood,
            goal_achieved: self.goal_achieved,
            duration_minutes: Some(duration_minutes.max(1)),
        }
    }
}
