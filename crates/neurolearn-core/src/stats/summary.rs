//! Session history aggregation.
//!
//! Everything here is a pure function of the history slice. Nothing is
//! cached; callers recompute whenever they need a fresh view.

use chrono::NaiveDate;
use serde::Serialize;

use super::activity::{ContributionPoint, DailyActivity, WeekStart};
use crate::session::SessionRecord;

/// Minutes credited to records that predate duration tracking.
pub const LEGACY_SESSION_MINUTES: u32 = 25;

/// Knobs for [`aggregate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub week_start: WeekStart,
    pub fallback_minutes: u32,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            fallback_minutes: LEGACY_SESSION_MINUTES,
        }
    }
}

/// Chart-ready summary of the whole history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_sessions: u64,
    pub total_minutes: u64,
    /// Mean concentration rounded to one decimal; 0 for an empty history.
    pub avg_concentration: f64,
    pub daily_activity: DailyActivity,
    pub contribution_series: Vec<ContributionPoint>,
}

impl Summary {
    /// Average formatted with exactly one decimal, e.g. `"4.0"`.
    pub fn avg_concentration_label(&self) -> String {
        format!("{:.1}", self.avg_concentration)
    }
}

/// Aggregate with the default options (Monday-first, 25 minute fallback).
pub fn aggregate(history: &[SessionRecord]) -> Summary {
    aggregate_with(history, AggregateOptions::default())
}

pub fn aggregate_with(history: &[SessionRecord], options: AggregateOptions) -> Summary {
    let mut daily_activity = DailyActivity::empty(options.week_start);
    let mut total_minutes = 0u64;
    let mut concentration_sum = 0u64;
    let mut contribution_series = Vec::with_capacity(history.len());

    for record in history {
        total_minutes += u64::from(record.duration_or(options.fallback_minutes));
        concentration_sum += u64::from(record.concentration);
        daily_activity.record(record.date);
        contribution_series.push(ContributionPoint::present(record.date));
    }

    let total_sessions = history.len() as u64;
    let avg_concentration = if total_sessions == 0 {
        0.0
    } else {
        round_one_decimal(concentration_sum as f64 / total_sessions as f64)
    };

    Summary {
        total_sessions,
        total_minutes,
        avg_concentration,
        daily_activity,
        contribution_series,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage of the daily XP goal reached, clamped to 0..=100.
pub fn daily_goal_progress(xp: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (xp as f64 / goal as f64).min(1.0) * 100.0
}

/// Minutes focused on `today` only.
pub fn today_minutes(history: &[SessionRecord], today: NaiveDate, fallback_minutes: u32) -> u64 {
    history
        .iter()
        .filter(|r| r.date == today)
        .map(|r| u64::from(r.duration_or(fallback_minutes)))
        .sum()
}

/// Header formatting: `45m` under an hour, `1h 5m` above.
pub fn format_minutes(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}
