//! Statistics module for NeuroLearn
//!
//! Turns the raw session history into the summaries shown on the progress
//! screen: totals, average concentration, sessions per weekday and the
//! contribution heatmap series.

mod activity;
mod summary;

pub use activity::{ContributionPoint, DailyActivity, WeekStart};

pub use summary::{
    aggregate, aggregate_with, daily_goal_progress, format_minutes, today_minutes,
    AggregateOptions, Summary, LEGACY_SESSION_MINUTES,
};
