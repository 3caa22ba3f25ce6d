//! Weekday buckets and the contribution (heatmap) series.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// First day of the week for the activity chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    /// Convention used by older builds of the chart.
    Sunday,
}

impl WeekStart {
    /// Bucket index 0..7 for a weekday.
    pub fn index_of(self, weekday: Weekday) -> usize {
        match self {
            WeekStart::Monday => weekday.num_days_from_monday() as usize,
            WeekStart::Sunday => weekday.num_days_from_sunday() as usize,
        }
    }

    pub fn labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        }
    }
}

/// Sessions per weekday. Raw counts, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub week_start: WeekStart,
    pub labels: [&'static str; 7],
    pub counts: [u64; 7],
}

impl DailyActivity {
    pub fn empty(week_start: WeekStart) -> Self {
        Self {
            week_start,
            labels: week_start.labels(),
            counts: [0; 7],
        }
    }

    pub fn record(&mut self, date: NaiveDate) {
        self.counts[self.week_start.index_of(date.weekday())] += 1;
    }

    /// Count for a given weekday regardless of week start.
    pub fn count_for(&self, weekday: Weekday) -> u64 {
        self.counts[self.week_start.index_of(weekday)]
    }
}

/// One heatmap entry. Every session contributes its own entry; grouping
/// by day is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionPoint {
    pub date: NaiveDate,
    pub intensity: u8,
}

impl ContributionPoint {
    pub fn present(date: NaiveDate) -> Self {
        Self { date, intensity: 1 }
    }
}
