use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// All-time minutes studied on one calendar day; what the calendar view
/// renders onto its date tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: i64,
}

/// One day's aggregated minutes within the weekly series. `label` is
/// `month/day` (e.g. `7/4`), oldest bucket first in the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub label: String,
    pub minutes: i64,
}

/// One leaderboard row: an identity label and its summed minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub label: String,
    pub minutes: i64,
}

/// Summed minutes for one subject. Every configured known subject appears
/// even at zero, so a fixed-width table can be rendered directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTotal {
    pub subject: String,
    pub minutes: i64,
}

/// Everything the stats views need for one user, recomputed in full on
/// every read. Nothing here is persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_minutes: i64,
    pub today_minutes: i64,
    /// Exactly 7 buckets covering `[now - 6 days, now]`, oldest first.
    pub weekly_series: Vec<DayBucket>,
    pub weekly_total: i64,
    /// `weekly_total / weekly_goal * 100`, rounded to one decimal.
    pub weekly_achievement_percent: f64,
    pub streak_days: u32,
    /// Top 10 across all users, minutes descending, first-seen tie order.
    pub ranking: Vec<RankingEntry>,
    pub subject_totals: Vec<SubjectTotal>,
    /// All-time per-day totals for the calendar, oldest day first.
    pub daily_totals: Vec<DailyTotal>,
}
