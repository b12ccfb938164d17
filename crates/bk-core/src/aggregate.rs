//! Pure aggregation over study-log records.
//!
//! Every function here is deterministic given `(records, now, config)`,
//! performs no I/O, never mutates its input, and is safe to call with an
//! empty collection. Fetch order of the records is irrelevant.

use crate::config::{DayBoundary, RankingLabelMode, SubjectPolicy};
use crate::error::ConfigError;
use crate::types::{DailyTotal, DayBucket, RankingEntry, StudyLogRecord, SubjectTotal, UserId};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};

/// Leaderboard rows shown to users.
pub const RANKING_LIMIT: usize = 10;

/// Calendar day of `at` under the configured boundary policy. An offset
/// outside chrono's valid range (rejected by config validation) falls back
/// to UTC rather than failing.
pub fn calendar_day(at: DateTime<Utc>, boundary: DayBoundary) -> NaiveDate {
    match boundary {
        DayBoundary::Utc => at.date_naive(),
        DayBoundary::FixedOffset(minutes) => FixedOffset::east_opt(minutes * 60)
            .map_or_else(|| at.date_naive(), |offset| at.with_timezone(&offset).date_naive()),
    }
}

/// All-time minute total for one user. 0 on empty input.
pub fn total_minutes(records: &[StudyLogRecord], user: &UserId) -> i64 {
    records
        .iter()
        .filter(|record| &record.user_id == user)
        .map(|record| record.time)
        .sum()
}

/// Minutes logged by `user` on the current calendar day.
pub fn today_minutes(
    records: &[StudyLogRecord],
    user: &UserId,
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> i64 {
    let today = calendar_day(now, boundary);
    records
        .iter()
        .filter(|record| &record.user_id == user)
        .filter_map(|record| {
            let at = record.created_at?;
            (calendar_day(at, boundary) == today).then_some(record.time)
        })
        .sum()
}

/// All-time per-day minute totals for one user, oldest day first. This is
/// what the calendar view consumes; unlike [`weekly_series`] it spans every
/// confirmed record, not just the trailing week.
pub fn daily_totals(
    records: &[StudyLogRecord],
    user: &UserId,
    boundary: DayBoundary,
) -> Vec<DailyTotal> {
    let mut sums: HashMap<NaiveDate, i64> = HashMap::new();
    for record in records {
        if &record.user_id != user {
            continue;
        }
        let Some(at) = record.created_at else {
            continue;
        };
        *sums.entry(calendar_day(at, boundary)).or_insert(0) += record.time;
    }
    let mut totals: Vec<DailyTotal> = sums
        .into_iter()
        .map(|(date, minutes)| DailyTotal { date, minutes })
        .collect();
    totals.sort_by_key(|total| total.date);
    totals
}

/// Exactly 7 day buckets covering `[now - 6 days, now]`, oldest first.
/// Records without a `createdAt` (not yet confirmed by the store) are
/// excluded. Bucket labels are `month/day`.
pub fn weekly_series(
    records: &[StudyLogRecord],
    user: &UserId,
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> Vec<DayBucket> {
    let today = calendar_day(now, boundary);
    let mut sums: HashMap<NaiveDate, i64> = HashMap::new();
    for record in records {
        if &record.user_id != user {
            continue;
        }
        let Some(at) = record.created_at else {
            continue;
        };
        let day = calendar_day(at, boundary);
        if day > today || day < today - Duration::days(6) {
            continue;
        }
        *sums.entry(day).or_insert(0) += record.time;
    }
    (0..7)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            DayBucket {
                label: format!("{}/{}", day.month(), day.day()),
                minutes: sums.get(&day).copied().unwrap_or(0),
            }
        })
        .collect()
}

pub fn weekly_total(series: &[DayBucket]) -> i64 {
    series.iter().map(|bucket| bucket.minutes).sum()
}

/// Weekly achievement as a percentage rounded to one decimal. A zero or
/// negative goal is a configuration error, never Infinity or NaN.
pub fn achievement_percent(weekly_total: i64, goal_minutes: i64) -> Result<f64, ConfigError> {
    if goal_minutes <= 0 {
        return Err(ConfigError::NonPositiveGoal {
            minutes: goal_minutes,
        });
    }
    let raw = weekly_total as f64 / goal_minutes as f64 * 100.0;
    Ok((raw * 10.0).round() / 10.0)
}

/// Consecutive calendar days ending today with at least one record each.
/// A day with no record stops the walk immediately, so a user who studied
/// yesterday but not today has a streak of 0.
pub fn streak_days(
    records: &[StudyLogRecord],
    user: &UserId,
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> u32 {
    let days: HashSet<NaiveDate> = records
        .iter()
        .filter(|record| &record.user_id == user)
        .filter_map(|record| record.created_at)
        .map(|at| calendar_day(at, boundary))
        .collect();
    let today = calendar_day(now, boundary);
    let mut streak = 0u32;
    while days.contains(&(today - Duration::days(i64::from(streak)))) {
        streak += 1;
    }
    streak
}

/// Leaderboard over all input records (typically every user's). Labels per
/// `mode`; `DisplayName` falls back to the user id when no name snapshot
/// was captured. Descending by minutes, ties kept in first-seen input
/// order, truncated to [`RANKING_LIMIT`].
pub fn ranking(records: &[StudyLogRecord], mode: RankingLabelMode) -> Vec<RankingEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, i64> = HashMap::new();
    for record in records {
        let label = match mode {
            RankingLabelMode::Id => record.user_id.as_str().to_string(),
            RankingLabelMode::DisplayName => record
                .user_name
                .clone()
                .unwrap_or_else(|| record.user_id.as_str().to_string()),
        };
        if !sums.contains_key(&label) {
            order.push(label.clone());
        }
        *sums.entry(label).or_insert(0) += record.time;
    }
    let mut entries: Vec<RankingEntry> = order
        .into_iter()
        .map(|label| {
            let minutes = sums.get(&label).copied().unwrap_or(0);
            RankingEntry { label, minutes }
        })
        .collect();
    // sort_by is stable, which is what preserves first-seen tie order
    entries.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    entries.truncate(RANKING_LIMIT);
    entries
}

/// Per-subject minute sums for one user. Every subject in `known` appears
/// (zero-filled) in the given order; records with no subject are skipped;
/// subjects outside the known set follow `policy`.
pub fn subject_totals(
    records: &[StudyLogRecord],
    user: &UserId,
    known: &[String],
    policy: SubjectPolicy,
) -> Vec<SubjectTotal> {
    let mut sums: HashMap<&str, i64> = HashMap::new();
    let mut unlisted: Vec<&str> = Vec::new();
    for record in records {
        if &record.user_id != user {
            continue;
        }
        let Some(subject) = record.subject.as_deref() else {
            continue;
        };
        if subject.trim().is_empty() {
            continue;
        }
        if !sums.contains_key(subject) && !known.iter().any(|k| k == subject) {
            unlisted.push(subject);
        }
        *sums.entry(subject).or_insert(0) += record.time;
    }

    let mut totals: Vec<SubjectTotal> = known
        .iter()
        .map(|subject| SubjectTotal {
            subject: subject.clone(),
            minutes: sums.get(subject.as_str()).copied().unwrap_or(0),
        })
        .collect();
    if policy == SubjectPolicy::IncludeUnlisted {
        totals.extend(unlisted.into_iter().map(|subject| SubjectTotal {
            subject: subject.to_string(),
            minutes: sums.get(subject).copied().unwrap_or(0),
        }));
    }
    totals
}
