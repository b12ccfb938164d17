use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which label the leaderboard groups by. The source pages disagreed
/// (some keyed on the raw user id, some on the display name); this is the
/// single switch that replaces those divergent code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RankingLabelMode {
    Id,
    DisplayName,
}

/// Whether `subject_totals` reports subjects outside the configured known
/// set. `KnownOnly` drops them; `IncludeUnlisted` appends them after the
/// known set in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SubjectPolicy {
    KnownOnly,
    IncludeUnlisted,
}

/// Calendar-day boundary used for the weekly series, streaks and "today".
/// Always explicit: either UTC midnight or a fixed offset from UTC in
/// minutes, never the executing host's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayBoundary {
    Utc,
    FixedOffset(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Weekly study goal in minutes. Must be positive.
    pub weekly_goal_minutes: i64,
    pub ranking_label: RankingLabelMode,
    pub subject_policy: SubjectPolicy,
    pub day_boundary: DayBoundary,
    /// Subjects always shown in the per-subject table, in this order.
    pub subjects: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            weekly_goal_minutes: 600,
            ranking_label: RankingLabelMode::DisplayName,
            subject_policy: SubjectPolicy::KnownOnly,
            day_boundary: DayBoundary::Utc,
            subjects: [
                "Japanese",
                "Math",
                "English",
                "Science",
                "Social Studies",
                "Informatics",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weekly_goal_minutes <= 0 {
            return Err(ConfigError::NonPositiveGoal {
                minutes: self.weekly_goal_minutes,
            });
        }
        if let DayBoundary::FixedOffset(minutes) = self.day_boundary {
            if minutes.abs() >= 24 * 60 {
                return Err(ConfigError::InvalidInput {
                    message: format!("day boundary offset out of range: {minutes} minutes"),
                });
            }
        }
        Ok(())
    }
}

/// Loads `TrackerConfig` from a TOML file. A missing file yields the
/// defaults; a present-but-invalid file is an error.
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(TrackerConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::InvalidInput {
                message: err.to_string(),
            });
        }
    };
    let config: TrackerConfig =
        toml::from_str(&content).map_err(|err| ConfigError::InvalidInput {
            message: err.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_goal_is_rejected() {
        let config = TrackerConfig {
            weekly_goal_minutes: 0,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveGoal { minutes: 0 })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/benkyo.toml")).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn parses_partial_toml() {
        let config: TrackerConfig = toml::from_str(
            r#"
            weekly_goal_minutes = 300
            ranking_label = "Id"
            "#,
        )
        .unwrap();
        assert_eq!(config.weekly_goal_minutes, 300);
        assert_eq!(config.ranking_label, RankingLabelMode::Id);
        assert_eq!(config.subject_policy, SubjectPolicy::KnownOnly);
    }
}
