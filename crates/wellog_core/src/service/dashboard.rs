//! Dashboard projections: daily goal progress and recent activity.
//!
//! # Responsibility
//! - Compare one day's totals against the user's daily goals.
//! - List the most recent logs with human-readable relative times.
//!
//! # Invariants
//! - Progress ratios are clamped to `[0, 1]`.
//! - Goals are finite and strictly positive.
//! - Recent-log limit is normalized to `1..=RECENT_LIMIT_MAX`.

use crate::model::log::{Log, LogType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const RECENT_DEFAULT_LIMIT: u32 = 4;
pub const RECENT_LIMIT_MAX: u32 = 20;

/// Error for goal configuration input.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalsError {
    InvalidGoal { kind: LogType, value: f64 },
    Parse(String),
}

impl Display for GoalsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGoal { kind, value } => write!(
                f,
                "daily {kind} goal must be a positive finite number, got {value}"
            ),
            Self::Parse(message) => write!(f, "invalid goals payload: {message}"),
        }
    }
}

impl Error for GoalsError {}

/// Per-type daily targets, in each type's canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyGoals {
    /// Glasses of water.
    pub water: f64,
    /// Minutes of exercise.
    pub exercise: f64,
    /// Hours of sleep.
    pub sleep: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            water: 8.0,
            exercise: 30.0,
            sleep: 8.0,
        }
    }
}

impl DailyGoals {
    /// Parses goals from JSON; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, GoalsError> {
        let goals: Self =
            serde_json::from_str(raw).map_err(|err| GoalsError::Parse(err.to_string()))?;
        goals.validate()?;
        Ok(goals)
    }

    pub fn validate(&self) -> Result<(), GoalsError> {
        for kind in LogType::ALL {
            if let Some(value) = self.goal_for(kind) {
                if !value.is_finite() || value <= 0.0 {
                    return Err(GoalsError::InvalidGoal { kind, value });
                }
            }
        }
        Ok(())
    }

    /// Target for `kind`; mood has no numeric goal.
    pub fn goal_for(&self, kind: LogType) -> Option<f64> {
        match kind {
            LogType::Water => Some(self.water),
            LogType::Exercise => Some(self.exercise),
            LogType::Sleep => Some(self.sleep),
            LogType::Mood => None,
        }
    }
}

/// One type's standing for a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeProgress {
    pub kind: LogType,
    /// Summed amount, or the average mood score for mood.
    pub achieved: f64,
    pub target: Option<f64>,
    pub ratio: f64,
}

impl TypeProgress {
    /// Rounded percentage for display.
    pub fn percent(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }
}

/// Recent log with its relative-time label.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentLog {
    pub log: Log,
    pub relative: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub progress: Vec<TypeProgress>,
    pub recent: Vec<RecentLog>,
}

/// Progress of every type on `date`, in [`LogType::ALL`] order.
pub fn daily_progress(logs: &[Log], date: NaiveDate, goals: &DailyGoals) -> Vec<TypeProgress> {
    LogType::ALL
        .into_iter()
        .map(|kind| {
            let day_logs = logs
                .iter()
                .filter(|log| log.kind() == kind && log.date() == date);
            match goals.goal_for(kind) {
                Some(target) => {
                    let achieved: f64 = day_logs.filter_map(|log| log.value().as_amount()).sum();
                    TypeProgress {
                        kind,
                        achieved,
                        target: Some(target),
                        ratio: (achieved / target).clamp(0.0, 1.0),
                    }
                }
                None => {
                    let scores: Vec<f64> = day_logs
                        .filter_map(|log| log.value().as_mood())
                        .map(|mood| mood.score())
                        .collect();
                    let average = if scores.is_empty() {
                        0.0
                    } else {
                        scores.iter().sum::<f64>() / scores.len() as f64
                    };
                    TypeProgress {
                        kind,
                        achieved: average,
                        target: None,
                        ratio: average.clamp(0.0, 1.0),
                    }
                }
            }
        })
        .collect()
}

/// Newest `limit` logs by timestamp, labelled relative to `now`.
pub fn recent_logs(logs: &[Log], now: NaiveDateTime, limit: u32) -> Vec<RecentLog> {
    let mut ordered: Vec<&Log> = logs.iter().collect();
    ordered.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    ordered
        .into_iter()
        .take(limit as usize)
        .map(|log| RecentLog {
            log: log.clone(),
            relative: relative_time_label(now, log.timestamp()),
        })
        .collect()
}

/// Renders the distance from `then` to `now` as `N minutes/hours/days ago`.
///
/// Minutes are rounded; hours and days are floored. Future times clamp to zero.
pub fn relative_time_label(now: NaiveDateTime, then: NaiveDateTime) -> String {
    let elapsed_ms = now.signed_duration_since(then).num_milliseconds().max(0);
    let minutes = (elapsed_ms as f64 / 60_000.0).round() as i64;
    if minutes < 60 {
        return ago(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }
    ago(hours / 24, "day")
}

pub fn normalize_recent_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => RECENT_DEFAULT_LIMIT,
        Some(value) if value > RECENT_LIMIT_MAX => RECENT_LIMIT_MAX,
        Some(value) => value,
    }
}

fn ago(count: i64, unit: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}

#[cfg(test)]
mod tests {
    use super::{normalize_recent_limit, relative_time_label, DailyGoals, GoalsError};
    use crate::model::log::LogType;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn relative_labels_pluralize_and_floor() {
        let now = NaiveDate::from_ymd_opt(2023, 5, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(relative_time_label(now, now), "0 minutes ago");
        assert_eq!(
            relative_time_label(now, now - Duration::minutes(1)),
            "1 minute ago"
        );
        assert_eq!(
            relative_time_label(now, now - Duration::minutes(150)),
            "2 hours ago"
        );
        assert_eq!(
            relative_time_label(now, now - Duration::hours(47)),
            "1 day ago"
        );
        assert_eq!(
            relative_time_label(now, now + Duration::hours(3)),
            "0 minutes ago"
        );
    }

    #[test]
    fn recent_limit_defaults_and_caps() {
        assert_eq!(normalize_recent_limit(None), 4);
        assert_eq!(normalize_recent_limit(Some(0)), 4);
        assert_eq!(normalize_recent_limit(Some(7)), 7);
        assert_eq!(normalize_recent_limit(Some(500)), 20);
    }

    #[test]
    fn goals_json_keeps_defaults_and_rejects_non_positive() {
        let goals = DailyGoals::from_json(r#"{"water": 10}"#).unwrap();
        assert_eq!(goals.water, 10.0);
        assert_eq!(goals.exercise, 30.0);

        let err = DailyGoals::from_json(r#"{"sleep": 0}"#).unwrap_err();
        assert_eq!(
            err,
            GoalsError::InvalidGoal {
                kind: LogType::Sleep,
                value: 0.0
            }
        );
        assert!(matches!(
            DailyGoals::from_json("not json"),
            Err(GoalsError::Parse(_))
        ));
    }
}
