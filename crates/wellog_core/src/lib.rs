//! Core domain logic for Wellog.
//! This crate is the single source of truth for log, list and calendar invariants.

pub mod calendar;
pub mod clock;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use calendar::grid::{
    build_month_grid, days_in_month, first_of_month, last_of_month, shift_month, CalendarCell,
    CalendarGrid, CalendarGridBuilder, DayCell, WEEKDAY_LABELS,
};
pub use calendar::selector::{logs_on, DaySelector};
pub use calendar::view::CalendarView;
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day::{DayBucket, TypeCounts};
pub use model::log::{InvalidLogError, Log, LogDraft, LogId, LogType, LogValue, Mood};
pub use query::filter::{filter_logs, LogFilter, TypeTab};
pub use query::group::{buckets_newest_first, group_by_day};
pub use repo::log_store::{LogStore, RepoError, RepoResult};
pub use service::dashboard::{
    daily_progress, recent_logs, relative_time_label, DailyGoals, DashboardSummary, GoalsError,
    RecentLog, TypeProgress,
};
pub use service::wellness_service::{ListQuery, WellnessService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
