//! Type-tab and free-text filtering.
//!
//! # Invariants
//! - Output is a subsequence of the input (order preserved).
//! - Type and search predicates are combined with logical AND.
//! - Search matching is case-insensitive for notes and rendered values.

use crate::model::log::{Log, LogType};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Active type filter of the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeTab {
    #[default]
    All,
    Only(LogType),
}

impl TypeTab {
    pub fn accepts(self, kind: LogType) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == kind,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(kind) => kind.as_str(),
        }
    }
}

impl Display for TypeTab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<LogType>()
            .map(Self::Only)
            .map_err(|_| {
                format!("unknown type tab `{trimmed}`; expected all|water|exercise|sleep|mood")
            })
    }
}

/// Combined list-view filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub tab: TypeTab,
    search: String,
}

impl LogFilter {
    pub fn new(tab: TypeTab, search_text: &str) -> Self {
        Self {
            tab,
            search: search_text.to_lowercase(),
        }
    }

    /// Whether `log` passes both predicates.
    pub fn matches(&self, log: &Log) -> bool {
        self.tab.accepts(log.kind()) && self.matches_search(log)
    }

    /// Returns the matching subsequence of `logs`.
    pub fn apply(&self, logs: &[Log]) -> Vec<Log> {
        logs.iter()
            .filter(|log| self.matches(log))
            .cloned()
            .collect()
    }

    fn matches_search(&self, log: &Log) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let in_notes = log
            .notes()
            .is_some_and(|notes| notes.to_lowercase().contains(&self.search));
        in_notes || log.value().render().to_lowercase().contains(&self.search)
    }
}

/// One-shot form of [`LogFilter::apply`].
pub fn filter_logs(logs: &[Log], tab: TypeTab, search_text: &str) -> Vec<Log> {
    LogFilter::new(tab, search_text).apply(logs)
}
