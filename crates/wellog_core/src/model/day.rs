//! Day-level projections of the log collection.
//!
//! # Invariants
//! - `DayBucket::counts` always agrees with `DayBucket::logs`.
//! - Every log in a bucket has `log.date() == bucket.date`.

use crate::model::log::{Log, LogType};
use chrono::NaiveDate;
use serde::Serialize;

/// Per-type log counters for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub water: u32,
    pub exercise: u32,
    pub sleep: u32,
    pub mood: u32,
}

impl TypeCounts {
    /// Counts `logs` by type.
    pub fn tally<'a>(logs: impl IntoIterator<Item = &'a Log>) -> Self {
        let mut counts = Self::default();
        for log in logs {
            counts.record(log.kind());
        }
        counts
    }

    pub fn record(&mut self, kind: LogType) {
        *self.slot_mut(kind) += 1;
    }

    pub fn get(&self, kind: LogType) -> u32 {
        match kind {
            LogType::Water => self.water,
            LogType::Exercise => self.exercise,
            LogType::Sleep => self.sleep,
            LogType::Mood => self.mood,
        }
    }

    /// Sum across all types.
    pub fn total(&self) -> u32 {
        LogType::ALL.into_iter().map(|kind| self.get(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn slot_mut(&mut self, kind: LogType) -> &mut u32 {
        match kind {
            LogType::Water => &mut self.water,
            LogType::Exercise => &mut self.exercise,
            LogType::Sleep => &mut self.sleep,
            LogType::Mood => &mut self.mood,
        }
    }
}

/// Logs falling on one calendar date, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub logs: Vec<Log>,
    pub counts: TypeCounts,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            logs: Vec::new(),
            counts: TypeCounts::default(),
        }
    }

    /// Appends a log already known to fall on `self.date`.
    pub(crate) fn push(&mut self, log: Log) {
        debug_assert_eq!(log.date(), self.date);
        self.counts.record(log.kind());
        self.logs.push(log);
    }

    /// Date key rendered as `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
