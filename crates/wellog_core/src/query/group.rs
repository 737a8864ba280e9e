//! Calendar-day bucketing.
//!
//! # Invariants
//! - Grouping is lossless: flattening all buckets yields the input exactly once.
//! - A log's bucket is determined only by the date part of its timestamp.
//! - Input order is preserved inside each bucket.

use crate::model::day::DayBucket;
use crate::model::log::Log;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Groups `logs` by calendar date.
///
/// Keys iterate in ascending date order; callers pick the presentation order.
pub fn group_by_day<'a>(
    logs: impl IntoIterator<Item = &'a Log>,
) -> BTreeMap<NaiveDate, DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for log in logs {
        let date = log.date();
        buckets
            .entry(date)
            .or_insert_with(|| DayBucket::new(date))
            .push(log.clone());
    }
    buckets
}

/// Buckets ordered most recent day first, as the list view renders them.
pub fn buckets_newest_first(logs: &[Log]) -> Vec<DayBucket> {
    group_by_day(logs).into_values().rev().collect()
}
