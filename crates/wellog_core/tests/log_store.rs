use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use wellog_core::{
    FixedClock, InvalidLogError, Log, LogDraft, LogStore, LogType, LogValue, Mood, RepoError,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn store_at(now: NaiveDateTime) -> LogStore {
    LogStore::new(Arc::new(FixedClock::at(now)))
}

#[test]
fn add_assigns_id_unit_and_keeps_supplied_fields() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));
    let created = store
        .add(
            LogDraft::amount(LogType::Exercise, 45.0)
                .with_notes("Evening run")
                .at(at(2023, 5, 15, 18, 0)),
        )
        .unwrap();

    assert!(!created.id().is_nil());
    assert_eq!(created.unit(), Some("minutes"));

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].kind(), LogType::Exercise);
    assert_eq!(listed[0].value(), &LogValue::Amount(45.0));
    assert_eq!(listed[0].notes(), Some("Evening run"));
    assert_eq!(listed[0].timestamp(), at(2023, 5, 15, 18, 0));
}

#[test]
fn add_defaults_timestamp_to_clock_now() {
    let now = at(2024, 2, 29, 7, 45);
    let mut store = store_at(now);
    let created = store.add(LogDraft::mood(Mood::Good)).unwrap();
    assert_eq!(created.timestamp(), now);
}

#[test]
fn add_rejects_missing_fields_without_mutating_store() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));

    let missing_type = LogDraft {
        value: Some(LogValue::Amount(3.0)),
        ..LogDraft::default()
    };
    assert_eq!(
        store.add(missing_type).unwrap_err(),
        InvalidLogError::MissingType
    );

    let missing_value = LogDraft {
        kind: Some(LogType::Sleep),
        ..LogDraft::default()
    };
    assert_eq!(
        store.add(missing_value).unwrap_err(),
        InvalidLogError::MissingValue(LogType::Sleep)
    );

    let wrong_value = LogDraft::new(LogType::Mood, LogValue::Amount(5.0));
    assert!(matches!(
        store.add(wrong_value).unwrap_err(),
        InvalidLogError::ValueMismatch { .. }
    ));

    assert!(store.is_empty());
}

#[test]
fn ids_are_unique_across_many_adds() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));
    for idx in 1..=200 {
        store
            .add(LogDraft::amount(LogType::Water, f64::from(idx)))
            .unwrap();
    }
    let ids: HashSet<Uuid> = store.list().iter().map(Log::id).collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(store.len(), 200);
}

#[test]
fn remove_is_idempotent() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));
    let keep = store.add(LogDraft::amount(LogType::Water, 8.0)).unwrap();
    let drop = store.add(LogDraft::amount(LogType::Sleep, 6.0)).unwrap();

    assert!(store.remove(drop.id()));
    let after_first = store.list();

    assert!(!store.remove(drop.id()));
    assert_eq!(store.list(), after_first);
    assert_eq!(after_first, vec![keep]);
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));
    store.add(LogDraft::amount(LogType::Water, 8.0)).unwrap();
    assert!(!store.remove(Uuid::new_v4()));
    assert_eq!(store.len(), 1);
}

#[test]
fn list_is_a_defensive_snapshot() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));
    store.add(LogDraft::amount(LogType::Water, 8.0)).unwrap();

    let mut snapshot = store.list();
    snapshot.clear();

    assert_eq!(store.len(), 1);
}

#[test]
fn insert_keeps_id_and_rejects_duplicates() {
    let mut store = store_at(at(2023, 5, 15, 12, 0));
    let log = Log::new(LogType::Water, LogValue::Amount(6.0), at(2023, 5, 14, 22, 0)).unwrap();

    assert_eq!(store.insert(log.clone()).unwrap(), log.id());
    assert_eq!(store.get(log.id()), Some(log.clone()));
    assert_eq!(
        store.insert(log.clone()).unwrap_err(),
        RepoError::DuplicateId(log.id())
    );
    assert_eq!(store.len(), 1);
}
