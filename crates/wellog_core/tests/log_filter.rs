use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use wellog_core::{
    filter_logs, FixedClock, Log, LogDraft, LogFilter, LogStore, LogType, Mood, TypeTab,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn sample_store() -> LogStore {
    let mut store = LogStore::new(Arc::new(FixedClock::at(at(2023, 5, 16, 9, 0))));
    let drafts = [
        LogDraft::amount(LogType::Water, 8.0)
            .with_notes("Stayed hydrated today!")
            .at(at(2023, 5, 15, 10, 30)),
        LogDraft::amount(LogType::Exercise, 45.0)
            .with_notes("Evening run")
            .at(at(2023, 5, 15, 18, 0)),
        LogDraft::amount(LogType::Sleep, 7.5)
            .with_notes("Woke up refreshed")
            .at(at(2023, 5, 15, 6, 30)),
        LogDraft::mood(Mood::Good)
            .with_notes("Productive day overall")
            .at(at(2023, 5, 15, 20, 0)),
        LogDraft::amount(LogType::Water, 6.0)
            .with_notes("Need to drink more water tomorrow")
            .at(at(2023, 5, 14, 22, 0)),
        LogDraft::amount(LogType::Exercise, 30.0)
            .with_notes("Morning yoga session")
            .at(at(2023, 5, 14, 7, 0)),
        LogDraft::amount(LogType::Sleep, 6.0)
            .with_notes("Didn't sleep well")
            .at(at(2023, 5, 14, 6, 0)),
        LogDraft::mood(Mood::Excellent)
            .with_notes("Great day with family")
            .at(at(2023, 5, 14, 12, 0)),
    ];
    for draft in drafts {
        store.add(draft).unwrap();
    }
    store
}

fn brute_force(logs: &[Log], tab: TypeTab, search: &str) -> Vec<Log> {
    let needle = search.to_lowercase();
    logs.iter()
        .filter(|log| match tab {
            TypeTab::All => true,
            TypeTab::Only(kind) => log.kind() == kind,
        })
        .filter(|log| {
            needle.is_empty()
                || log
                    .notes()
                    .map(|notes| notes.to_lowercase().contains(&needle))
                    .unwrap_or(false)
                || log.value().render().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[test]
fn all_tab_and_empty_search_pass_everything() {
    let logs = sample_store().list();
    assert_eq!(filter_logs(&logs, TypeTab::All, ""), logs);
}

#[test]
fn type_tab_keeps_only_matching_kind_in_order() {
    let logs = sample_store().list();
    let water = filter_logs(&logs, TypeTab::Only(LogType::Water), "");
    assert_eq!(water.len(), 2);
    assert!(water.iter().all(|log| log.kind() == LogType::Water));
    assert_eq!(water[0].notes(), Some("Stayed hydrated today!"));
}

#[test]
fn search_matches_notes_case_insensitively() {
    let logs = sample_store().list();
    let hits = filter_logs(&logs, TypeTab::All, "WATER");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].notes(), Some("Need to drink more water tomorrow"));
}

#[test]
fn search_matches_rendered_values() {
    let logs = sample_store().list();

    let numeric = filter_logs(&logs, TypeTab::All, "7.5");
    assert_eq!(numeric.len(), 1);
    assert_eq!(numeric[0].kind(), LogType::Sleep);

    let mood = filter_logs(&logs, TypeTab::Only(LogType::Mood), "excel");
    assert_eq!(mood.len(), 1);
    assert_eq!(mood[0].value().as_mood(), Some(Mood::Excellent));
}

#[test]
fn predicates_combine_with_and() {
    let logs = sample_store().list();
    let hits = filter_logs(&logs, TypeTab::Only(LogType::Exercise), "run");
    assert_eq!(hits.len(), 1);
    assert!(filter_logs(&logs, TypeTab::Only(LogType::Sleep), "run").is_empty());
}

#[test]
fn filter_agrees_with_brute_force_for_every_tab_and_query() {
    let logs = sample_store().list();
    let tabs = [
        TypeTab::All,
        TypeTab::Only(LogType::Water),
        TypeTab::Only(LogType::Exercise),
        TypeTab::Only(LogType::Sleep),
        TypeTab::Only(LogType::Mood),
    ];
    let queries = ["", "e", "6", "GOOD", "day", "zzz", "8"];
    for tab in tabs {
        for query in queries {
            assert_eq!(
                LogFilter::new(tab, query).apply(&logs),
                brute_force(&logs, tab, query),
                "tab={tab} query={query:?}"
            );
        }
    }
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_logs(&[], TypeTab::Only(LogType::Mood), "good").is_empty());
}
