// File: tests/day_entry_priority.rs
mod common;

use common::{LENT, d};
use orarium::calendar::SeasonCalendar;
use orarium::lectionary::{Lectionary, MatchKind, find_entry};
use orarium::model::DayEntry;
use orarium::source::MemorySource;
use orarium::warning::OfficeWarning;
use std::sync::Arc;

fn entries(json: &str) -> Vec<DayEntry> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_exact_date_beats_day_of_season() {
    let cal = SeasonCalendar::builtin().unwrap();
    // The offset entry comes first in the file and would also match.
    let data = entries(
        r#"[
            {"day_of_season":12,"title":"by offset"},
            {"date":"2026-03-01","title":"exact"}
        ]"#,
    );
    let (entry, kind) = find_entry(&data, d(2026, 3, 1), &cal).unwrap();
    assert_eq!(entry.title.as_deref(), Some("exact"));
    assert_eq!(kind, MatchKind::Exact);

    // Same with the fixture file, which carries both for March 1.
    let lent = entries(LENT);
    let (entry, kind) = find_entry(&lent, d(2026, 3, 1), &cal).unwrap();
    assert_eq!(entry.title.as_deref(), Some("Second Sunday in Lent"));
    assert_eq!(kind, MatchKind::Exact);
}

#[test]
fn test_day_of_season_beats_month_day() {
    let cal = SeasonCalendar::builtin().unwrap();
    let data = entries(
        r#"[
            {"date":"March 1, 2024","title":"other year"},
            {"day_of_season":12,"title":"by offset"}
        ]"#,
    );
    let (entry, kind) = find_entry(&data, d(2026, 3, 1), &cal).unwrap();
    assert_eq!(entry.title.as_deref(), Some("by offset"));
    assert_eq!(kind, MatchKind::DayOfSeason(12));
}

#[test]
fn test_month_day_ignores_year_in_both_forms() {
    let cal = SeasonCalendar::builtin().unwrap();
    let data = entries(
        r#"[
            {"date":"December 24, 2019","title":"long"},
            {"date":"2019-12-25","title":"iso"}
        ]"#,
    );
    // Outside any day-of-season entry, so month and day decide.
    let (entry, kind) = find_entry(&data, d(2027, 12, 25), &cal).unwrap();
    assert_eq!(entry.title.as_deref(), Some("iso"));
    assert_eq!(kind, MatchKind::MonthDay);

    let (entry, _) = find_entry(&data, d(2027, 12, 24), &cal).unwrap();
    assert_eq!(entry.title.as_deref(), Some("long"));
}

#[tokio::test]
async fn test_no_match_uses_first_entry_and_warns() {
    let cal = SeasonCalendar::builtin().unwrap();
    let source = Arc::new(MemorySource::new().with_file("season/lent.json", LENT));
    let lectionary = Lectionary::new(source.clone());

    // March 10 is day 21: no exact, offset or month-day entry.
    let lookup = lectionary.find(&cal, "lent.json", d(2026, 3, 10)).await;
    assert_eq!(lookup.kind, MatchKind::Fallback);
    assert_eq!(lookup.entry.title.as_deref(), Some("Ash Wednesday"));
    assert!(matches!(lookup.warnings[0], OfficeWarning::LookupMiss { .. }));

    // The file is fetched once per session.
    lectionary.find(&cal, "lent.json", d(2026, 3, 1)).await;
    assert_eq!(source.fetch_log(), vec!["season/lent.json"]);
    assert_eq!(lectionary.cached_files().await, vec!["lent.json"]);
}
