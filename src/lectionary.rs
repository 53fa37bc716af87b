// File: ./src/lectionary.rs
//! Day-entry lookup inside a season content file.
//!
//! Matching is a strict cascade, first hit wins:
//! 1. exact date (ISO or "Month D, YYYY"),
//! 2. day-of-season offset,
//! 3. month and day with the year stripped from both sides,
//! 4. the first entry in the file (with a warning).
use crate::calendar::{SeasonCalendar, format_iso, format_long, format_month_day};
use crate::model::DayEntry;
use crate::source::{SharedSource, fetch_json};
use crate::warning::{LookupTarget, OfficeWarning};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Which rule of the cascade produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    DayOfSeason(i64),
    MonthDay,
    Fallback,
}

/// Drops a trailing ", YYYY" from a long-form date.
fn strip_year(date: &str) -> &str {
    match date.rsplit_once(',') {
        Some((head, tail)) if tail.trim().len() == 4 && tail.trim().bytes().all(|b| b.is_ascii_digit()) => {
            head.trim()
        }
        _ => date.trim(),
    }
}

fn same_month_day(entry_date: &str, date: NaiveDate, long_no_year: &str) -> bool {
    if let Ok(d) = NaiveDate::parse_from_str(entry_date.trim(), "%Y-%m-%d") {
        return d.month() == date.month() && d.day() == date.day();
    }
    strip_year(entry_date) == long_no_year
}

/// Runs the cascade over an already loaded content file.
///
/// Returns `None` only when the file has no entries at all.
pub fn find_entry<'a>(
    entries: &'a [DayEntry],
    date: NaiveDate,
    calendar: &SeasonCalendar,
) -> Option<(&'a DayEntry, MatchKind)> {
    let iso = format_iso(date);
    let long = format_long(date);

    if let Some(e) = entries
        .iter()
        .find(|e| matches!(e.date.as_deref(), Some(d) if d == iso || d == long))
    {
        return Some((e, MatchKind::Exact));
    }

    if let Some(day) = calendar.day_of_season(date)
        && let Some(e) = entries.iter().find(|e| e.day_of_season == Some(day))
    {
        return Some((e, MatchKind::DayOfSeason(day)));
    }

    let long_no_year = format_month_day(date);
    if let Some(e) = entries.iter().find(|e| {
        e.date
            .as_deref()
            .is_some_and(|d| same_month_day(d, date, &long_no_year))
    }) {
        return Some((e, MatchKind::MonthDay));
    }

    entries.first().map(|e| (e, MatchKind::Fallback))
}

/// The day entry chosen for a date, plus what went wrong finding it.
#[derive(Debug, Clone)]
pub struct DayLookup {
    pub entry: DayEntry,
    pub kind: MatchKind,
    pub warnings: Vec<OfficeWarning>,
}

/// Loads season content files on demand and keeps them for the session.
#[derive(Debug)]
pub struct Lectionary {
    source: SharedSource,
    files: Mutex<HashMap<String, Arc<Vec<DayEntry>>>>,
}

impl Lectionary {
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches `season/<file>` unless it is already cached.
    pub async fn load_file(&self, file: &str) -> Result<Arc<Vec<DayEntry>>> {
        if let Some(entries) = self.files.lock().await.get(file) {
            log::debug!("Season content {} served from cache", file);
            return Ok(entries.clone());
        }

        let path = format!("season/{}", file);
        let entries: Vec<DayEntry> = fetch_json(self.source.as_ref(), &path).await?;
        log::info!("Loaded {} day entries from {}", entries.len(), path);

        let entries = Arc::new(entries);
        self.files
            .lock()
            .await
            .entry(file.to_string())
            .or_insert_with(|| entries.clone());
        Ok(entries)
    }

    pub async fn cached_files(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.lock().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Finds the entry for `date` in `file`. Never fails: a file that cannot
    /// be loaded yields a placeholder entry and a `FetchFailure`.
    pub async fn find(&self, calendar: &SeasonCalendar, file: &str, date: NaiveDate) -> DayLookup {
        let entries = match self.load_file(file).await {
            Ok(entries) => entries,
            Err(e) => {
                return DayLookup {
                    entry: DayEntry::unavailable(),
                    kind: MatchKind::Fallback,
                    warnings: vec![OfficeWarning::fetch(format!("season/{}", file), &e).logged()],
                };
            }
        };

        match find_entry(&entries, date, calendar) {
            Some((entry, kind)) => {
                let mut warnings = Vec::new();
                match kind {
                    MatchKind::Fallback => warnings.push(
                        OfficeWarning::lookup(
                            LookupTarget::DayEntry,
                            format!("{} in {}", format_iso(date), file),
                        )
                        .logged(),
                    ),
                    other => log::debug!("{:?} match for {} in {}", other, format_iso(date), file),
                }
                DayLookup {
                    entry: entry.clone(),
                    kind,
                    warnings,
                }
            }
            None => DayLookup {
                entry: DayEntry::unavailable(),
                kind: MatchKind::Fallback,
                warnings: vec![
                    OfficeWarning::lookup(LookupTarget::DayEntry, format!("{} (empty file)", file))
                        .logged(),
                ],
            },
        }
    }
}
