// File: ./src/calendar.rs
//! Date → liturgical season classification.
//!
//! The calendar is a table of contiguous `SeasonRange`s. Everything else
//! (liturgical year, day-of-season numbering) is derived from that table
//! plus date arithmetic, so extending the table is the only yearly upkeep.

use crate::config::Config;
use crate::model::{LiturgicalColor, LiturgicalYear, Season, SeasonRange};
use crate::source::ContentSource;
use crate::warning::OfficeWarning;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone};

const BUILTIN_TABLE: &str = include_str!("../data/seasons.json");

pub const DEFAULT_FALLBACK_FILE: &str = "ordinary1.json";

/// Long lookup form used by content files ("March 1, 2026").
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Long form without the year ("March 1").
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Result of classifying one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub date: NaiveDate,
    pub season: Season,
    pub content_file: String,
    pub liturgical_color: LiturgicalColor,
    pub liturgical_year: LiturgicalYear,
    /// Set when no range matched and the fallback was used.
    pub warning: Option<OfficeWarning>,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SeasonCalendar {
    ranges: Vec<SeasonRange>,
    fallback_file: String,
}

impl SeasonCalendar {
    pub fn new(ranges: Vec<SeasonRange>) -> Self {
        Self {
            ranges,
            fallback_file: DEFAULT_FALLBACK_FILE.to_string(),
        }
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TABLE).context("Built-in season table is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let ranges: Vec<SeasonRange> = serde_json::from_str(json)?;
        if let Some(bad) = ranges.iter().find(|r| r.end < r.start) {
            anyhow::bail!(
                "Season range {} .. {} ({}) ends before it starts",
                bad.start,
                bad.end,
                bad.content_file
            );
        }
        Ok(Self::new(ranges))
    }

    /// The configured season table (fetched from the content tree) or the
    /// built-in one, with the configured fallback file applied.
    pub async fn load(source: &dyn ContentSource, config: &Config) -> Result<Self> {
        let calendar = match &config.season_table {
            Some(path) => {
                let json = source
                    .fetch(path)
                    .await
                    .with_context(|| format!("Failed to load season table {}", path))?;
                Self::from_json(&json).with_context(|| format!("Invalid season table {}", path))?
            }
            None => Self::builtin()?,
        };
        Ok(calendar.with_fallback_file(config.fallback_content_file.clone()))
    }

    pub fn with_fallback_file(mut self, file: impl Into<String>) -> Self {
        self.fallback_file = file.into();
        self
    }

    pub fn ranges(&self) -> &[SeasonRange] {
        &self.ranges
    }

    /// First and last covered day.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.ranges.iter().map(|r| r.start).min()?;
        let end = self.ranges.iter().map(|r| r.end).max()?;
        Some((start, end))
    }

    /// First range containing `date`, in table order.
    pub fn range_for(&self, date: NaiveDate) -> Option<&SeasonRange> {
        self.ranges.iter().find(|r| r.contains(date))
    }

    pub fn classify(&self, date: NaiveDate) -> Classification {
        let liturgical_year = self.liturgical_year(date);
        match self.range_for(date) {
            Some(range) => Classification {
                date,
                season: range.season,
                content_file: range.content_file.clone(),
                liturgical_color: range.liturgical_color,
                liturgical_year,
                warning: None,
            },
            None => Classification {
                date,
                season: Season::Ordinary,
                content_file: self.fallback_file.clone(),
                liturgical_color: LiturgicalColor::Green,
                liturgical_year,
                warning: Some(
                    OfficeWarning::ClassificationMiss {
                        date,
                        fallback_file: self.fallback_file.clone(),
                    }
                    .logged(),
                ),
            },
        }
    }

    /// Classify a timestamp by its calendar day in its own time zone.
    pub fn classify_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Classification {
        self.classify(at.date_naive())
    }

    /// Two-year cycle label: odd number of Advent starts on or before the
    /// date is Year II, even is Year I.
    pub fn liturgical_year(&self, date: NaiveDate) -> LiturgicalYear {
        let advents_passed = self
            .ranges
            .iter()
            .filter(|r| r.season == Season::Advent && r.start <= date)
            .count();
        if advents_passed % 2 == 0 {
            LiturgicalYear::Year1
        } else {
            LiturgicalYear::Year2
        }
    }

    /// Anchor for day-of-season numbering.
    ///
    /// Usually the matched range's start. An ordinary-time range that directly
    /// continues another ordinary range (the season split across several
    /// files) is anchored at the start of the whole contiguous run.
    pub fn season_start_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        let idx = self.ranges.iter().position(|r| r.contains(date))?;
        let range = &self.ranges[idx];
        if range.season != Season::Ordinary {
            return Some(range.start);
        }

        let mut start = range.start;
        loop {
            let Some(prev_day) = start.pred_opt() else {
                break;
            };
            match self
                .ranges
                .iter()
                .find(|r| r.season == Season::Ordinary && r.end == prev_day)
            {
                Some(prev) => start = prev.start,
                None => break,
            }
        }
        Some(start)
    }

    /// 1-based day count from the season anchor.
    pub fn day_of_season(&self, date: NaiveDate) -> Option<i64> {
        let start = self.season_start_date(date)?;
        Some((date - start).num_days() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_builtin_table_loads() {
        let cal = SeasonCalendar::builtin().unwrap();
        let (start, end) = cal.span().unwrap();
        assert_eq!(start, d(2025, 11, 30));
        assert_eq!(end, d(2030, 12, 24));
    }

    #[test]
    fn test_long_formats() {
        assert_eq!(format_long(d(2026, 3, 1)), "March 1, 2026");
        assert_eq!(format_month_day(d(2026, 12, 25)), "December 25");
        assert_eq!(format_iso(d(2026, 3, 6)), "2026-03-06");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = r#"[{"start":"2026-02-18","end":"2026-02-01","season":"lent","file":"lent.json"}]"#;
        assert!(SeasonCalendar::from_json(json).is_err());
    }

    #[test]
    fn test_single_day_ordinary_is_its_own_anchor() {
        let cal = SeasonCalendar::builtin().unwrap();
        // The lone ordinary day before Ash Wednesday is not contiguous with
        // the summer run.
        assert_eq!(cal.season_start_date(d(2026, 2, 17)), Some(d(2026, 2, 17)));
        assert_eq!(cal.day_of_season(d(2026, 2, 17)), Some(1));
    }
}
