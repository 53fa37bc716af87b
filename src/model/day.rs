// File: ./src/model/day.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which half of the day an office draws its propers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Evening,
}

impl DayPart {
    pub fn key(&self) -> &'static str {
        match self {
            DayPart::Morning => "mp",
            DayPart::Evening => "ep",
        }
    }
}

/// A lectionary day from a season content file.
///
/// Only the fields every file shares are typed; readings, psalms and antiphons
/// live in `fields` under their canonical keys (`psalms_mp`,
/// `reading_ot_ep_year2`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub day_of_season: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub collect: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl DayEntry {
    /// Placeholder entry used when a season file could not be loaded.
    pub fn unavailable() -> Self {
        Self {
            title: Some("Error loading data".to_string()),
            ..Self::default()
        }
    }

    /// A non-empty string field. Empty strings count as absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// First present field among `keys`.
    pub fn first_field(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.field(k))
    }

    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Day Title")
    }

    pub fn psalms(&self, part: DayPart) -> Option<&str> {
        let keyed = format!("psalms_{}", part.key());
        self.first_field(&[&keyed, "psalms"])
    }

    pub fn antiphon(&self, part: DayPart) -> Option<&str> {
        let keyed = format!("antiphon_{}", part.key());
        self.first_field(&[&keyed, "antiphon"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_fields_and_fallbacks() {
        let json = r#"{
            "date": "2026-03-01",
            "title": "Second Sunday in Lent",
            "collect": "collect-lent-2",
            "psalms_mp": "24, 29",
            "psalms": "8",
            "antiphon": "",
            "antiphon_ep": "Return to the Lord",
            "reading_ot_mp_year2": "Jeremiah 1:1-10"
        }"#;
        let entry: DayEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.psalms(DayPart::Morning), Some("24, 29"));
        assert_eq!(entry.psalms(DayPart::Evening), Some("8"));
        assert_eq!(entry.antiphon(DayPart::Morning), None);
        assert_eq!(entry.antiphon(DayPart::Evening), Some("Return to the Lord"));
        assert_eq!(entry.field("reading_ot_mp_year2"), Some("Jeremiah 1:1-10"));
        assert_eq!(entry.day_of_season, None);
    }
}
