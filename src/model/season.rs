// File: ./src/model/season.rs
// Liturgical seasons, colours and the two-year lectionary label.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, EnumIter, EnumString};

/// A period of the church year. Each season keys opening sentences,
/// Marian antiphons and the invitatory decision tree.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Season {
    Advent,
    Christmas,
    Epiphany,
    #[default]
    Ordinary,
    Lent,
    Easter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Advent => write!(f, "Advent"),
            Season::Christmas => write!(f, "Christmas"),
            Season::Epiphany => write!(f, "Epiphany"),
            Season::Ordinary => write!(f, "Ordinary Time"),
            Season::Lent => write!(f, "Lent"),
            Season::Easter => write!(f, "Easter"),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LiturgicalColor {
    Purple,
    White,
    #[default]
    Green,
    Red,
    Rose,
}

impl fmt::Display for LiturgicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Daily office lectionary cycle. Flips at every Advent start.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LiturgicalYear {
    Year1,
    Year2,
}

impl LiturgicalYear {
    pub fn other(&self) -> Self {
        match self {
            LiturgicalYear::Year1 => LiturgicalYear::Year2,
            LiturgicalYear::Year2 => LiturgicalYear::Year1,
        }
    }

    /// Field suffix used by day entries (`year1` / `year2`).
    pub fn key(&self) -> &'static str {
        match self {
            LiturgicalYear::Year1 => "year1",
            LiturgicalYear::Year2 => "year2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LiturgicalYear::Year1 => "Year I",
            LiturgicalYear::Year2 => "Year II",
        }
    }
}

impl fmt::Display for LiturgicalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the season table. Rows are contiguous and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub season: Season,
    #[serde(rename = "file", alias = "content_file")]
    pub content_file: String,
    #[serde(rename = "color", alias = "liturgical_color", default)]
    pub liturgical_color: LiturgicalColor,
}

impl SeasonRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
