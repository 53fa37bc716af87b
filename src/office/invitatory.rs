// File: ./src/office/invitatory.rs
//! Which psalm or canticle follows the invitatory.
use crate::config::Office;
use crate::model::Season;
use chrono::{Datelike, NaiveDate, Weekday};

pub const INVITATORY_MORNING: &str = "bcp-invitatory-full-mp";
pub const INVITATORY_OTHER: &str = "bcp-invitatory-full-ep-noon-compline";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitatoryPsalm {
    /// Christ our Passover, through the Easter season.
    PaschaNostrum,
    /// All of Psalm 95, on Fridays in Lent.
    Psalm95,
    Jubilate,
    Venite,
}

impl InvitatoryPsalm {
    /// Noonday and Compline have no invitatory psalm.
    pub fn choose(office: Office, season: Season, date: NaiveDate) -> Option<Self> {
        if !office.is_major() {
            return None;
        }
        Some(match season {
            Season::Easter => InvitatoryPsalm::PaschaNostrum,
            Season::Lent if date.weekday() == Weekday::Fri => InvitatoryPsalm::Psalm95,
            Season::Lent => InvitatoryPsalm::Jubilate,
            _ => InvitatoryPsalm::Venite,
        })
    }

    /// Component id; `None` when the text comes from the psalter.
    pub fn component_id(&self) -> Option<&'static str> {
        match self {
            InvitatoryPsalm::PaschaNostrum => Some("bcp-pascha-nostrum"),
            InvitatoryPsalm::Psalm95 => None,
            InvitatoryPsalm::Jubilate => Some("bcp-jubilate"),
            InvitatoryPsalm::Venite => Some("bcp-venite"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvitatoryPsalm::PaschaNostrum => "Christ Our Passover",
            InvitatoryPsalm::Psalm95 => "Psalm 95",
            InvitatoryPsalm::Jubilate => "Jubilate",
            InvitatoryPsalm::Venite => "Venite",
        }
    }
}

pub fn invitatory_id(office: Office) -> &'static str {
    if office.is_morning() {
        INVITATORY_MORNING
    } else {
        INVITATORY_OTHER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_decision_tree() {
        let sunday = d(2026, 3, 1);
        let friday = d(2026, 3, 6);
        assert_eq!(
            InvitatoryPsalm::choose(Office::Morning, Season::Lent, sunday),
            Some(InvitatoryPsalm::Jubilate)
        );
        assert_eq!(
            InvitatoryPsalm::choose(Office::Evening, Season::Lent, friday),
            Some(InvitatoryPsalm::Psalm95)
        );
        assert_eq!(
            InvitatoryPsalm::choose(Office::Morning, Season::Easter, friday),
            Some(InvitatoryPsalm::PaschaNostrum)
        );
        assert_eq!(
            InvitatoryPsalm::choose(Office::Morning, Season::Advent, friday),
            Some(InvitatoryPsalm::Venite)
        );
        assert_eq!(InvitatoryPsalm::choose(Office::Compline, Season::Lent, friday), None);
    }
}
