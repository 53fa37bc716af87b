// File: ./src/office/readings.rs
//! Reading selection by office, lectionary year and gospel placement.
//!
//! Morning Prayer reads the `_mp_` chain, every other office the `_ep_`
//! chain. Each chain tries the current year, then the other year, then the
//! unqualified field.
use crate::config::{GospelPlacement, Office};
use crate::model::{DayEntry, DayPart, LiturgicalYear};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    OldTestament,
    Epistle,
    Gospel,
}

impl ReadingKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "VARIABLE_READING_OT" => Some(ReadingKind::OldTestament),
            "VARIABLE_READING_EPISTLE" => Some(ReadingKind::Epistle),
            "VARIABLE_READING_GOSPEL" => Some(ReadingKind::Gospel),
            _ => None,
        }
    }

    fn field(&self) -> &'static str {
        match self {
            ReadingKind::OldTestament => "ot",
            ReadingKind::Epistle => "epistle",
            ReadingKind::Gospel => "gospel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingKind::OldTestament => "The Old Testament Lesson",
            ReadingKind::Epistle => "The Epistle",
            ReadingKind::Gospel => "The Holy Gospel",
        }
    }
}

pub fn day_part(office: Office) -> DayPart {
    if office.is_morning() {
        DayPart::Morning
    } else {
        DayPart::Evening
    }
}

/// Citation appointed for this reading, if any.
pub fn appointed<'a>(
    day: &'a DayEntry,
    kind: ReadingKind,
    office: Office,
    year: LiturgicalYear,
    gospel: GospelPlacement,
) -> Option<&'a str> {
    if kind == ReadingKind::Gospel && !gospel.includes(office) {
        return None;
    }
    let part = day_part(office).key();
    let same = format!("reading_{}_{}_{}", kind.field(), part, year.key());
    let other = format!("reading_{}_{}_{}", kind.field(), part, year.other().key());
    let plain = format!("reading_{}", kind.field());
    day.first_field(&[&same, &other, &plain])
}
