// File: ./src/psalter.rs
//! Traditional thirty-day psalm cycle (BCP 1979, p. 935).
use crate::model::DayPart;
use chrono::{Datelike, NaiveDate};

/// `(morning, evening)` psalms, indexed by day of month minus one.
/// Day 31 repeats parts of days 29 and 30.
const CYCLE: [(&str, &str); 31] = [
    ("1, 2, 3, 4, 5", "6, 7, 8"),
    ("9, 10, 11", "12, 13, 14"),
    ("15, 16, 17", "18"),
    ("19, 20, 21", "22, 23"),
    ("24, 25, 26", "27, 28, 29"),
    ("30, 31", "32, 33, 34"),
    ("35, 36", "37"),
    ("38, 39, 40", "41, 42, 43"),
    ("44, 45, 46", "47, 48, 49"),
    ("50, 51, 52", "53, 54, 55"),
    ("56, 57, 58", "59, 60, 61"),
    ("62, 63, 64", "65, 66, 67"),
    ("68", "69, 70"),
    ("71, 72", "73, 74"),
    ("75, 76, 77", "78"),
    ("79, 80, 81", "82, 83, 84, 85"),
    ("86, 87, 88", "89"),
    ("90, 91, 92", "93, 94"),
    ("95, 96, 97", "98, 99, 100, 101"),
    ("102, 103", "104"),
    ("105", "106"),
    ("107", "108, 109"),
    ("110, 111, 112, 113", "114, 115"),
    ("116, 117, 118", "119:1-32"),
    ("119:33-72", "119:73-104"),
    ("119:105-144", "119:145-176"),
    ("120, 121, 122, 123, 124, 125", "126, 127, 128, 129, 130, 131"),
    ("132, 133, 134, 135", "136, 137, 138"),
    ("139, 140, 141", "142, 143, 144"),
    ("145, 146, 147", "148, 149, 150"),
    ("139, 140", "141, 142, 143"),
];

/// Psalms appointed for a day of the month.
pub fn psalms_for_day(day_of_month: u32, part: DayPart) -> Option<&'static str> {
    let idx = usize::try_from(day_of_month).ok()?.checked_sub(1)?;
    let &(morning, evening) = CYCLE.get(idx)?;
    Some(match part {
        DayPart::Morning => morning,
        DayPart::Evening => evening,
    })
}

pub fn psalms_for_date(date: NaiveDate, part: DayPart) -> Option<&'static str> {
    psalms_for_day(date.day(), part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_lookup() {
        assert_eq!(psalms_for_day(1, DayPart::Morning), Some("1, 2, 3, 4, 5"));
        assert_eq!(psalms_for_day(24, DayPart::Evening), Some("119:1-32"));
        assert_eq!(psalms_for_day(31, DayPart::Evening), Some("141, 142, 143"));
        assert_eq!(psalms_for_day(0, DayPart::Morning), None);
        assert_eq!(psalms_for_day(32, DayPart::Morning), None);
    }
}
