// File: ./src/scripture/citation.rs
//! Free-form citation parsing.
//!
//! `"Romans 8:1-11, 31-39"` is one book with two ranges; `"Genesis 1, Exodus 2"`
//! is two books. A fragment without a book name continues the previous book,
//! and a range without a chapter continues the chapter most recently named in
//! the same citation.
use super::book::is_psalm;

/// One book's worth of a citation with its raw ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub book: String,
    pub ranges: Vec<String>,
}

/// A contiguous span of verses, possibly running across chapters.
///
/// `last_verse == None` means through the end of `last_chapter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passage {
    pub chapter: u32,
    pub first_verse: u32,
    pub last_chapter: u32,
    pub last_verse: Option<u32>,
}

impl Passage {
    pub fn whole_chapters(first: u32, last: u32) -> Self {
        Self {
            chapter: first,
            first_verse: 1,
            last_chapter: last.max(first),
            last_verse: None,
        }
    }

    pub fn verses(chapter: u32, first: u32, last: Option<u32>) -> Self {
        Self {
            chapter,
            first_verse: first,
            last_chapter: chapter,
            last_verse: last,
        }
    }

    /// Whether `chapter:verse` falls inside this passage.
    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        let after_start = (chapter, verse) >= (self.chapter, self.first_verse);
        let before_end = match self.last_verse {
            Some(v) => (chapter, verse) <= (self.last_chapter, v),
            None => chapter <= self.last_chapter,
        };
        after_start && before_end
    }

    pub fn chapters(&self) -> std::ops::RangeInclusive<u32> {
        self.chapter..=self.last_chapter
    }
}

/// A passage together with the book it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub passage: Passage,
}

/// Chapter carried between the ranges of one citation.
///
/// Only a `chapter:verse` form sets it; whole-chapter references leave it
/// alone so `"Isaiah 55, 56"` reads as two chapters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterContext {
    current: Option<u32>,
}

impl ChapterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<u32> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Parses one range of a prose book.
    pub fn parse_range(&mut self, range: &str) -> Option<Passage> {
        let range = range.trim();
        if range.is_empty() {
            return None;
        }
        let (start, end) = split_dash(range);

        if let Some((ch, v)) = start.split_once(':') {
            let chapter = leading_number(ch)?;
            let first = leading_number(v)?;
            self.current = Some(chapter);
            return Some(match end {
                None => Passage::verses(chapter, first, None),
                Some(end) => self.range_end(chapter, first, end),
            });
        }

        let first = leading_number(start)?;
        match self.current {
            Some(chapter) => Some(match end {
                None => Passage::verses(chapter, first, None),
                Some(end) => self.range_end(chapter, first, end),
            }),
            None => Some(match end.and_then(leading_number) {
                Some(last) => Passage::whole_chapters(first, last),
                None => Passage::whole_chapters(first, first),
            }),
        }
    }

    fn range_end(&mut self, chapter: u32, first: u32, end: &str) -> Passage {
        if let Some((ch2, v2)) = end.split_once(':')
            && let (Some(ch2), Some(v2)) = (leading_number(ch2), leading_number(v2))
        {
            self.current = Some(ch2);
            return Passage {
                chapter,
                first_verse: first,
                last_chapter: ch2,
                last_verse: Some(v2),
            };
        }
        // "9-" and "9ff" run to the end of the chapter.
        Passage::verses(chapter, first, leading_number(end))
    }

    /// Parses one range of the psalter, where a bare number names a psalm.
    pub fn parse_psalm_range(&mut self, range: &str) -> Option<Passage> {
        let range = range.trim();
        let (start, end) = split_dash(range);
        if let Some((ps, v)) = start.split_once(':') {
            let psalm = leading_number(ps)?;
            let first = leading_number(v)?;
            self.current = Some(psalm);
            return Some(match end {
                None => Passage::verses(psalm, first, None),
                Some(end) => self.range_end(psalm, first, end),
            });
        }
        let first = leading_number(start)?;
        let last = end.and_then(leading_number).unwrap_or(first);
        Some(Passage::whole_chapters(first, last))
    }
}

fn split_dash(range: &str) -> (&str, Option<&str>) {
    match range.split_once(['-', '–']) {
        Some((a, b)) => (a.trim(), Some(b.trim())),
        None if range.ends_with("ff") => (range.trim_end_matches("ff").trim(), Some("")),
        None => (range, None),
    }
}

/// Digits at the start of `s`, ignoring a leading parenthesis ("9a" → 9).
pub fn leading_number(s: &str) -> Option<u32> {
    let s = s.trim().trim_start_matches('(');
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Splits `"Exodus 3:1-12"` into book and range. A fragment that is only a
/// range ("19", "31-39") has no book.
fn split_book(fragment: &str) -> (Option<&str>, &str) {
    let mut seen_letter = false;
    for (i, c) in fragment.char_indices() {
        if c.is_alphabetic() {
            seen_letter = true;
        }
        if seen_letter && i > 0 {
            let rest = fragment[i..].trim_start();
            let book = fragment[..i].trim();
            if !book.is_empty()
                && rest.starts_with(|c: char| c.is_ascii_digit())
                && book.chars().any(char::is_alphabetic)
                && fragment[..i].ends_with(|c: char| c.is_whitespace() || c.is_alphabetic() || c == '.')
            {
                return (Some(book.trim_end_matches('.')), rest);
            }
        }
    }
    if seen_letter {
        (Some(fragment.trim()), "")
    } else {
        (None, fragment.trim())
    }
}

/// A letter, or a numbered book such as "2 Peter".
fn starts_new_book(after_comma: &str) -> bool {
    let rest = after_comma.trim_start();
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() => true,
        Some('1'..='3') => {
            let tail = chars.as_str();
            tail.starts_with(char::is_whitespace)
                && tail.trim_start().starts_with(|c: char| c.is_alphabetic())
        }
        _ => false,
    }
}

/// Splits on commas followed by a letter, then carries the book forward.
pub fn fragments(citation: &str) -> Vec<Fragment> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in citation.char_indices() {
        if c == ',' && starts_new_book(&citation[i + 1..]) {
            pieces.push(&citation[start..i]);
            start = i + 1;
        }
    }
    pieces.push(&citation[start..]);

    let mut out: Vec<Fragment> = Vec::new();
    let mut current_book: Option<String> = None;
    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let (book, range) = split_book(piece);
        if let Some(book) = book {
            current_book = Some(book.to_string());
        }
        let Some(book) = current_book.clone() else {
            continue;
        };
        let ranges: Vec<String> = range
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        out.push(Fragment { book, ranges });
    }
    out
}

/// Full parse into references. Chapter context is local to this call.
pub fn parse(citation: &str) -> Vec<Reference> {
    let mut refs = Vec::new();
    let mut ctx = ChapterContext::new();
    let mut last_book: Option<String> = None;

    for fragment in fragments(citation) {
        if last_book.as_deref() != Some(fragment.book.as_str()) {
            ctx.reset();
            last_book = Some(fragment.book.clone());
        }
        let psalter = is_psalm(&fragment.book);
        for range in &fragment.ranges {
            let passage = if psalter {
                ctx.parse_psalm_range(range)
            } else {
                ctx.parse_range(range)
            };
            if let Some(passage) = passage {
                refs.push(Reference {
                    book: fragment.book.clone(),
                    passage,
                });
            }
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_before_number_does_not_split() {
        let frags = fragments("Jeremiah 4:9, 19");
        assert_eq!(
            frags,
            vec![Fragment {
                book: "Jeremiah".into(),
                ranges: vec!["4:9".into(), "19".into()],
            }]
        );
    }

    #[test]
    fn test_comma_before_book_splits() {
        let frags = fragments("Genesis 1, Exodus 2:1-10");
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].book, "Genesis");
        assert_eq!(frags[1].book, "Exodus");
        assert_eq!(frags[1].ranges, vec!["2:1-10"]);
    }

    #[test]
    fn test_numbered_books() {
        let refs = parse("1 Corinthians 13:1-13");
        assert_eq!(refs[0].book, "1 Corinthians");
        assert_eq!(refs[0].passage, Passage::verses(13, 1, Some(13)));
        let refs = parse("Mark 1:1-8, 2 Peter 3:8");
        assert_eq!(refs[1].book, "2 Peter");
        assert_eq!(refs[1].passage, Passage::verses(3, 8, None));
    }

    #[test]
    fn test_start_verse_without_end_runs_to_chapter_end() {
        let refs = parse("Jeremiah 4:9, 19");
        assert_eq!(refs[0].passage, Passage::verses(4, 9, None));
        assert_eq!(refs[1].passage, Passage::verses(4, 19, None));
        assert!(refs[0].passage.contains(4, 10));
        assert!(!refs[0].passage.contains(5, 1));

        let refs = parse("Psalm 119:105");
        assert_eq!(refs[0].passage, Passage::verses(119, 105, None));
    }

    #[test]
    fn test_verse_suffixes_and_open_ranges() {
        let mut ctx = ChapterContext::new();
        assert_eq!(ctx.parse_range("6:1-9a"), Some(Passage::verses(6, 1, Some(9))));
        assert_eq!(ctx.parse_range("10-"), Some(Passage::verses(6, 10, None)));
        assert_eq!(ctx.parse_range("3ff"), Some(Passage::verses(6, 3, None)));
    }

    #[test]
    fn test_cross_chapter_range() {
        let refs = parse("Isaiah 52:13-53:12");
        let p = refs[0].passage;
        assert!(p.contains(52, 15));
        assert!(p.contains(53, 12));
        assert!(!p.contains(53, 13));
        assert!(!p.contains(52, 12));
    }

    #[test]
    fn test_whole_chapters_without_context() {
        let refs = parse("Isaiah 55, 56");
        assert_eq!(refs[0].passage, Passage::whole_chapters(55, 55));
        assert_eq!(refs[1].passage, Passage::whole_chapters(56, 56));
        let refs = parse("Ruth 1-2");
        assert_eq!(refs[0].passage, Passage::whole_chapters(1, 2));
    }

    #[test]
    fn test_psalm_numbers_are_not_verses() {
        let refs = parse("Psalm 24, 29, 119:1-32");
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].passage, Passage::whole_chapters(24, 24));
        assert_eq!(refs[1].passage, Passage::whole_chapters(29, 29));
        assert_eq!(refs[2].passage, Passage::verses(119, 1, Some(32)));
    }

    #[test]
    fn test_context_does_not_leak_between_calls() {
        let _ = parse("Romans 8:1-11");
        let refs = parse("Lamentations 3");
        assert_eq!(refs[0].passage, Passage::whole_chapters(3, 3));
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("9a"), Some(9));
        assert_eq!(leading_number("(3)"), Some(3));
        assert_eq!(leading_number(" 12 "), Some(12));
        assert_eq!(leading_number("a"), None);
    }
}
