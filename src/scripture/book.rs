// File: ./src/scripture/book.rs
//! Book naming, file routing and the on-disk book formats.
use serde::Deserialize;
use std::collections::BTreeMap;

const NT_BOOKS: &[&str] = &[
    "1corinthians",
    "1john",
    "1peter",
    "1thessalonians",
    "1timothy",
    "2corinthians",
    "2john",
    "2peter",
    "2thessalonians",
    "2timothy",
    "3john",
    "acts",
    "colossians",
    "ephesians",
    "galatians",
    "hebrews",
    "james",
    "john",
    "jude",
    "luke",
    "mark",
    "matthew",
    "philemon",
    "philippians",
    "revelation",
    "romans",
    "titus",
];

// Deuterocanonical and variant names that share a file with another book.
const BOOK_ALIASES: &[(&str, &str)] = &[
    ("ecclesiasticus", "sirach"),
    ("wisdomofsolomon", "wisdom"),
    ("songofthreeyoungmen", "daniel"),
    ("songofthreeholychildren", "daniel"),
    ("belandthedragon", "daniel"),
    ("bel", "daniel"),
    ("susanna", "daniel"),
    ("prayerofazariah", "daniel"),
    ("therestofesther", "estherGK"),
    ("additionstoesther", "estherGK"),
    ("therestofdaniel", "danielGK"),
    ("additionstodaniel", "danielGK"),
    ("songsofsolomon", "songofsolomon"),
    ("canticles", "songofsolomon"),
    ("canticleofcanticles", "songofsolomon"),
];

pub const PSALTER_FILE: &str = "psalms.json";

pub fn is_psalm(book: &str) -> bool {
    book.trim().to_lowercase().starts_with("psalm")
}

/// Lowercase, whitespace removed, aliases applied.
pub fn normalize_book(book: &str) -> String {
    let key: String = book
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    BOOK_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    fn folder(&self) -> &'static str {
        match self {
            Testament::Old => "OT",
            Testament::New => "NT",
        }
    }
}

/// Where a book's text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRoute {
    /// Cache key, e.g. `romans.json`.
    pub file: String,
    pub testament: Testament,
    pub psalter: bool,
}

impl BookRoute {
    pub fn for_book(book: &str) -> Self {
        if is_psalm(book) {
            return Self {
                file: PSALTER_FILE.to_string(),
                testament: Testament::Old,
                psalter: true,
            };
        }
        let name = normalize_book(book);
        let testament = if NT_BOOKS.contains(&name.as_str()) {
            Testament::New
        } else {
            Testament::Old
        };
        Self {
            file: format!("{}.json", name),
            testament,
            psalter: false,
        }
    }

    /// Path relative to the content root.
    pub fn path(&self) -> String {
        format!("bible/{}/{}", self.testament.folder(), self.file)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Verse {
    pub num: u32,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub num: u32,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn chapter(&self, num: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.num == num)
    }

    /// Chapters present in the file whose number lies in `first..=last`,
    /// in file order.
    pub fn chapters_in(&self, first: u32, last: u32) -> Vec<&Chapter> {
        self.chapters
            .iter()
            .filter(|c| (first..=last).contains(&c.num))
            .collect()
    }
}

/// Some book files are wrapped in a one-element array.
#[derive(Deserialize)]
#[serde(untagged)]
enum BookFile {
    Wrapped(Vec<Book>),
    Single(Book),
}

/// One psalm: `{"id": "PSALM 95", "text": {"NRSV": "95:1 ...\n95:2 ..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PsalmRecord {
    pub id: String,
    pub text: BTreeMap<String, String>,
}

impl PsalmRecord {
    /// `"PSALM 95"` → 95.
    pub fn number(&self) -> Option<u32> {
        let id = self.id.trim();
        let prefix = id.get(..5)?;
        if !prefix.eq_ignore_ascii_case("psalm") {
            return None;
        }
        id[5..].trim().parse().ok()
    }

    /// Text in `translation`, else whichever translation the record has.
    pub fn lines(&self, translation: &str) -> Option<&str> {
        self.text
            .get(translation)
            .or_else(|| self.text.values().next())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub enum BookData {
    Prose(Book),
    Psalter(Vec<PsalmRecord>),
}

impl BookData {
    pub fn parse(route: &BookRoute, json: &str) -> anyhow::Result<Self> {
        if route.psalter {
            return Ok(BookData::Psalter(serde_json::from_str(json)?));
        }
        match serde_json::from_str::<BookFile>(json)? {
            BookFile::Single(book) => Ok(BookData::Prose(book)),
            BookFile::Wrapped(mut books) => {
                if books.is_empty() {
                    anyhow::bail!("{} contains no book", route.file);
                }
                Ok(BookData::Prose(books.swap_remove(0)))
            }
        }
    }

    /// Psalms present in the psalter numbered `first..=last`, ascending.
    pub fn psalms_in(&self, first: u32, last: u32) -> Vec<(u32, &PsalmRecord)> {
        let BookData::Psalter(records) = self else {
            return Vec::new();
        };
        let mut found: Vec<(u32, &PsalmRecord)> = records
            .iter()
            .filter_map(|p| p.number().map(|n| (n, p)))
            .filter(|(n, _)| (first..=last).contains(n))
            .collect();
        found.sort_by_key(|(n, _)| *n);
        found.dedup_by_key(|(n, _)| *n);
        found
    }

    pub fn psalm(&self, num: u32) -> Option<&PsalmRecord> {
        let id = format!("PSALM {}", num);
        match self {
            BookData::Psalter(records) => records.iter().find(|p| p.id.trim().eq_ignore_ascii_case(&id)),
            BookData::Prose(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_and_aliases() {
        assert_eq!(normalize_book("1 Corinthians"), "1corinthians");
        assert_eq!(normalize_book("Ecclesiasticus"), "sirach");
        assert_eq!(normalize_book("Wisdom of Solomon"), "wisdom");
        assert_eq!(normalize_book("Additions to Esther"), "estherGK");
        assert_eq!(normalize_book("Song of Three Young Men"), "daniel");
    }

    #[test]
    fn test_routing() {
        assert_eq!(BookRoute::for_book("Romans").path(), "bible/NT/romans.json");
        assert_eq!(BookRoute::for_book("Jeremiah").path(), "bible/OT/jeremiah.json");
        assert_eq!(BookRoute::for_book("Canticles").path(), "bible/OT/songofsolomon.json");
        let ps = BookRoute::for_book("Psalms");
        assert!(ps.psalter);
        assert_eq!(ps.path(), "bible/OT/psalms.json");
    }

    #[test]
    fn test_wrapped_book_file() {
        let route = BookRoute::for_book("Jude");
        let data = BookData::parse(
            &route,
            r#"[{"chapters":[{"num":1,"verses":[{"num":1,"text":"Jude, a servant"}]}]}]"#,
        )
        .unwrap();
        match data {
            BookData::Prose(book) => assert_eq!(book.chapter(1).unwrap().verses.len(), 1),
            BookData::Psalter(_) => panic!("expected prose"),
        }
    }

    #[test]
    fn test_psalm_translation_fallback() {
        let route = BookRoute::for_book("Psalm");
        let data = BookData::parse(&route, r#"[{"id":"Psalm 23","text":{"KJV":"23:1 The LORD"}}]"#).unwrap();
        let ps = data.psalm(23).unwrap();
        assert_eq!(ps.lines("NRSV"), Some("23:1 The LORD"));
        assert!(data.psalm(24).is_none());
        assert_eq!(ps.number(), Some(23));
    }

    #[test]
    fn test_ranges_only_visit_present_entries() {
        let route = BookRoute::for_book("Psalms");
        let data = BookData::parse(
            &route,
            r#"[{"id":"PSALM 3","text":{"NRSV":"3:1 c"}},{"id":"PSALM 1","text":{"NRSV":"1:1 a"}},{"id":"Psalm 400","text":{}}]"#,
        )
        .unwrap();
        let nums: Vec<u32> = data.psalms_in(1, u32::MAX).iter().map(|(n, _)| *n).collect();
        assert_eq!(nums, vec![1, 3, 400]);
        assert!(data.psalms_in(4, 399).is_empty());

        let book = Book {
            chapters: vec![Chapter { num: 1, verses: Vec::new() }],
        };
        assert_eq!(book.chapters_in(1, u32::MAX).len(), 1);
        assert!(book.chapters_in(2, u32::MAX).is_empty());
    }
}
