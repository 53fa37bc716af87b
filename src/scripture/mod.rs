// File: ./src/scripture/mod.rs
//! Scripture lookup by free-form citation.
//!
//! Book files are fetched on first use and kept in a bounded FIFO cache.
//! Nothing here fails outward: a missing book, chapter or psalm becomes a
//! bracketed placeholder in the text plus a warning.
pub mod book;
pub mod cache;
pub mod citation;

pub use book::{BookData, BookRoute, normalize_book};
pub use cache::BookCache;
pub use citation::{ChapterContext, Fragment, Passage, Reference, fragments, parse};

use crate::source::SharedSource;
use crate::warning::{LookupTarget, OfficeWarning};
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_CACHE_CAPACITY: usize = 20;
pub const NO_REFERENCE: &str = "No reference provided.";

/// Resolved text and the problems met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptureText {
    pub text: String,
    pub warnings: Vec<OfficeWarning>,
}

/// Removes a leading `chapter:verse ` tag from a line.
pub fn strip_verse_tag(line: &str) -> &str {
    let Some((ch, rest)) = line.split_once(':') else {
        return line;
    };
    if ch.is_empty() || !ch.bytes().all(|b| b.is_ascii_digit()) {
        return line;
    }
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    rest[digits..].trim_start()
}

/// `chapter:verse` numbers at the start of a psalter line.
fn verse_tag(line: &str) -> Option<(u32, u32)> {
    let (ch, rest) = line.trim_start().split_once(':')?;
    let ch = ch.parse().ok()?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    Some((ch, digits.parse().ok()?))
}

#[derive(Debug)]
pub struct ScriptureStore {
    source: SharedSource,
    translation: String,
    books: Mutex<BookCache<BookData>>,
}

impl ScriptureStore {
    pub fn new(source: SharedSource, capacity: usize, translation: impl Into<String>) -> Self {
        Self {
            source,
            translation: translation.into(),
            books: Mutex::new(BookCache::new(capacity)),
        }
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Cached book files, oldest first.
    pub async fn resident_books(&self) -> Vec<String> {
        self.books.lock().await.keys()
    }

    pub async fn resolve(&self, citation: &str) -> String {
        self.resolve_detailed(citation).await.text
    }

    pub async fn resolve_detailed(&self, citation: &str) -> ScriptureText {
        if citation.trim().is_empty() {
            return ScriptureText {
                text: NO_REFERENCE.to_string(),
                warnings: Vec::new(),
            };
        }

        let refs = parse(citation);
        if refs.is_empty() {
            return ScriptureText {
                text: format!("[Scripture unavailable: {}]", citation.trim()),
                warnings: vec![OfficeWarning::lookup(LookupTarget::Scripture, citation.trim()).logged()],
            };
        }

        let mut blocks = Vec::new();
        let mut warnings = Vec::new();
        let mut failed: HashSet<String> = HashSet::new();

        for reference in &refs {
            if failed.contains(&reference.book) {
                continue;
            }
            let route = BookRoute::for_book(&reference.book);
            let data = match self.load_book(&route).await {
                Ok(data) => data,
                Err(e) => {
                    warnings.push(OfficeWarning::fetch(route.path(), &e).logged());
                    blocks.push(format!("[Scripture unavailable: {}]", reference.book));
                    failed.insert(reference.book.clone());
                    continue;
                }
            };
            let block = match data.as_ref() {
                BookData::Prose(book) => extract_prose(book, reference, &mut warnings),
                BookData::Psalter(_) => {
                    extract_psalms(&data, &self.translation, &reference.passage, &mut warnings)
                }
            };
            if !block.is_empty() {
                blocks.push(block);
            }
        }

        let text = blocks
            .join("\n\n")
            .lines()
            .map(strip_verse_tag)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        ScriptureText { text, warnings }
    }

    /// Returns the cached book or fetches it. The lock is not held while
    /// fetching, so a concurrent load of the same book keeps the first copy.
    async fn load_book(&self, route: &BookRoute) -> Result<Arc<BookData>> {
        if let Some(data) = self.books.lock().await.get(&route.file) {
            log::debug!("Book cache hit: {}", route.file);
            return Ok(data);
        }

        let path = route.path();
        let json = self.source.fetch(&path).await?;
        let data = Arc::new(BookData::parse(route, &json)?);
        log::info!("Loaded {}", path);

        let (data, evicted) = self.books.lock().await.insert(&route.file, data);
        if let Some(old) = evicted {
            log::debug!("Evicted {} from book cache", old);
        }
        Ok(data)
    }
}

/// "Romans 9" or "Romans 9-12".
fn span_label(name: &str, passage: &Passage) -> String {
    if passage.last_chapter == passage.chapter {
        format!("{} {}", name, passage.chapter)
    } else {
        format!("{} {}-{}", name, passage.chapter, passage.last_chapter)
    }
}

/// Whether every number in the passage's chapter span was found.
fn span_complete(passage: &Passage, found: usize) -> bool {
    let span = u64::from(passage.last_chapter).saturating_sub(u64::from(passage.chapter)) + 1;
    found as u64 >= span
}

// Only chapters present in the file are visited, so an absurd range costs
// one warning rather than one per missing number.
fn extract_prose(
    book: &book::Book,
    reference: &Reference,
    warnings: &mut Vec<OfficeWarning>,
) -> String {
    let passage = reference.passage;
    let chapters = book.chapters_in(passage.chapter, passage.last_chapter);
    if !span_complete(&passage, chapters.len()) {
        warnings.push(
            OfficeWarning::lookup(LookupTarget::Scripture, span_label(&reference.book, &passage))
                .logged(),
        );
    }
    if chapters.is_empty() {
        return format!("[{} unavailable]", span_label(&reference.book, &passage));
    }

    let mut out = String::new();
    for chapter in chapters {
        for verse in chapter.verses.iter().filter(|v| passage.contains(chapter.num, v.num)) {
            out.push_str(&format!("{}:{} {}\n", chapter.num, verse.num, verse.text.trim()));
        }
    }
    out.trim_end().to_string()
}

fn extract_psalms(
    psalter: &BookData,
    translation: &str,
    passage: &Passage,
    warnings: &mut Vec<OfficeWarning>,
) -> String {
    let psalms = psalter.psalms_in(passage.chapter, passage.last_chapter);
    let found: Vec<(u32, &str)> = psalms
        .iter()
        .filter_map(|(num, p)| p.lines(translation).map(|l| (*num, l)))
        .collect();
    if !span_complete(passage, found.len()) {
        warnings.push(
            OfficeWarning::lookup(LookupTarget::Scripture, span_label("Psalm", passage)).logged(),
        );
    }
    if found.is_empty() {
        return format!("[{} unavailable]", span_label("Psalm", passage));
    }

    let mut out = String::new();
    for (num, lines) in found {
        for line in lines.lines() {
            if let Some((_, verse)) = verse_tag(line)
                && passage.contains(num, verse)
            {
                out.push_str(line.trim());
                out.push('\n');
            }
        }
    }
    out.trim_end().to_string()
}
