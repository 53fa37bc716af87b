// File: ./src/office/mod.rs
//! Rubric walk: turns an office's token sequence into rendered sections.
//!
//! Tokens are resolved strictly in sequence order, one at a time, awaiting
//! any scripture fetch before moving on. Two devotions are interposed around
//! anchor tokens rather than named in the rubric: the Angelus before the
//! invitatory and the Trisagion after the absolution slot.
//!
//! A render never fails. Anything missing becomes a visible placeholder and
//! an `OfficeWarning`.
pub mod invitatory;
pub mod readings;
pub mod slots;

use crate::calendar::{Classification, format_long};
use crate::config::{MarianPosition, Office, OfficeConfig};
use crate::format::{psalm_as_verses, scripture_as_prose};
use crate::model::{ComponentLibrary, DayEntry, LiturgicalColor, LiturgicalYear, Rubric, Season};
use crate::psalter;
use crate::scripture::ScriptureStore;
use crate::warning::{LookupTarget, OfficeWarning};
use chrono::NaiveDate;
use invitatory::{InvitatoryPsalm, invitatory_id};
use readings::{ReadingKind, appointed, day_part};
use slots::{ABSOLUTION_SLOT, Slot};

pub const INVITATORY_TOKEN: &str = "bcp-invitatory-full";
const DEFAULT_COLLECT: &str = "collect-default-ferial";

// Day entries name a few collects differently from the component library.
const COLLECT_ALIASES: &[(&str, &str)] = &[(
    "collect-transfiguration",
    "collect-the-transfiguration-of-our-lord",
)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Heading,
    Component,
    Antiphon,
    Psalm,
    Reading,
    Collect,
    Devotion,
    /// A placeholder standing in for something that could not be resolved.
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub label: String,
    /// Citation for psalms and readings.
    pub reference: Option<String>,
    pub text: String,
}

impl Section {
    fn new(kind: SectionKind, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            reference: None,
            text: text.into(),
        }
    }

    fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// A fully resolved office with its calendar metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOffice {
    pub office: Office,
    pub office_name: String,
    pub title: String,
    pub date: NaiveDate,
    pub season: Season,
    pub color: LiturgicalColor,
    pub year: LiturgicalYear,
    pub sections: Vec<Section>,
    pub warnings: Vec<OfficeWarning>,
}

impl RenderedOffice {
    /// "Tuesday in Lent · Year II"
    pub fn calendar_line(&self) -> String {
        format!("{} · {}", self.title, self.year.label())
    }

    pub fn long_date(&self) -> String {
        format_long(self.date)
    }

    pub fn find(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }
}

/// Everything about the day a render needs besides the rubric.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    pub date: NaiveDate,
    pub calendar: &'a Classification,
    pub entry: &'a DayEntry,
}

#[derive(Debug, Clone, Copy)]
pub struct OfficeResolver<'a> {
    components: &'a ComponentLibrary,
    scripture: &'a ScriptureStore,
}

impl<'a> OfficeResolver<'a> {
    pub fn new(components: &'a ComponentLibrary, scripture: &'a ScriptureStore) -> Self {
        Self {
            components,
            scripture,
        }
    }

    /// Walks `rubric` for the day. `cfg` should already be the effective
    /// configuration for its office (see `OfficeConfig::effective`).
    pub async fn render(&self, day: DayContext<'_>, rubric: &Rubric, cfg: &OfficeConfig) -> RenderedOffice {
        let mut walk = Walk {
            components: self.components,
            scripture: self.scripture,
            day,
            cfg,
            sections: Vec::new(),
            warnings: Vec::new(),
        };
        walk.preamble(rubric);
        for token in &rubric.sequence {
            walk.token(token.trim()).await;
        }
        if cfg.marian_position == MarianPosition::After {
            walk.marian();
        }

        RenderedOffice {
            office: cfg.office,
            office_name: if rubric.office_name.is_empty() {
                "Office".to_string()
            } else {
                rubric.office_name.clone()
            },
            title: day.entry.title_or_default().to_string(),
            date: day.date,
            season: day.calendar.season,
            color: day.calendar.liturgical_color,
            year: day.calendar.liturgical_year,
            sections: walk.sections,
            warnings: walk.warnings,
        }
    }
}

struct Walk<'a, 'r> {
    components: &'a ComponentLibrary,
    scripture: &'a ScriptureStore,
    day: DayContext<'r>,
    cfg: &'r OfficeConfig,
    sections: Vec<Section>,
    warnings: Vec<OfficeWarning>,
}

impl Walk<'_, '_> {
    fn warn(&mut self, warning: OfficeWarning) {
        self.warnings.push(warning.logged());
    }

    /// Text of the first of `ids` that exists, in the active rite.
    fn text_of(&mut self, ids: &[&str]) -> Option<String> {
        let rite = self.cfg.rite;
        let components = self.components;
        let Some(component) = components.first_of(ids) else {
            let key = ids.join(" | ");
            self.warn(OfficeWarning::lookup(LookupTarget::Component, key));
            return None;
        };
        match component.text.for_rite(rite) {
            Some(text) => Some(text.to_string()),
            None => {
                let id = component.id.clone();
                self.warn(OfficeWarning::lookup(
                    LookupTarget::Component,
                    format!("{} ({})", id, rite.key()),
                ));
                Some("Text not found".to_string())
            }
        }
    }

    /// Pushes a component section, or a placeholder when it is missing.
    fn component(&mut self, kind: SectionKind, label: &str, ids: &[&str]) {
        match self.text_of(ids) {
            Some(text) => self.sections.push(Section::new(kind, label, text)),
            None => self
                .sections
                .push(Section::new(SectionKind::Notice, label, format!("{} not found", label))),
        }
    }

    fn preamble(&mut self, rubric: &Rubric) {
        let cfg = self.cfg;
        if cfg.devotions.agpeya_opening {
            self.component(SectionKind::Devotion, "Agpeya Opening", &["agpeya-opening"]);
        }
        if cfg.devotions.east_syriac_hours {
            self.component(
                SectionKind::Devotion,
                "Prayer of the Hours",
                &["east-syriac-prayer-of-hours"],
            );
        }
        if cfg.marian_position == MarianPosition::Before {
            self.marian();
        }
        // A rubric that places the antiphon itself gets it only there.
        if !rubric.contains("VARIABLE_ANTIPHON") {
            self.antiphon();
        }
    }

    fn marian(&mut self) {
        let season = self.day.calendar.season.as_ref().to_string();
        if self.cfg.marian_element.wants_antiphon() {
            let seasonal = format!("bcp-marian-antiphon-{}", season);
            self.component(
                SectionKind::Devotion,
                "Marian Antiphon",
                &[&seasonal, "bcp-marian-antiphon-ordinary"],
            );
        }
        if self.cfg.marian_element.wants_theotokion() {
            let seasonal = format!("coptic-theotokion-{}", season);
            self.component(
                SectionKind::Devotion,
                "Theotokion",
                &[&seasonal, "coptic-theotokion"],
            );
        }
    }

    fn antiphon(&mut self) {
        let part = day_part(self.cfg.office);
        if let Some(text) = self.day.entry.antiphon(part) {
            self.sections
                .push(Section::new(SectionKind::Antiphon, "Antiphon", text));
        }
    }

    async fn token(&mut self, token: &str) {
        let office = self.cfg.office;
        match token {
            "VARIABLE_OPENING" => {
                let seasonal = format!("bcp-opening-{}", self.day.calendar.season.as_ref());
                self.component(
                    SectionKind::Component,
                    "Opening Sentence",
                    &[&seasonal, "bcp-opening-general"],
                );
            }
            "VARIABLE_ANTIPHON" => self.antiphon(),
            INVITATORY_TOKEN => self.invitatory().await,
            "VARIABLE_PSALM" => self.psalms().await,
            "VARIABLE_COLLECT" => self.collect(),
            _ => {
                if let Some(kind) = ReadingKind::from_token(token) {
                    self.reading(kind).await;
                } else if let Some((id, label)) = slots::fixed_variable(token, office) {
                    self.component(SectionKind::Component, label, &[id]);
                } else {
                    self.literal(token);
                }
            }
        }
    }

    fn literal(&mut self, token: &str) {
        let (id, label) = match slots::resolve(token, self.cfg) {
            Slot::Omit => return,
            Slot::Component { id, label } => (id, label),
        };

        let rite = self.cfg.rite;
        let components = self.components;
        match components.get(&id) {
            Some(component) => {
                let label = label
                    .map(str::to_string)
                    .or_else(|| component.title.clone().filter(|t| !t.is_empty()))
                    .unwrap_or_else(|| id.clone());
                let text = match component.text.for_rite(rite) {
                    Some(t) => t.to_string(),
                    None => {
                        self.warn(OfficeWarning::lookup(
                            LookupTarget::Component,
                            format!("{} ({})", id, rite.key()),
                        ));
                        "Text not found".to_string()
                    }
                };
                self.sections
                    .push(Section::new(SectionKind::Component, label, text));
            }
            None => {
                self.warn(OfficeWarning::lookup(LookupTarget::Component, id.clone()));
                self.sections.push(Section::new(
                    SectionKind::Notice,
                    format!("Component not found: {}", id),
                    "",
                ));
            }
        }

        if token == ABSOLUTION_SLOT && self.cfg.devotions.trisagion {
            self.component(SectionKind::Devotion, "Trisagion", &["trisagion-byzantine"]);
        }
    }

    async fn invitatory(&mut self) {
        let office = self.cfg.office;
        if self.cfg.devotions.angelus && office != Office::Compline {
            self.component(SectionKind::Devotion, "The Angelus", &["angelus"]);
        }
        self.component(SectionKind::Component, "The Invitatory", &[invitatory_id(office)]);

        let Some(choice) = InvitatoryPsalm::choose(office, self.day.calendar.season, self.day.date)
        else {
            return;
        };
        match choice.component_id() {
            Some(id) => self.component(SectionKind::Component, choice.label(), &[id]),
            None => {
                let out = self.scripture.resolve_detailed("Psalm 95").await;
                self.warnings.extend(out.warnings);
                let lines = psalm_as_verses(&out.text);
                let text = if lines.is_empty() {
                    "[Psalm 95 unavailable]".to_string()
                } else {
                    lines.join("\n")
                };
                self.sections.push(
                    Section::new(SectionKind::Psalm, choice.label(), text).with_reference("Psalm 95"),
                );
            }
        }
    }

    fn appointed_psalms(&self) -> Option<String> {
        let part = day_part(self.cfg.office);
        if self.cfg.psalter_30_day {
            return psalter::psalms_for_date(self.day.date, part).map(str::to_string);
        }
        self.day.entry.psalms(part).map(str::to_string)
    }

    async fn psalms(&mut self) {
        let Some(psalms) = self.appointed_psalms() else {
            return;
        };
        let refs: Vec<String> = psalms
            .split(',')
            .map(|p| strip_psalm_prefix(p.trim()).to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if refs.is_empty() {
            return;
        }

        let heading = if refs.len() > 1 { "The Psalms" } else { "The Psalm" };
        self.sections.push(Section::new(SectionKind::Heading, heading, ""));

        for number in refs {
            let citation = format!("Psalm {}", number);
            let out = self.scripture.resolve_detailed(&citation).await;
            self.warnings.extend(out.warnings);
            let lines = psalm_as_verses(&out.text);
            let text = if lines.is_empty() {
                "No psalm text found".to_string()
            } else {
                lines.join("\n")
            };
            let label = format!("Psalm {}", psalm_number(&number));
            self.sections
                .push(Section::new(SectionKind::Psalm, label, text).with_reference(citation));

            if self.cfg.devotions.gloria_patri {
                let gloria = self
                    .text_of(&["bcp-gloria-patri"])
                    .unwrap_or_else(|| "(Gloria Patri not found)".to_string());
                self.sections
                    .push(Section::new(SectionKind::Devotion, "Gloria Patri", gloria));
            }
        }
    }

    async fn reading(&mut self, kind: ReadingKind) {
        if kind == ReadingKind::OldTestament && self.cfg.devotions.prayer_before_reading {
            self.component(
                SectionKind::Devotion,
                "Prayer Before Reading",
                &["orthodox-prayer-before-reading"],
            );
        }

        let cfg = self.cfg;
        let citation = appointed(
            self.day.entry,
            kind,
            cfg.office,
            self.day.calendar.liturgical_year,
            cfg.gospel_placement,
        )
        .map(str::to_string);
        let Some(citation) = citation else {
            return;
        };

        let out = self.scripture.resolve_detailed(&citation).await;
        self.warnings.extend(out.warnings);
        let paragraphs = scripture_as_prose(&out.text);
        let text = if paragraphs.is_empty() {
            "No reading appointed".to_string()
        } else {
            paragraphs.join("\n\n")
        };
        self.sections
            .push(Section::new(SectionKind::Reading, kind.label(), text).with_reference(citation));
    }

    fn collect(&mut self) {
        let requested = self
            .day
            .entry
            .collect
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLLECT);
        let id = COLLECT_ALIASES
            .iter()
            .find(|(from, _)| *from == requested)
            .map(|(_, to)| *to)
            .unwrap_or(requested)
            .to_string();

        let components = self.components;
        let text = match components.get(&id) {
            Some(c) => match c.text.for_rite(self.cfg.rite) {
                Some(t) => t.to_string(),
                None => {
                    let key = format!("{} ({})", id, self.cfg.rite.key());
                    self.warn(OfficeWarning::lookup(LookupTarget::Component, key));
                    "Collect text not found".to_string()
                }
            },
            None => {
                self.warn(OfficeWarning::lookup(LookupTarget::Component, id.clone()));
                "No collect appointed".to_string()
            }
        };
        self.sections
            .push(Section::new(SectionKind::Collect, "The Collect", text));

        let office = self.cfg.office;
        if office == Office::Compline && self.cfg.devotions.examen {
            self.component(SectionKind::Devotion, "The Examen", &["ignatian-examen"]);
        }
        if office.is_major() && self.cfg.devotions.kyrie_pantocrator {
            self.component(
                SectionKind::Devotion,
                "Kyrie Pantocrator",
                &["eastern-kyrie-pantocrator"],
            );
        }
    }
}

/// "Psalm 24" and "psalm 24" → "24".
fn strip_psalm_prefix(s: &str) -> &str {
    match s.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("psalm ") => s[6..].trim(),
        _ => s,
    }
}

/// "119:1-32" → "119".
fn psalm_number(reference: &str) -> &str {
    reference
        .split(':')
        .next()
        .unwrap_or(reference)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psalm_reference_helpers() {
        assert_eq!(strip_psalm_prefix("Psalm 24"), "24");
        assert_eq!(strip_psalm_prefix("psalm 119:1-32"), "119:1-32");
        assert_eq!(strip_psalm_prefix("8"), "8");
        assert_eq!(psalm_number("119:1-32"), "119");
        assert_eq!(psalm_number("23"), "23");
    }
}
