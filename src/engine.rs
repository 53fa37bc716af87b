// File: ./src/engine.rs
//! Entry point tying calendar, lectionary, components, rubrics and scripture
//! together. Front ends hold one `OfficeEngine` and ask it for offices.
use crate::calendar::{Classification, SeasonCalendar};
use crate::config::{Config, OfficeConfig};
use crate::lectionary::Lectionary;
use crate::model::{Component, ComponentLibrary, Rubric, find_rubric};
use crate::office::{DayContext, OfficeResolver, RenderedOffice};
use crate::saints::{Commemorations, SaintsCalendar};
use crate::scripture::ScriptureStore;
use crate::source::{SharedSource, fetch_json};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Identifies one render request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// Latest-wins gate: only the result of the most recently issued ticket may
/// be published, so a slow earlier render cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct RenderGate {
    latest: AtomicU64,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RenderTicket {
        RenderTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: RenderTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hands `value` back only if `ticket` is still the latest.
    pub fn publish<T>(&self, ticket: RenderTicket, value: T) -> Option<T> {
        self.is_latest(ticket).then_some(value)
    }
}

pub struct OfficeEngine {
    calendar: SeasonCalendar,
    components: ComponentLibrary,
    rubrics: Vec<Rubric>,
    lectionary: Lectionary,
    scripture: ScriptureStore,
    saints: SaintsCalendar,
    gate: RenderGate,
    displayed: Mutex<Option<Arc<RenderedOffice>>>,
}

impl std::fmt::Debug for OfficeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfficeEngine")
            .field("components", &self.components.len())
            .field("rubrics", &self.rubrics.len())
            .field("season_ranges", &self.calendar.ranges().len())
            .finish()
    }
}

impl OfficeEngine {
    /// Loads the component library, rubrics and season table.
    ///
    /// These are the only loads that fail the engine; everything fetched
    /// later (season content, scripture, saints) degrades with warnings.
    pub async fn load(source: SharedSource, config: &Config) -> Result<Self> {
        let mut components = ComponentLibrary::new();
        for file in &config.component_files {
            let shard: Vec<Component> = fetch_json(source.as_ref(), file)
                .await
                .with_context(|| format!("Failed to load component library {}", file))?;
            log::info!("Loaded {} components from {}", shard.len(), file);
            components.extend(shard);
        }

        let rubrics: Vec<Rubric> = fetch_json(source.as_ref(), &config.rubrics_file)
            .await
            .with_context(|| format!("Failed to load rubrics {}", config.rubrics_file))?;
        log::info!("Loaded {} rubrics", rubrics.len());

        let calendar = SeasonCalendar::load(source.as_ref(), config).await?;

        Ok(Self::from_parts(calendar, components, rubrics, source, config))
    }

    /// Builds an engine from already loaded parts.
    pub fn from_parts(
        calendar: SeasonCalendar,
        components: ComponentLibrary,
        rubrics: Vec<Rubric>,
        source: SharedSource,
        config: &Config,
    ) -> Self {
        Self {
            calendar,
            components,
            rubrics,
            lectionary: Lectionary::new(source.clone()),
            scripture: ScriptureStore::new(
                source.clone(),
                config.book_cache_capacity,
                config.translation.clone(),
            ),
            saints: SaintsCalendar::new(source),
            gate: RenderGate::new(),
            displayed: Mutex::new(None),
        }
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    pub fn components(&self) -> &ComponentLibrary {
        &self.components
    }

    pub fn rubrics(&self) -> &[Rubric] {
        &self.rubrics
    }

    pub fn scripture(&self) -> &ScriptureStore {
        &self.scripture
    }

    pub fn lectionary(&self) -> &Lectionary {
        &self.lectionary
    }

    pub fn classify(&self, date: NaiveDate) -> Classification {
        self.calendar.classify(date)
    }

    /// Renders one office. Fails only when the office has no rubric.
    pub async fn render(&self, date: NaiveDate, cfg: &OfficeConfig) -> Result<RenderedOffice> {
        let (cfg, mut warnings) = cfg.effective();
        for w in &warnings {
            log::warn!("{}", w);
        }

        let rubric_id = cfg.office.rubric_id();
        let rubric = find_rubric(&self.rubrics, rubric_id)
            .ok_or_else(|| anyhow::anyhow!("No rubric '{}' for {}", rubric_id, cfg.office))?;

        let classification = self.calendar.classify(date);
        warnings.extend(classification.warning.clone());

        let lookup = self
            .lectionary
            .find(&self.calendar, &classification.content_file, date)
            .await;
        warnings.extend(lookup.warnings.iter().cloned());

        let day = DayContext {
            date,
            calendar: &classification,
            entry: &lookup.entry,
        };
        let mut office = OfficeResolver::new(&self.components, &self.scripture)
            .render(day, rubric, &cfg)
            .await;

        warnings.append(&mut office.warnings);
        office.warnings = warnings;
        log::debug!(
            "Rendered {} for {}: {} sections, {} warnings",
            office.office_name,
            date,
            office.sections.len(),
            office.warnings.len()
        );
        Ok(office)
    }

    /// Takes a ticket for a render that is about to start.
    pub fn begin_render(&self) -> RenderTicket {
        self.gate.issue()
    }

    /// Renders and publishes the result if `ticket` is still the latest.
    /// Returns `None` for a superseded render.
    pub async fn render_for(
        &self,
        ticket: RenderTicket,
        date: NaiveDate,
        cfg: &OfficeConfig,
    ) -> Result<Option<Arc<RenderedOffice>>> {
        let office = Arc::new(self.render(date, cfg).await?);

        let mut displayed = self.displayed.lock().await;
        match self.gate.publish(ticket, office) {
            Some(office) => {
                *displayed = Some(office.clone());
                Ok(Some(office))
            }
            None => {
                log::debug!("Discarding superseded render {:?}", ticket);
                Ok(None)
            }
        }
    }

    pub async fn render_latest(
        &self,
        date: NaiveDate,
        cfg: &OfficeConfig,
    ) -> Result<Option<Arc<RenderedOffice>>> {
        let ticket = self.begin_render();
        self.render_for(ticket, date, cfg).await
    }

    /// The last published office.
    pub async fn displayed(&self) -> Option<Arc<RenderedOffice>> {
        self.displayed.lock().await.clone()
    }

    pub async fn commemorations(&self, date: NaiveDate) -> Commemorations {
        self.saints.for_date(date).await
    }

    pub async fn passage(&self, citation: &str) -> crate::scripture::ScriptureText {
        self.scripture.resolve_detailed(citation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_only_latest_publishes() {
        let gate = RenderGate::new();
        let first = gate.issue();
        let second = gate.issue();
        assert!(first < second);
        assert_eq!(gate.publish(first, "stale"), None);
        assert_eq!(gate.publish(second, "fresh"), Some("fresh"));
        let third = gate.issue();
        assert!(!gate.is_latest(second));
        assert!(gate.is_latest(third));
    }
}
