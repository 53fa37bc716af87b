// File: ./src/prayers.rs
//! Book of Needs: stand-alone prayers looked up by id.
//!
//! The whole collection lives in one file keyed by prayer id. It is fetched
//! on first use and kept for the session; a failed fetch is retried next time.
use crate::source::{SharedSource, fetch_json};
use crate::warning::{LookupTarget, OfficeWarning};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const PRAYER_NOT_FOUND: &str = "Prayer text not found.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prayer {
    pub title: String,
    /// Where the prayer comes from, e.g. "Book of Common Prayer, p. 829".
    #[serde(default)]
    pub source: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerText {
    pub prayer: Prayer,
    pub warnings: Vec<OfficeWarning>,
}

type Collection = Arc<BTreeMap<String, Prayer>>;

#[derive(Debug)]
pub struct PrayerBook {
    source: SharedSource,
    file: String,
    loaded: Mutex<Option<Collection>>,
}

impl PrayerBook {
    pub fn new(source: SharedSource, file: impl Into<String>) -> Self {
        Self {
            source,
            file: file.into(),
            loaded: Mutex::new(None),
        }
    }

    async fn collection(&self) -> Result<Collection> {
        if let Some(prayers) = self.loaded.lock().await.as_ref() {
            return Ok(prayers.clone());
        }

        let prayers: BTreeMap<String, Prayer> = fetch_json(self.source.as_ref(), &self.file)
            .await
            .with_context(|| format!("Could not load prayer data from {}", self.file))?;
        log::info!("Loaded {} prayers from {}", prayers.len(), self.file);

        let prayers = Arc::new(prayers);
        let mut slot = self.loaded.lock().await;
        Ok(slot.get_or_insert(prayers).clone())
    }

    /// Prayer ids in the collection, sorted.
    pub async fn ids(&self) -> Result<Vec<String>> {
        Ok(self.collection().await?.keys().cloned().collect())
    }

    /// Looks up one prayer. An unknown id yields a placeholder titled with
    /// the id itself; only a collection that cannot be loaded is an error.
    pub async fn get(&self, id: &str) -> Result<PrayerText> {
        let prayers = self.collection().await?;
        let id = id.trim();
        match prayers.get(id) {
            Some(prayer) => Ok(PrayerText {
                prayer: prayer.clone(),
                warnings: Vec::new(),
            }),
            None => Ok(PrayerText {
                prayer: Prayer {
                    title: id.to_string(),
                    source: None,
                    text: PRAYER_NOT_FOUND.to_string(),
                },
                warnings: vec![OfficeWarning::lookup(LookupTarget::Prayer, id).logged()],
            }),
        }
    }
}
