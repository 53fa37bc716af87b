// File: ./src/config.rs
// Handles configuration loading, defaults and the per-office selections.
use crate::context::AppContext;
use crate::warning::OfficeWarning;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use strum::{AsRefStr, EnumIter, EnumString};

pub const DEFAULT_CREED: &str = "bcp-creed-apostles";

fn default_component_files() -> Vec<String> {
    vec!["components.json".to_string()]
}
fn default_rubrics_file() -> String {
    "rubrics.json".to_string()
}
fn default_translation() -> String {
    "NRSV".to_string()
}
fn default_fallback_content_file() -> String {
    "ordinary1.json".to_string()
}
fn default_prayers_file() -> String {
    "prayers.json".to_string()
}
fn default_book_cache_capacity() -> usize {
    20
}
fn default_creed() -> String {
    DEFAULT_CREED.to_string()
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
pub enum Office {
    #[default]
    Morning,
    Evening,
    Noonday,
    Compline,
}

impl Office {
    /// Id of the rubric record for this office.
    pub fn rubric_id(&self) -> &'static str {
        match self {
            Office::Morning => "morning-office",
            Office::Evening => "evening-office",
            Office::Noonday => "noonday-office",
            Office::Compline => "compline-office",
        }
    }

    pub fn is_morning(&self) -> bool {
        matches!(self, Office::Morning)
    }

    /// Morning or Evening Prayer, where most optional devotions apply.
    pub fn is_major(&self) -> bool {
        matches!(self, Office::Morning | Office::Evening)
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Office::Morning => write!(f, "Morning Prayer"),
            Office::Evening => write!(f, "Evening Prayer"),
            Office::Noonday => write!(f, "Noonday Prayer"),
            Office::Compline => write!(f, "Compline"),
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
pub enum Rite {
    Rite1,
    #[default]
    Rite2,
}

impl Rite {
    /// Key used in component text maps.
    pub fn key(&self) -> &'static str {
        match self {
            Rite::Rite1 => "rite1",
            Rite::Rite2 => "rite2",
        }
    }

    /// Short prefix used in absolution ids (`bcp-absolution-r2-lay`).
    pub fn short(&self) -> &'static str {
        match self {
            Rite::Rite1 => "r1",
            Rite::Rite2 => "r2",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Minister {
    #[default]
    Lay,
    Deacon,
    Priest,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GospelPlacement {
    Morning,
    #[default]
    Evening,
    Both,
}

impl GospelPlacement {
    pub fn includes(&self, office: Office) -> bool {
        match self {
            GospelPlacement::Both => true,
            GospelPlacement::Morning => office.is_morning(),
            GospelPlacement::Evening => !office.is_morning(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarianElement {
    #[default]
    None,
    Antiphon,
    Theotokion,
    Both,
}

impl MarianElement {
    pub fn wants_antiphon(&self) -> bool {
        matches!(self, MarianElement::Antiphon | MarianElement::Both)
    }

    pub fn wants_theotokion(&self) -> bool {
        matches!(self, MarianElement::Theotokion | MarianElement::Both)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarianPosition {
    #[default]
    Before,
    After,
}

/// Optional devotions. All default to off.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Devotions {
    pub gloria_patri: bool,
    pub angelus: bool,
    pub trisagion: bool,
    pub east_syriac_hours: bool,
    pub agpeya_opening: bool,
    pub litany: bool,
    pub suffrages: bool,
    pub general_thanksgiving: bool,
    pub chrysostom: bool,
    pub prayer_before_reading: bool,
    pub examen: bool,
    pub kyrie_pantocrator: bool,
}

/// Everything a user selects before an office is rendered.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct OfficeConfig {
    #[serde(default)]
    pub office: Office,
    #[serde(default)]
    pub rite: Rite,
    #[serde(default)]
    pub minister: Minister,
    #[serde(default = "default_creed")]
    pub creed: String,
    #[serde(default)]
    pub gospel_placement: GospelPlacement,
    #[serde(default)]
    pub marian_element: MarianElement,
    #[serde(default)]
    pub marian_position: MarianPosition,
    #[serde(default)]
    pub bcp_only: bool,
    #[serde(default)]
    pub psalter_30_day: bool,
    #[serde(default)]
    pub devotions: Devotions,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            office: Office::default(),
            rite: Rite::default(),
            minister: Minister::default(),
            creed: DEFAULT_CREED.to_string(),
            gospel_placement: GospelPlacement::default(),
            marian_element: MarianElement::default(),
            marian_position: MarianPosition::default(),
            bcp_only: false,
            psalter_30_day: false,
            devotions: Devotions::default(),
        }
    }
}

impl OfficeConfig {
    pub fn for_office(office: Office) -> Self {
        Self {
            office,
            ..Self::default()
        }
    }

    /// The selections that actually apply to this office.
    ///
    /// Toggles the office does not offer are switched off, BCP-only mode
    /// switches off the ecumenical additions, and a blank creed falls back to
    /// the Apostles' Creed.
    pub fn effective(&self) -> (Self, Vec<OfficeWarning>) {
        let mut cfg = self.clone();
        let mut warnings = Vec::new();
        let office = cfg.office;
        let d = &mut cfg.devotions;

        if office == Office::Compline {
            d.angelus = false;
        }
        if !office.is_major() {
            d.trisagion = false;
            d.prayer_before_reading = false;
            d.kyrie_pantocrator = false;
            d.suffrages = false;
            d.litany = false;
            d.general_thanksgiving = false;
            d.chrysostom = false;
        }
        if office != Office::Compline {
            d.examen = false;
        }

        if cfg.bcp_only {
            d.angelus = false;
            d.trisagion = false;
            d.east_syriac_hours = false;
            d.agpeya_opening = false;
            d.prayer_before_reading = false;
            d.examen = false;
            d.kyrie_pantocrator = false;
        }

        if cfg.creed.trim().is_empty() {
            warnings.push(OfficeWarning::ConfigurationAbsence {
                setting: "creed".to_string(),
                fallback: DEFAULT_CREED.to_string(),
            });
            cfg.creed = DEFAULT_CREED.to_string();
        }

        (cfg, warnings)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Root of the content tree. `None` means the context's data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_component_files")]
    pub component_files: Vec<String>,
    #[serde(default = "default_rubrics_file")]
    pub rubrics_file: String,
    /// Season table inside the content tree; the built-in table is used when unset.
    #[serde(default)]
    pub season_table: Option<String>,
    #[serde(default = "default_translation")]
    pub translation: String,
    #[serde(default = "default_fallback_content_file")]
    pub fallback_content_file: String,
    #[serde(default = "default_book_cache_capacity")]
    pub book_cache_capacity: usize,
    /// Book of Needs collection, relative to the content root.
    #[serde(default = "default_prayers_file")]
    pub prayers_file: String,
    #[serde(default)]
    pub office: OfficeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            // Match the serde defaults
            component_files: default_component_files(),
            rubrics_file: default_rubrics_file(),
            season_table: None,
            translation: default_translation(),
            fallback_content_file: default_fallback_content_file(),
            book_cache_capacity: default_book_cache_capacity(),
            prayers_file: default_prayers_file(),
            office: OfficeConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        Self::from_toml(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load, or fall back to defaults when no config file exists.
    /// Syntax and permission errors are still reported.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Walk the error chain and look for an underlying IO NotFound.
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Content root: explicit `data_dir`, else the context's data directory.
    pub fn resolve_data_dir(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => ctx.get_data_dir(),
        }
    }
}
