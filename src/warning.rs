// File: ./src/warning.rs
//! Non-fatal diagnostics raised while resolving an office.
//!
//! None of these stop a render. Each one is logged where it is raised and
//! also returned to the caller alongside the rendered sections.
use chrono::NaiveDate;
use std::fmt;

/// What a `LookupMiss` was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    DayEntry,
    Component,
    Rubric,
    Scripture,
    Prayer,
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::DayEntry => write!(f, "day entry"),
            LookupTarget::Component => write!(f, "component"),
            LookupTarget::Rubric => write!(f, "rubric"),
            LookupTarget::Scripture => write!(f, "scripture"),
            LookupTarget::Prayer => write!(f, "prayer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficeWarning {
    /// No season range covers the date.
    ClassificationMiss { date: NaiveDate, fallback_file: String },
    /// A day entry, component or passage could not be found.
    LookupMiss { target: LookupTarget, key: String },
    /// A data file could not be fetched or parsed.
    FetchFailure { resource: String, message: String },
    /// A selection had no value and a default was used.
    ConfigurationAbsence { setting: String, fallback: String },
}

impl OfficeWarning {
    pub fn lookup(target: LookupTarget, key: impl Into<String>) -> Self {
        OfficeWarning::LookupMiss {
            target,
            key: key.into(),
        }
    }

    pub fn fetch(resource: impl Into<String>, err: &anyhow::Error) -> Self {
        OfficeWarning::FetchFailure {
            resource: resource.into(),
            message: format!("{:#}", err),
        }
    }

    /// Log through the `log` facade and hand the warning back.
    pub fn logged(self) -> Self {
        log::warn!("{}", self);
        self
    }
}

impl fmt::Display for OfficeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfficeWarning::ClassificationMiss {
                date,
                fallback_file,
            } => write!(
                f,
                "No season range covers {}; defaulting to {}",
                date, fallback_file
            ),
            OfficeWarning::LookupMiss { target, key } => {
                write!(f, "No {} found for '{}'", target, key)
            }
            OfficeWarning::FetchFailure { resource, message } => {
                write!(f, "Failed to load {}: {}", resource, message)
            }
            OfficeWarning::ConfigurationAbsence { setting, fallback } => {
                write!(f, "No {} selected; using {}", setting, fallback)
            }
        }
    }
}
