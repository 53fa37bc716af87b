// File: ./src/saints.rs
//! Commemorations of the day, from per-month saints files.
use crate::calendar::format_month_day;
use crate::model::Saint;
use crate::source::{SharedSource, fetch_json};
use crate::warning::OfficeWarning;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn month_file(date: NaiveDate) -> String {
    format!(
        "saints/saints-{}.json",
        date.format("%B").to_string().to_lowercase()
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commemorations {
    pub saints: Vec<Saint>,
    pub warnings: Vec<OfficeWarning>,
}

/// Holds one month of saints at a time; changing month reloads.
#[derive(Debug)]
pub struct SaintsCalendar {
    source: SharedSource,
    month: Mutex<Option<(String, Arc<Vec<Saint>>)>>,
}

impl SaintsCalendar {
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            month: Mutex::new(None),
        }
    }

    pub async fn for_date(&self, date: NaiveDate) -> Commemorations {
        let file = month_file(date);
        let cached = match &*self.month.lock().await {
            Some((name, saints)) if *name == file => Some(saints.clone()),
            _ => None,
        };

        let saints = match cached {
            Some(saints) => saints,
            None => match fetch_json::<Vec<Saint>>(self.source.as_ref(), &file).await {
                Ok(list) => {
                    log::info!("Loaded {} commemorations from {}", list.len(), file);
                    let list = Arc::new(list);
                    *self.month.lock().await = Some((file.clone(), list.clone()));
                    list
                }
                Err(e) => {
                    return Commemorations {
                        saints: Vec::new(),
                        warnings: vec![OfficeWarning::fetch(file, &e).logged()],
                    };
                }
            },
        };

        let key = format_month_day(date);
        Commemorations {
            saints: saints.iter().filter(|s| s.falls_on(&key)).cloned().collect(),
            warnings: Vec::new(),
        }
    }
}
