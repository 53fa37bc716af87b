// File: ./src/model/saint.rs
use serde::{Deserialize, Serialize};

fn default_unknown() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saint {
    /// "March 1", sometimes with extra text ("March 1 (transferred)").
    #[serde(default)]
    pub day: String,
    #[serde(default = "default_unknown")]
    pub tradition: String,
    #[serde(default = "default_unknown")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Saint {
    /// True when `day` names `month_day` ("March 1"), without letting
    /// "March 1" match "March 10".
    pub fn falls_on(&self, month_day: &str) -> bool {
        let day = self.day.trim().to_lowercase();
        let key = month_day.to_lowercase();
        let Some(pos) = day.find(&key) else {
            return false;
        };
        !day[pos + key.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    }
}
