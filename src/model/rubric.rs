// File: ./src/model/rubric.rs
use serde::{Deserialize, Serialize};

/// Ordered component sequence for one office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    pub id: String,
    #[serde(rename = "officeName", alias = "office_name")]
    pub office_name: String,
    #[serde(default)]
    pub sequence: Vec<String>,
}

impl Rubric {
    pub fn contains(&self, token: &str) -> bool {
        self.sequence.iter().any(|t| t.trim() == token)
    }
}

pub fn find_rubric<'a>(rubrics: &'a [Rubric], id: &str) -> Option<&'a Rubric> {
    rubrics.iter().find(|r| r.id == id)
}
