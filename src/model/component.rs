// File: ./src/model/component.rs
// Reusable liturgical texts and their rite-variant lookup.
use crate::config::Rite;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Rite keys consulted after the active rite, in order.
const RITE_FALLBACK_ORDER: [&str; 2] = ["rite2", "rite1"];

/// Text of a component: one string, or one string per rite variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentText {
    Plain(String),
    ByRite(BTreeMap<String, String>),
}

impl ComponentText {
    /// Text for `rite`, falling back through rite2 then rite1.
    pub fn for_rite(&self, rite: Rite) -> Option<&str> {
        match self {
            ComponentText::Plain(s) if !s.is_empty() => Some(s.as_str()),
            ComponentText::Plain(_) => None,
            ComponentText::ByRite(map) => std::iter::once(rite.key())
                .chain(RITE_FALLBACK_ORDER)
                .find_map(|k| map.get(k).filter(|s| !s.is_empty()))
                .map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub text: ComponentText,
}

/// All component shards merged into one collection. The first record with
/// a given id wins.
#[derive(Debug, Clone, Default)]
pub struct ComponentLibrary {
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

impl ComponentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<Component>) -> Self {
        let mut lib = Self::new();
        lib.extend(components);
        lib
    }

    /// Append one shard.
    pub fn extend(&mut self, shard: Vec<Component>) {
        for component in shard {
            let idx = self.components.len();
            self.index.entry(component.id.clone()).or_insert(idx);
            self.components.push(component);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.index.get(id).map(|&i| &self.components[i])
    }

    /// First of `ids` that exists.
    pub fn first_of(&self, ids: &[&str]) -> Option<&Component> {
        ids.iter().find_map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_rite(pairs: &[(&str, &str)]) -> ComponentText {
        ComponentText::ByRite(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_rite_fallback_order() {
        let both = by_rite(&[("rite1", "thee"), ("rite2", "you")]);
        assert_eq!(both.for_rite(Rite::Rite1), Some("thee"));
        assert_eq!(both.for_rite(Rite::Rite2), Some("you"));

        let only_one = by_rite(&[("rite1", "thee")]);
        assert_eq!(only_one.for_rite(Rite::Rite2), Some("thee"));

        let none = by_rite(&[("coptic", "x")]);
        assert_eq!(none.for_rite(Rite::Rite2), None);

        let plain = ComponentText::Plain("same".into());
        assert_eq!(plain.for_rite(Rite::Rite1), Some("same"));
    }

    #[test]
    fn test_shards_keep_first_definition() {
        let shard: Vec<Component> = serde_json::from_str(
            r#"[{"id":"bcp-kyrie","title":"Kyrie","text":"Lord, have mercy."},
                {"id":"bcp-venite","text":{"rite2":"Come, let us sing"}}]"#,
        )
        .unwrap();
        let mut lib = ComponentLibrary::from_components(shard);
        lib.extend(vec![Component {
            id: "bcp-kyrie".into(),
            title: None,
            text: ComponentText::Plain("shadowed".into()),
        }]);
        assert_eq!(lib.len(), 2);
        let kyrie = lib.get("bcp-kyrie").unwrap();
        assert_eq!(kyrie.text.for_rite(Rite::Rite2), Some("Lord, have mercy."));
        assert!(lib.first_of(&["missing", "bcp-venite"]).is_some());
    }
}
