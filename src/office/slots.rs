// File: ./src/office/slots.rs
//! Rewrites rubric tokens into concrete component ids.
use crate::config::{Devotions, Office, OfficeConfig};

pub const ABSOLUTION_SLOT: &str = "bcp-absolution-slot";
pub const CREED_SLOT: &str = "bcp-creed-slot";
pub const SUFFRAGES_SLOT: &str = "bcp-suffrages-slot";

// Tokens that only appear when their devotion is switched on.
const OPTIONAL: &[(&str, fn(&Devotions) -> bool)] = &[
    ("bcp-litany", |d| d.litany),
    ("bcp-general-thanksgiving", |d| d.general_thanksgiving),
    ("bcp-chrysostom", |d| d.chrysostom),
];

// Rubric tokens whose component lives under a different id.
const ALIASES: &[(&str, &str)] = &[
    ("bcp-opening-blessing", "bcp-opening-blessing-compline"),
    ("bcp-versicles-before-prayers", "bcp-versicles-before-prayers-compline"),
];

// Headings that override the component's own title.
const LABELS: &[(&str, &str)] = &[
    ("bcp-phos-hilaron", "Phos Hilaron"),
    ("bcp-lords-prayer", "The Lord's Prayer"),
    ("bcp-kyrie", "Kyrie"),
    ("bcp-salutation", "Salutation"),
    ("bcp-litany", "The Great Litany"),
    ("bcp-general-thanksgiving", "General Thanksgiving"),
    ("bcp-chrysostom", "Prayer of St. Chrysostom"),
    ("bcp-closing", "Closing"),
    ("bcp-opening-blessing", "Opening Blessing"),
    ("bcp-versicles-before-prayers", "Versicles"),
    ("bcp-nunc-dimittis", "Nunc Dimittis"),
];

/// A rubric token after slot rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Component {
        id: String,
        label: Option<&'static str>,
    },
    /// Switched off; produces no section.
    Omit,
}

/// Rewrites a literal component token. `[rite]` becomes the rite key, the
/// three named slots pick their component from the selections, optional
/// tokens are dropped when off and aliased tokens are redirected.
pub fn resolve(token: &str, cfg: &OfficeConfig) -> Slot {
    let token = token.trim();
    let label = LABELS.iter().find(|(t, _)| *t == token).map(|(_, l)| *l);

    if let Some((_, enabled)) = OPTIONAL.iter().find(|(t, _)| *t == token)
        && !enabled(&cfg.devotions)
    {
        return Slot::Omit;
    }

    let id = match token {
        ABSOLUTION_SLOT => format!("bcp-absolution-{}-{}", cfg.rite.short(), cfg.minister.as_ref()),
        CREED_SLOT => cfg.creed.trim().to_string(),
        SUFFRAGES_SLOT if cfg.devotions.suffrages => format!("bcp-suffrages-{}", cfg.rite.key()),
        SUFFRAGES_SLOT => return Slot::Omit,
        other => match ALIASES.iter().find(|(t, _)| *t == other) {
            Some((_, target)) => target.to_string(),
            None => other.replace("[rite]", cfg.rite.key()),
        },
    };
    Slot::Component { id, label }
}

/// `VARIABLE_*` tokens that name a fixed component per office.
pub fn fixed_variable(token: &str, office: Office) -> Option<(&'static str, &'static str)> {
    let morning = office.is_morning();
    match token {
        "VARIABLE_CANTICLE1" => Some((if morning { "bcp-te-deum" } else { "bcp-magnificat" }, "Canticle")),
        "VARIABLE_CANTICLE2" => Some((
            if morning { "bcp-benedictus" } else { "bcp-nunc-dimittis" },
            "Canticle",
        )),
        "VARIABLE_WEEKDAY_COLLECT" => Some((
            if morning { "bcp-collect-grace" } else { "bcp-collect-peace" },
            "Weekday Collect",
        )),
        "VARIABLE_MISSION_PRAYER" => Some(("bcp-mission-prayer-1", "Prayer for Mission")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Minister, Rite};

    fn id(slot: Slot) -> String {
        match slot {
            Slot::Component { id, .. } => id,
            Slot::Omit => "<omitted>".to_string(),
        }
    }

    #[test]
    fn test_named_slots() {
        let mut cfg = OfficeConfig::for_office(Office::Morning);
        cfg.rite = Rite::Rite1;
        cfg.minister = Minister::Priest;
        cfg.creed = "bcp-creed-nicene".into();
        assert_eq!(id(resolve(ABSOLUTION_SLOT, &cfg)), "bcp-absolution-r1-priest");
        assert_eq!(id(resolve(CREED_SLOT, &cfg)), "bcp-creed-nicene");
        assert_eq!(resolve(SUFFRAGES_SLOT, &cfg), Slot::Omit);
        cfg.devotions.suffrages = true;
        assert_eq!(id(resolve(SUFFRAGES_SLOT, &cfg)), "bcp-suffrages-rite1");
    }

    #[test]
    fn test_rite_substitution_aliases_and_optional_tokens() {
        let mut cfg = OfficeConfig::for_office(Office::Compline);
        assert_eq!(id(resolve(" bcp-confession-[rite] ", &cfg)), "bcp-confession-rite2");
        assert_eq!(
            resolve("bcp-opening-blessing", &cfg),
            Slot::Component {
                id: "bcp-opening-blessing-compline".into(),
                label: Some("Opening Blessing"),
            }
        );
        assert_eq!(resolve("bcp-litany", &cfg), Slot::Omit);
        cfg.devotions.litany = true;
        assert_eq!(id(resolve("bcp-litany", &cfg)), "bcp-litany");
    }

    #[test]
    fn test_fixed_variables() {
        assert_eq!(fixed_variable("VARIABLE_CANTICLE1", Office::Morning).unwrap().0, "bcp-te-deum");
        assert_eq!(fixed_variable("VARIABLE_CANTICLE2", Office::Evening).unwrap().0, "bcp-nunc-dimittis");
        assert!(fixed_variable("VARIABLE_PSALM", Office::Evening).is_none());
    }
}
