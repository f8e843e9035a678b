//! Core types shared by the gem engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Lowercase capability tags of a gem (`aura`, `curse`, `vaal`, ...)
///
/// Ordered so that every iteration over tags is deterministic.
pub type TagSet = BTreeSet<String>;

/// Index of a socket within its item
pub type SocketIndex = usize;

/// Build a [`TagSet`] from anything string-like, lowercasing each tag
pub fn tag_set<I, S>(tags: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().to_lowercase())
        .collect()
}

/// Tags that item and passive text can name in a gem descriptor
/// ("+1 to Level of all Lightning Spell Gems").
pub const DESCRIPTOR_TAGS: &[&str] = &[
    "mark", "strength", "duration", "link", "critical", "chaos", "nova", "spell", "trigger",
    "bow", "attack", "slam", "warcry", "guard", "channelling", "travel", "strike", "blessing",
    "low_max_level", "intelligence", "cold", "totem", "projectile", "orb", "stance", "brand",
    "dexterity", "physical", "lightning", "fire", "aura", "melee", "chaining", "herald", "mine",
    "exceptional", "minion", "curse", "hex", "movement", "vaal", "support", "banner", "golem",
    "trap", "blink", "random_element", "arcane",
];

/// Whether a gem is cast on its own or modifies other gems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GemCategory {
    ActiveSkill,
    Support,
}

impl GemCategory {
    /// Tag every gem of this category carries
    pub fn tag(self) -> &'static str {
        match self {
            GemCategory::ActiveSkill => "active_skill",
            GemCategory::Support => "support",
        }
    }
}

/// Alternate quality table a gem uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityVariant {
    #[default]
    Superior,
    Anomalous,
    Divergent,
    Phantasmal,
}

impl QualityVariant {
    /// All variants in quality-table order
    pub fn all() -> &'static [QualityVariant] {
        &[
            QualityVariant::Superior,
            QualityVariant::Anomalous,
            QualityVariant::Divergent,
            QualityVariant::Phantasmal,
        ]
    }

    /// Row of the definition's quality table this variant reads
    pub fn ordinal(self) -> usize {
        match self {
            QualityVariant::Superior => 0,
            QualityVariant::Anomalous => 1,
            QualityVariant::Divergent => 2,
            QualityVariant::Phantasmal => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityVariant::Superior => "Superior",
            QualityVariant::Anomalous => "Anomalous",
            QualityVariant::Divergent => "Divergent",
            QualityVariant::Phantasmal => "Phantasmal",
        }
    }

    /// Pick the variant named in a gem's type line, defaulting to Superior
    pub fn from_type_line(type_line: &str) -> Self {
        QualityVariant::all()
            .iter()
            .copied()
            .skip(1)
            .find(|variant| type_line.contains(variant.name()))
            .unwrap_or_default()
    }
}

impl fmt::Display for QualityVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Report section a skill's effects are rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputCategory {
    Aura,
    Curse,
    Mine,
    Link,
}

impl OutputCategory {
    /// All categories in report order
    pub fn all() -> &'static [OutputCategory] {
        &[
            OutputCategory::Aura,
            OutputCategory::Curse,
            OutputCategory::Mine,
            OutputCategory::Link,
        ]
    }

    /// Tag that selects skills for this category
    pub fn tag(self) -> &'static str {
        match self {
            OutputCategory::Aura => "aura",
            OutputCategory::Curse => "curse",
            OutputCategory::Mine => "remotemined",
            OutputCategory::Link => "link",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputCategory::Aura => "aura",
            OutputCategory::Curse => "curse",
            OutputCategory::Mine => "mine",
            OutputCategory::Link => "link",
        }
    }
}

impl fmt::Display for OutputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputCategory::all()
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{}' (expected aura, curse, mine or link)", s))
    }
}

/// One raw stat value before translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStat {
    pub id: String,
    pub value: i64,
}

impl RawStat {
    pub fn new(id: impl Into<String>, value: i64) -> Self {
        RawStat {
            id: id.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_type_line() {
        assert_eq!(
            QualityVariant::from_type_line("Anomalous Determination"),
            QualityVariant::Anomalous
        );
        assert_eq!(
            QualityVariant::from_type_line("Phantasmal Grace"),
            QualityVariant::Phantasmal
        );
        assert_eq!(
            QualityVariant::from_type_line("Determination"),
            QualityVariant::Superior
        );
    }

    #[test]
    fn test_variant_ordinals_follow_table_order() {
        let ordinals: Vec<usize> = QualityVariant::all().iter().map(|v| v.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tag_set_lowercases() {
        let tags = tag_set(["Aura", "SPELL", "area"]);
        assert!(tags.contains("aura"));
        assert!(tags.contains("spell"));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Curse".parse::<OutputCategory>(), Ok(OutputCategory::Curse));
        assert_eq!(OutputCategory::Mine.tag(), "remotemined");
        assert!("totem".parse::<OutputCategory>().is_err());
    }
}
