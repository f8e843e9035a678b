//! Tag-conditioned level and quality modifiers

use crate::types::{TagSet, DESCRIPTOR_TAGS};
use serde::{Deserialize, Serialize};

/// `delta` applies to every gem carrying all of `required_tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagModifier {
    #[serde(default)]
    pub required_tags: TagSet,
    pub delta: i64,
}

impl TagModifier {
    pub fn new<I, S>(required_tags: I, delta: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TagModifier {
            required_tags: crate::types::tag_set(required_tags),
            delta,
        }
    }

    /// Modifier with no requirements
    pub fn global(delta: i64) -> Self {
        TagModifier {
            required_tags: TagSet::new(),
            delta,
        }
    }

    pub fn applies_to(&self, tags: &TagSet) -> bool {
        self.required_tags.is_subset(tags)
    }
}

/// Sum of the deltas of every modifier applying to `tags`
pub fn total_delta(modifiers: &[TagModifier], tags: &TagSet) -> i64 {
    modifiers
        .iter()
        .filter(|m| m.applies_to(tags))
        .map(|m| m.delta)
        .sum()
}

/// Turn a gem descriptor ("Lightning Spell", "Non-Vaal", "") into modifiers
///
/// An absent or empty descriptor means every gem, expressed as one rule per
/// gem category. `Non-X` raises every gem and then takes the delta back off
/// gems tagged `x`.
pub fn parse_gem_descriptor(descriptor: Option<&str>, value: i64) -> Vec<TagModifier> {
    let descriptor = descriptor.map(|d| d.trim().to_lowercase()).unwrap_or_default();
    if descriptor.is_empty() {
        return every_gem(value);
    }

    if let Some(excluded) = descriptor.strip_prefix("non-") {
        let mut modifiers = every_gem(value);
        if let Some(tag) = excluded.split_whitespace().next() {
            modifiers.push(TagModifier::new([tag], -value));
        }
        return modifiers;
    }

    let mut required = TagSet::new();
    if descriptor.contains("skill") {
        required.insert("active_skill".to_string());
    }
    if descriptor.contains("aoe") {
        required.insert("area".to_string());
    }
    required.extend(
        descriptor
            .split_whitespace()
            .filter(|word| DESCRIPTOR_TAGS.contains(word))
            .map(str::to_string),
    );

    vec![TagModifier {
        required_tags: required,
        delta: value,
    }]
}

fn every_gem(value: i64) -> Vec<TagModifier> {
    vec![
        TagModifier::new(["active_skill"], value),
        TagModifier::new(["support"], value),
    ]
}
