//! Gem instances: one concrete gem found on an item

mod modifier;

pub use modifier::{parse_gem_descriptor, total_delta, TagModifier};

use crate::config::{GemDefinition, ReferenceData};
use crate::error::EngineError;
use crate::types::{GemCategory, QualityVariant, RawStat, SocketIndex, TagSet};
use serde::{Deserialize, Serialize};

/// A gem socketed in (or granted by) an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemInstance {
    /// Reference data key
    pub name: String,
    /// Name as shown on the item, may carry a quality variant
    pub display_name: String,
    /// Base definition for hybrid gems (the "Grace" of "Vaal Grace")
    pub base_name: Option<String>,
    pub category: GemCategory,
    pub level: u32,
    pub quality: u32,
    pub quality_variant: QualityVariant,
    /// `None` for gems granted by the item itself
    pub socket: Option<SocketIndex>,
    pub tags: TagSet,
}

impl GemInstance {
    /// Create an instance of a known gem
    ///
    /// Tags are the definition's tags plus the lowercased gem name.
    pub fn new(
        reference: &ReferenceData,
        name: &str,
        level: u32,
        quality: u32,
        socket: Option<SocketIndex>,
    ) -> Result<Self, EngineError> {
        let definition = reference.gem(name)?;
        let mut tags = definition.base_tags();
        tags.insert(name.to_lowercase());

        Ok(GemInstance {
            name: name.to_string(),
            display_name: name.to_string(),
            base_name: None,
            category: definition.category(),
            level: level.max(1),
            quality,
            quality_variant: QualityVariant::Superior,
            socket,
            tags,
        })
    }

    /// Set the item type line, picking up its quality variant
    pub fn with_display_name(mut self, type_line: &str) -> Self {
        self.quality_variant = QualityVariant::from_type_line(type_line);
        self.display_name = type_line.to_string();
        self
    }

    /// Set the base definition of a hybrid gem
    pub fn with_base_name(mut self, base_name: &str) -> Self {
        self.base_name = Some(base_name.to_string());
        self
    }

    pub fn definition<'r>(
        &self,
        reference: &'r ReferenceData,
    ) -> Result<&'r GemDefinition, EngineError> {
        reference.gem(&self.name)
    }

    /// Definition the quality table is read from
    pub fn quality_definition<'r>(
        &self,
        reference: &'r ReferenceData,
    ) -> Result<&'r GemDefinition, EngineError> {
        reference.gem(self.base_name.as_deref().unwrap_or(&self.name))
    }

    pub fn is_socketed(&self) -> bool {
        self.socket.is_some()
    }

    pub fn is_support(&self) -> bool {
        self.category == GemCategory::Support
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Vaal gems with a regular base produce two separate effects
    pub fn has_vaal_form(&self) -> bool {
        self.name.starts_with("Vaal") && self.base_name.is_some()
    }

    /// Apply every level modifier whose tags this gem carries
    ///
    /// Deltas from all sets are summed before the level is clamped.
    pub fn apply_level_modifiers(&mut self, sets: &[&[TagModifier]]) {
        let delta = sets.iter().map(|set| total_delta(set, &self.tags)).sum();
        self.add_levels(delta);
    }

    /// Apply every quality modifier whose tags this gem carries
    pub fn apply_quality_modifiers(&mut self, sets: &[&[TagModifier]]) {
        let delta = sets.iter().map(|set| total_delta(set, &self.tags)).sum();
        self.add_quality(delta);
    }

    /// Shift the level, never going below 1
    pub fn add_levels(&mut self, delta: i64) {
        self.level = clamp_to_u32(i64::from(self.level) + delta, 1);
    }

    /// Shift the quality, never going below 0
    pub fn add_quality(&mut self, delta: i64) {
        self.quality = clamp_to_u32(i64::from(self.quality) + delta, 0);
    }

    /// Level stats followed by the quality stat of this gem's own variant
    pub fn stat_stream(&self, reference: &ReferenceData) -> Result<Vec<RawStat>, EngineError> {
        let definition = self.definition(reference)?;
        let mut stats = definition.stats_at_level(self.level)?;
        stats.extend(definition.quality_stat(self.quality_variant, self.quality));
        Ok(stats)
    }
}

fn clamp_to_u32(value: i64, min: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(u32::MAX)) as u32
}
