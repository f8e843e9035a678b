//! Static gem definitions

use crate::error::EngineError;
use crate::types::{tag_set, GemCategory, QualityVariant, RawStat, TagSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Everything the reference data knows about one gem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GemDefinition {
    /// Display name, filled from the map key when loading
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub active_skill: Option<ActiveSkillData>,
    #[serde(default)]
    pub support_gem: Option<SupportData>,
    /// Fixed stat order; a `null` value is read from the per-level table
    #[serde(default)]
    pub stats: Vec<StaticStat>,
    /// One row per quality variant, in [`QualityVariant::ordinal`] order
    #[serde(default)]
    pub quality_stats: Vec<QualityStat>,
    /// Level -> values aligned with `stats`
    #[serde(default)]
    pub per_level: BTreeMap<u32, Vec<Option<i64>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveSkillData {
    #[serde(default)]
    pub types: Vec<String>,
}

/// Which skills a support gem may modify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportData {
    #[serde(default)]
    pub allowed_types: Vec<String>,
    #[serde(default)]
    pub excluded_types: Vec<String>,
    #[serde(default)]
    pub added_types: Vec<String>,
    #[serde(default)]
    pub supports_gems_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticStat {
    pub id: String,
    #[serde(default)]
    pub value: Option<i64>,
}

/// Quality bonus: `value` per 1000% quality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityStat {
    pub id: String,
    pub value: i64,
}

impl GemDefinition {
    pub fn category(&self) -> GemCategory {
        if self.support_gem.is_some() {
            GemCategory::Support
        } else {
            GemCategory::ActiveSkill
        }
    }

    pub fn is_support(&self) -> bool {
        self.category() == GemCategory::Support
    }

    /// Definition tags, active skill types and the category tag, lowercased
    pub fn base_tags(&self) -> TagSet {
        let mut tags = tag_set(&self.tags);
        if let Some(active) = &self.active_skill {
            tags.extend(tag_set(&active.types));
        }
        tags.insert(self.category().tag().to_string());
        tags
    }

    /// Stat values at `level`, static values taking priority over the table
    ///
    /// Stats with neither a static nor a per-level value are skipped.
    pub fn stats_at_level(&self, level: u32) -> Result<Vec<RawStat>, EngineError> {
        let row = self
            .per_level
            .get(&level)
            .ok_or_else(|| EngineError::MissingLevelData {
                gem: self.name.clone(),
                level,
            })?;

        Ok(self
            .stats
            .iter()
            .enumerate()
            .filter_map(|(i, stat)| {
                let value = stat.value.or_else(|| row.get(i).copied().flatten())?;
                Some(RawStat::new(stat.id.clone(), value))
            })
            .collect())
    }

    /// The quality stat for `variant` at `quality`, if the gem has that row
    pub fn quality_stat(&self, variant: QualityVariant, quality: u32) -> Option<RawStat> {
        let row = self.quality_stats.get(variant.ordinal())?;
        // truncates toward zero
        let value = row.value * i64::from(quality) / 1000;
        Some(RawStat::new(row.id.clone(), value))
    }
}

/// All gem definitions keyed by display name
#[derive(Debug, Clone, Default)]
pub struct GemLibrary {
    gems: HashMap<String, GemDefinition>,
}

impl GemLibrary {
    pub fn new(mut gems: HashMap<String, GemDefinition>) -> Self {
        for (name, gem) in gems.iter_mut() {
            gem.name = name.clone();
        }
        GemLibrary { gems }
    }

    pub fn get(&self, name: &str) -> Result<&GemDefinition, EngineError> {
        self.gems
            .get(name)
            .ok_or_else(|| EngineError::UnknownGem(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.gems.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.gems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GemDefinition> {
        self.gems.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GemDefinition {
        serde_json::from_str(
            r#"{
                "tags": ["Aura", "Spell"],
                "active_skill": { "types": ["Buff"] },
                "stats": [
                    { "id": "armour_+%_final", "value": null },
                    { "id": "base_deal_no_damage", "value": 1 },
                    { "id": "unfilled" }
                ],
                "quality_stats": [
                    { "id": "armour_+%", "value": 500 },
                    { "id": "aura_effect_+%", "value": 250 }
                ],
                "per_level": { "20": [32, null, null], "21": [33, null, null] }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_negative_quality_row_truncates() {
        let mut gem = sample();
        gem.quality_stats = vec![QualityStat {
            id: "mana_reservation_+%".to_string(),
            value: -250,
        }];
        let at = |quality| gem.quality_stat(QualityVariant::Superior, quality).unwrap().value;
        assert_eq!(at(2), 0);
        assert_eq!(at(5), -1);
        assert_eq!(at(20), -5);
    }

    #[test]
    fn test_stats_at_level() {
        let gem = sample();
        let stats = gem.stats_at_level(21).unwrap();
        assert_eq!(
            stats,
            vec![
                RawStat::new("armour_+%_final", 33),
                RawStat::new("base_deal_no_damage", 1),
            ]
        );
    }

    #[test]
    fn test_missing_level_row() {
        let mut gem = sample();
        gem.name = "Determination".to_string();
        let err = gem.stats_at_level(30).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingLevelData {
                gem: "Determination".to_string(),
                level: 30
            }
        );
    }

    #[test]
    fn test_quality_stat_scaling() {
        let gem = sample();
        assert_eq!(
            gem.quality_stat(QualityVariant::Superior, 23),
            Some(RawStat::new("armour_+%", 11))
        );
        assert_eq!(
            gem.quality_stat(QualityVariant::Anomalous, 20),
            Some(RawStat::new("aura_effect_+%", 5))
        );
        assert_eq!(gem.quality_stat(QualityVariant::Divergent, 20), None);
    }

    #[test]
    fn test_base_tags() {
        let gem = sample();
        let tags = gem.base_tags();
        assert!(tags.contains("aura"));
        assert!(tags.contains("buff"));
        assert!(tags.contains("active_skill"));
        assert!(!gem.is_support());
    }
}
