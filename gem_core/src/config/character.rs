//! Character-wide scalars handed over by the stat aggregator

use crate::gem::TagModifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate character stats relevant to gem effects
///
/// Percentages are whole numbers (`26` = 26%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Increased effect of non-curse auras
    #[serde(default)]
    pub aura_effect: i64,
    #[serde(default)]
    pub inc_curse_effect: i64,
    #[serde(default)]
    pub more_curse_effect: i64,
    #[serde(default)]
    pub more_hex_effect: i64,
    /// Increased effect of auras from mines
    #[serde(default)]
    pub mine_aura_effect: i64,
    /// Maximum number of placed mines
    #[serde(default = "default_mine_limit")]
    pub mine_limit: i64,
    /// Increased effect of link buffs
    #[serde(default)]
    pub link_effect: i64,
    #[serde(default)]
    pub maximum_life: i64,
    /// Gem name -> increased aura effect for that aura only
    #[serde(default)]
    pub specific_aura_effect: HashMap<String, i64>,
    /// Gem name -> increased curse effect for that curse only
    #[serde(default)]
    pub specific_curse_effect: HashMap<String, i64>,
    #[serde(default)]
    pub global_level_mods: Vec<TagModifier>,
    #[serde(default)]
    pub global_quality_mods: Vec<TagModifier>,
}

fn default_mine_limit() -> i64 {
    15
}

impl Default for CharacterStats {
    fn default() -> Self {
        CharacterStats {
            aura_effect: 0,
            inc_curse_effect: 0,
            more_curse_effect: 0,
            more_hex_effect: 0,
            mine_aura_effect: 0,
            mine_limit: default_mine_limit(),
            link_effect: 0,
            maximum_life: 0,
            specific_aura_effect: HashMap::new(),
            specific_curse_effect: HashMap::new(),
            global_level_mods: Vec::new(),
            global_quality_mods: Vec::new(),
        }
    }
}

impl CharacterStats {
    pub fn specific_aura_effect(&self, gem: &str) -> i64 {
        self.specific_aura_effect.get(gem).copied().unwrap_or(0)
    }

    pub fn specific_curse_effect(&self, gem: &str) -> i64 {
        self.specific_curse_effect.get(gem).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let stats = CharacterStats::default();
        assert_eq!(stats.mine_limit, 15);
        assert_eq!(stats.specific_aura_effect("Grace"), 0);
    }

    #[test]
    fn test_parse_character_toml() {
        let toml = r#"
aura_effect = 40
more_curse_effect = 10
maximum_life = 5200

[specific_curse_effect]
Despair = 10

[[global_level_mods]]
required_tags = ["lightning"]
delta = 1

[[global_quality_mods]]
delta = 20
"#;
        let stats: CharacterStats = toml::from_str(toml).unwrap();
        assert_eq!(stats.aura_effect, 40);
        assert_eq!(stats.mine_limit, 15);
        assert_eq!(stats.specific_curse_effect("Despair"), 10);
        assert_eq!(stats.global_level_mods, vec![TagModifier::new(["lightning"], 1)]);
        assert_eq!(stats.global_quality_mods, vec![TagModifier::global(20)]);
    }
}
