//! EffectAccumulators - scalar effect counters of a resolved skill

use serde::{Deserialize, Serialize};

/// Percentage and count bonuses collected for one skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectAccumulators {
    /// Increased aura effect (also scales mine auras)
    pub aura_effect: i64,
    pub inc_curse_effect: i64,
    pub more_curse_effect: i64,
    pub more_hex_effect: i64,
    pub inc_link_effect: i64,
    pub mine_limit: i64,
}

/// Stats that feed a skill's level, quality or accumulators
///
/// This is the closed dispatch table for support stats: any stat id not
/// listed here contributes nothing to the skill's numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectStat {
    NonCurseAuraEffect,
    /// Raises both aura and curse effect
    AuraEffect,
    SupportedGemLevel,
    SupportedGemQuality,
    CurseEffect,
    MoreCurseEffect,
    MoreHexEffect,
    MineLimit,
    LinkEffect,
}

impl EffectStat {
    pub fn from_stat_id(id: &str) -> Option<Self> {
        let stat = match id {
            "non_curse_aura_effect_+%" => EffectStat::NonCurseAuraEffect,
            "aura_effect_+%" => EffectStat::AuraEffect,
            "supported_aura_skill_gem_level_+" | "supported_active_skill_gem_level_+" => {
                EffectStat::SupportedGemLevel
            }
            "supported_active_skill_gem_quality_%" => EffectStat::SupportedGemQuality,
            "curse_effect_+%" => EffectStat::CurseEffect,
            "support_blasphemy_curse_effect_+%_final" => EffectStat::MoreCurseEffect,
            "support_hextouch_curse_effect_+%_final" => EffectStat::MoreHexEffect,
            "number_of_additional_remote_mines_allowed" => EffectStat::MineLimit,
            "link_skill_buff_effect_+%" => EffectStat::LinkEffect,
            _ => return None,
        };
        Some(stat)
    }

    /// Whether a skill's own quality stat with this effect is folded into the
    /// accumulators instead of being shown as a line
    pub fn redirects_own_quality(self) -> bool {
        matches!(
            self,
            EffectStat::NonCurseAuraEffect
                | EffectStat::AuraEffect
                | EffectStat::CurseEffect
                | EffectStat::LinkEffect
        )
    }
}

/// Where a support's stat lands on the skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    Accumulators,
    Level(i64),
    Quality(i64),
}

impl EffectAccumulators {
    pub fn new() -> Self {
        EffectAccumulators::default()
    }

    /// Apply a support's stat; level and quality are returned for the caller
    pub fn apply_support_stat(&mut self, stat: EffectStat, value: i64) -> EffectTarget {
        match stat {
            EffectStat::NonCurseAuraEffect => self.aura_effect += value,
            EffectStat::AuraEffect => {
                self.aura_effect += value;
                self.inc_curse_effect += value;
            }
            EffectStat::SupportedGemLevel => return EffectTarget::Level(value),
            EffectStat::SupportedGemQuality => return EffectTarget::Quality(value),
            EffectStat::CurseEffect => self.inc_curse_effect += value,
            EffectStat::MoreCurseEffect => self.more_curse_effect += value,
            EffectStat::MoreHexEffect => self.more_hex_effect += value,
            EffectStat::MineLimit => self.mine_limit += value,
            EffectStat::LinkEffect => self.inc_link_effect += value,
        }
        EffectTarget::Accumulators
    }

    /// Apply a skill's own quality stat; returns false if it is not redirected
    pub fn apply_own_quality(&mut self, stat: EffectStat, value: i64) -> bool {
        match stat {
            EffectStat::NonCurseAuraEffect | EffectStat::AuraEffect => self.aura_effect += value,
            EffectStat::CurseEffect => self.inc_curse_effect += value,
            EffectStat::LinkEffect => self.inc_link_effect += value,
            _ => return false,
        }
        true
    }

    /// Compounded curse effect percentage
    ///
    /// `inc`/`more` only count for curses, the hex multiplier only for hexes.
    pub fn curse_effect(&self, is_curse: bool, is_hex: bool) -> i64 {
        let mut inc = 0;
        let mut more = 0;
        if is_curse {
            inc += self.inc_curse_effect;
            more += self.more_curse_effect;
        }
        if is_hex {
            more += self.more_hex_effect;
        }
        let multiplier = (1.0 + inc as f64 / 100.0) * (1.0 + more as f64 / 100.0);
        ((multiplier - 1.0) * 100.0).round_ties_even() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table() {
        assert_eq!(
            EffectStat::from_stat_id("supported_aura_skill_gem_level_+"),
            Some(EffectStat::SupportedGemLevel)
        );
        assert_eq!(
            EffectStat::from_stat_id("support_blasphemy_curse_effect_+%_final"),
            Some(EffectStat::MoreCurseEffect)
        );
        assert_eq!(EffectStat::from_stat_id("base_evasion_rating"), None);
    }

    #[test]
    fn test_aura_effect_also_feeds_curses() {
        let mut acc = EffectAccumulators::new();
        let target = acc.apply_support_stat(EffectStat::AuraEffect, 24);
        assert_eq!(target, EffectTarget::Accumulators);
        assert_eq!(acc.aura_effect, 24);
        assert_eq!(acc.inc_curse_effect, 24);
    }

    #[test]
    fn test_level_and_quality_returned() {
        let mut acc = EffectAccumulators::new();
        assert_eq!(
            acc.apply_support_stat(EffectStat::SupportedGemLevel, 2),
            EffectTarget::Level(2)
        );
        assert_eq!(
            acc.apply_support_stat(EffectStat::SupportedGemQuality, 16),
            EffectTarget::Quality(16)
        );
        assert_eq!(acc, EffectAccumulators::default());
    }

    #[test]
    fn test_own_quality_has_no_cross_effect() {
        let mut acc = EffectAccumulators::new();
        assert!(acc.apply_own_quality(EffectStat::AuraEffect, 5));
        assert_eq!(acc.inc_curse_effect, 0);
        assert!(!acc.apply_own_quality(EffectStat::MineLimit, 5));
        assert_eq!(acc.mine_limit, 0);
    }

    #[test]
    fn test_curse_effect_compounds() {
        let acc = EffectAccumulators {
            inc_curse_effect: 24,
            more_curse_effect: -25,
            ..Default::default()
        };
        // (1.24 * 0.75 - 1) * 100 = -7
        assert_eq!(acc.curse_effect(true, true), -7);
        assert_eq!(acc.curse_effect(false, false), 0);
    }

    #[test]
    fn test_curse_effect_more_only() {
        let acc = EffectAccumulators {
            more_curse_effect: 10,
            more_hex_effect: 24,
            ..Default::default()
        };
        // 1.34 - 1, hex and curse multipliers add
        assert_eq!(acc.curse_effect(true, true), 34);
        assert_eq!(acc.curse_effect(true, false), 10);
    }
}
