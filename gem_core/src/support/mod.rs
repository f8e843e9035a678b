//! Support resolution: which supports apply to a skill and what they add
//!
//! Resolution is functional. [`resolve`] reads an [`ItemSkill`] and its
//! candidate supports and returns a new [`SkillGem`]; running it twice on the
//! same inputs gives equal results.

mod closure;
mod effects;

pub use closure::{close_tags, Closure};
pub use effects::{EffectAccumulators, EffectStat, EffectTarget};

use crate::config::{CharacterStats, ReferenceData};
use crate::error::EngineError;
use crate::gem::GemInstance;
use crate::item::{ItemSkill, SocketGroups};
use crate::types::{tag_set, OutputCategory, QualityVariant, RawStat, TagSet};
use serde::{Deserialize, Serialize};

/// Sentinel in `allowed_types` meaning every other allowed type is required
pub const ALL_REQUIRED: &str = "and";

/// A support gem with its eligibility rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportGem {
    pub gem: GemInstance,
    allowed: TagSet,
    excluded: TagSet,
    added: TagSet,
    supports_gems_only: bool,
}

impl SupportGem {
    /// Wrap a support gem instance
    ///
    /// Supports granted by an item (no socket) can only support socketed gems.
    pub fn new(gem: GemInstance, reference: &ReferenceData) -> Result<Self, EngineError> {
        let definition = gem.definition(reference)?;
        let data = definition
            .support_gem
            .as_ref()
            .ok_or_else(|| EngineError::NotASupport(gem.name.clone()))?;

        Ok(SupportGem {
            allowed: tag_set(&data.allowed_types),
            excluded: tag_set(&data.excluded_types),
            added: tag_set(&data.added_types),
            supports_gems_only: data.supports_gems_only || !gem.is_socketed(),
            gem,
        })
    }

    pub fn name(&self) -> &str {
        &self.gem.name
    }

    pub fn added_types(&self) -> &TagSet {
        &self.added
    }

    /// Whether this support may modify a skill with `tags`
    pub fn can_support(&self, tags: &TagSet, skill_socketed: bool) -> bool {
        if self.supports_gems_only && !skill_socketed {
            return false;
        }
        if !self.allowed.is_empty() {
            let allowed = if self.allowed.contains(ALL_REQUIRED) {
                self.allowed
                    .iter()
                    .filter(|t| t.as_str() != ALL_REQUIRED)
                    .all(|t| tags.contains(t))
            } else {
                !self.allowed.is_disjoint(tags)
            };
            if !allowed {
                return false;
            }
        }
        self.excluded.is_disjoint(tags)
    }
}

/// One support's contribution to a resolved skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportLink {
    pub name: String,
    pub level: u32,
    /// Stat ids that contributed a non-zero value
    pub stat_ids: Vec<String>,
}

/// Which definition a skill's effect lines are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectForm {
    /// The skill's own definition; vaal skills always show the Superior
    /// quality line here
    Primary,
    /// The regular base of a vaal skill
    Base,
}

/// An active skill after support resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGem {
    pub gem: GemInstance,
    pub effects: EffectAccumulators,
    /// Supports that contributed, in link order
    pub supports: Vec<SupportLink>,
    /// Every stat streamed by the applied supports
    pub support_stats: Vec<RawStat>,
    pub closure_passes: usize,
}

impl SkillGem {
    pub fn name(&self) -> &str {
        &self.gem.name
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.gem.has_tag(tag)
    }

    /// Fold in the character-wide bonuses
    pub fn add_character_effects(&mut self, character: &CharacterStats) {
        let name = self.gem.name.as_str();
        self.effects.aura_effect += character.aura_effect + character.specific_aura_effect(name);
        if self.gem.has_tag("mine") {
            self.effects.aura_effect += character.mine_aura_effect;
        }
        self.effects.inc_curse_effect +=
            character.inc_curse_effect + character.specific_curse_effect(name);
        self.effects.more_curse_effect += character.more_curse_effect;
        self.effects.more_hex_effect += character.more_hex_effect;
        self.effects.inc_link_effect += character.link_effect;
        self.effects.mine_limit += character.mine_limit;
    }

    pub fn curse_effect(&self) -> i64 {
        self.effects
            .curse_effect(self.gem.has_tag("curse"), self.gem.has_tag("hex"))
    }

    /// Auras that buff you and your allies rather than debuff enemies
    pub fn applies_to_allies(&self) -> bool {
        self.gem.has_tag("aura") && !self.gem.has_tag("auraaffectsenemies")
    }

    /// Whether the skill's effects belong in `category`
    pub fn belongs_to(&self, category: OutputCategory) -> bool {
        match category {
            OutputCategory::Aura => self.applies_to_allies() && !self.gem.has_tag("remotemined"),
            _ => self.gem.has_tag(category.tag()),
        }
    }

    /// Percentage bonus applied to the skill's effect in `category`
    pub fn scaling(&self, category: OutputCategory) -> i64 {
        match category {
            OutputCategory::Aura | OutputCategory::Mine => self.effects.aura_effect,
            OutputCategory::Curse => self.curse_effect(),
            OutputCategory::Link => self.effects.inc_link_effect,
        }
    }

    /// Forms that produce separate effect blocks
    pub fn forms(&self) -> &'static [EffectForm] {
        if self.gem.has_vaal_form() {
            &[EffectForm::Primary, EffectForm::Base]
        } else {
            &[EffectForm::Primary]
        }
    }

    /// Name shown for `form`
    pub fn form_name(&self, form: EffectForm) -> &str {
        match (form, &self.gem.base_name) {
            (EffectForm::Base, Some(base)) => base,
            _ => &self.gem.name,
        }
    }

    /// Level stats of `form` followed by its quality stat
    ///
    /// Quality stats that feed the accumulators were folded in during
    /// resolution and are left out here.
    pub fn effect_stats(
        &self,
        reference: &ReferenceData,
        form: EffectForm,
    ) -> Result<Vec<RawStat>, EngineError> {
        let (definition, variant) = match form {
            EffectForm::Primary if self.gem.has_vaal_form() => {
                (self.gem.definition(reference)?, QualityVariant::Superior)
            }
            EffectForm::Primary => (self.gem.definition(reference)?, self.gem.quality_variant),
            EffectForm::Base => (self.gem.quality_definition(reference)?, self.gem.quality_variant),
        };

        let mut stats = definition.stats_at_level(self.gem.level)?;
        let quality = self
            .gem
            .quality_definition(reference)?
            .quality_stat(variant, self.gem.quality);
        if let Some(stat) = quality {
            let redirected = EffectStat::from_stat_id(&stat.id)
                .is_some_and(EffectStat::redirects_own_quality);
            if !redirected {
                stats.push(stat);
            }
        }
        Ok(stats)
    }
}

/// Apply every eligible linked support to a skill
///
/// Supports are taken in candidate order. Only supports that contributed a
/// non-zero value to the skill's level, quality or effects are listed.
pub fn resolve(
    skill: &ItemSkill,
    candidates: &[SupportGem],
    groups: &SocketGroups,
    reference: &ReferenceData,
) -> Result<SkillGem, EngineError> {
    let linked: Vec<&SupportGem> = candidates
        .iter()
        .filter(|support| groups.are_linked(skill.gem.socket, support.gem.socket))
        .collect();
    let closure = close_tags(&skill.gem.tags, skill.gem.is_socketed(), &linked);

    let mut gem = skill.gem.clone();
    gem.tags = closure.tags;
    let mut effects = skill.effects;
    let mut supports = Vec::new();
    let mut support_stats = Vec::new();

    for &index in &closure.applied {
        let support = linked[index];
        let stats = support.gem.stat_stream(reference)?;
        let mut stat_ids = Vec::new();

        for stat in &stats {
            let Some(effect) = EffectStat::from_stat_id(&stat.id) else {
                continue;
            };
            match effects.apply_support_stat(effect, stat.value) {
                EffectTarget::Level(delta) => gem.add_levels(delta),
                EffectTarget::Quality(delta) => gem.add_quality(delta),
                EffectTarget::Accumulators => {}
            }
            if stat.value != 0 {
                stat_ids.push(stat.id.clone());
            }
        }

        if !stat_ids.is_empty() {
            supports.push(SupportLink {
                name: support.name().to_string(),
                level: support.gem.level,
                stat_ids,
            });
        }
        support_stats.extend(stats);
    }

    // Own quality counts once, after supports raised it
    let own_quality = gem
        .quality_definition(reference)?
        .quality_stat(gem.quality_variant, gem.quality);
    if let Some(stat) = own_quality {
        if let Some(effect) = EffectStat::from_stat_id(&stat.id) {
            effects.apply_own_quality(effect, stat.value);
        }
    }

    tracing::debug!(
        skill = %gem.name,
        level = gem.level,
        quality = gem.quality,
        supports = supports.len(),
        passes = closure.passes,
        "Resolved skill"
    );

    Ok(SkillGem {
        gem,
        effects,
        supports,
        support_stats,
        closure_passes: closure.passes,
    })
}
