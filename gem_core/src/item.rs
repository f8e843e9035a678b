//! Item topology: socketed gems, socket groups and gem-related item mods

use crate::config::{CharacterStats, ReferenceData};
use crate::error::EngineError;
use crate::gem::{parse_gem_descriptor, GemInstance, TagModifier};
use crate::support::EffectAccumulators;
use crate::types::SocketIndex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Inventory slots holding the weapon swap set, which is never active
pub const SWAP_SLOTS: &[&str] = &["Weapon2", "Offhand2"];

/// One equipped item as read from a build file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDescription {
    pub name: String,
    #[serde(default)]
    pub slot: Option<String>,
    /// Implicit and explicit mod text
    #[serde(default)]
    pub mods: Vec<String>,
    #[serde(default)]
    pub sockets: Vec<SocketDescription>,
    #[serde(default)]
    pub gems: Vec<GemDescription>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketDescription {
    pub group: u32,
}

/// A gem socketed in an item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GemDescription {
    pub name: String,
    /// Type line shown on the gem, e.g. "Anomalous Grace"
    #[serde(default)]
    pub type_line: Option<String>,
    /// Base gem of a hybrid, e.g. "Grace" for "Vaal Grace"
    #[serde(default)]
    pub base_name: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub quality: u32,
    #[serde(default)]
    pub socket: Option<SocketIndex>,
    #[serde(default)]
    pub support: bool,
}

/// What an item mod means for the gems of its item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMod {
    /// "+1 to Level of Socketed Curse Gems"
    SocketedLevel(Vec<TagModifier>),
    /// "+20% to Quality of Socketed Aura Gems"
    SocketedQuality(Vec<TagModifier>),
    /// "Grants Level 20 Purity of Fire Skill"
    GrantedSkill { name: String, level: u32 },
    /// "Curse Enemies with Vulnerability on Hit, with 48% increased Effect"
    GrantedCurse { name: String, inc_effect: i64 },
    /// "Socketed Gems are Supported by Level 18 Blasphemy"
    GrantedSupport { name: String, level: u32 },
    /// Anything that does not touch gems
    Other,
}

static SOCKETED_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.\d+) to Level of Socketed (.*)Gems").expect("socketed level pattern")
});
static SOCKETED_QUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.\d+)% to Quality of Socketed (.*)Gems").expect("socketed quality pattern")
});
static GRANTED_SKILL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Grants Level (\d+) (.+) Skill").expect("granted skill pattern")
});
static GRANTED_CURSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Curse Enemies with (.*) (?:on|when) (?:.*) (\d+)% increased Effect")
        .expect("granted curse pattern")
});
static GRANTED_SUPPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Socketed Gems are Supported by Level (\d+) (.+)")
        .expect("granted support pattern")
});

impl ItemMod {
    /// Classify one line of item mod text
    ///
    /// Lines that grant a gem but cannot be read are errors, not
    /// [`ItemMod::Other`].
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let unparsed = || EngineError::UnparsedItemMod(text.to_string());

        if let Some(caps) = SOCKETED_LEVEL.captures(text) {
            if let Some(value) = signed_value(&caps[1]) {
                return Ok(ItemMod::SocketedLevel(parse_gem_descriptor(Some(&caps[2]), value)));
            }
        }
        if let Some(caps) = SOCKETED_QUALITY.captures(text) {
            if let Some(value) = signed_value(&caps[1]) {
                return Ok(ItemMod::SocketedQuality(parse_gem_descriptor(Some(&caps[2]), value)));
            }
        }
        if text.contains("Grants Level") {
            let caps = GRANTED_SKILL.captures(text).ok_or_else(unparsed)?;
            return Ok(ItemMod::GrantedSkill {
                name: caps[2].to_string(),
                level: caps[1].parse().map_err(|_| unparsed())?,
            });
        }
        if let Some(caps) = GRANTED_CURSE.captures(text) {
            return Ok(ItemMod::GrantedCurse {
                name: caps[1].to_string(),
                inc_effect: caps[2].parse().map_err(|_| unparsed())?,
            });
        }
        if text.contains("Socketed Gems are Supported by Level") {
            let caps = GRANTED_SUPPORT.captures(text).ok_or_else(unparsed)?;
            return Ok(ItemMod::GrantedSupport {
                name: format!("{} Support", &caps[2]),
                level: caps[1].parse().map_err(|_| unparsed())?,
            });
        }
        Ok(ItemMod::Other)
    }
}

/// "+2", "-1"; the leading character may be any sign or digit
fn signed_value(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Socket group of every socket of one item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketGroups {
    groups: Vec<u32>,
}

impl SocketGroups {
    pub fn new(sockets: &[SocketDescription]) -> Self {
        SocketGroups {
            groups: sockets.iter().map(|s| s.group).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_of(&self, socket: SocketIndex) -> Option<u32> {
        self.groups.get(socket).copied()
    }

    /// Gems without a socket are linked to everything
    pub fn are_linked(&self, a: Option<SocketIndex>, b: Option<SocketIndex>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => match (self.group_of(a), self.group_of(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
            _ => true,
        }
    }
}

/// An active skill gem before support resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSkill {
    pub gem: GemInstance,
    /// Effects the item grants along with the skill
    pub effects: EffectAccumulators,
}

impl ItemSkill {
    pub fn new(gem: GemInstance) -> Self {
        ItemSkill {
            gem,
            effects: EffectAccumulators::default(),
        }
    }
}

/// All gems of one item with level and quality modifiers applied
#[derive(Debug, Clone, Default)]
pub struct ItemGems {
    pub skills: Vec<ItemSkill>,
    pub supports: Vec<GemInstance>,
    pub groups: SocketGroups,
}

impl ItemDescription {
    /// Whether the item sits in the inactive weapon swap set
    pub fn is_swap(&self) -> bool {
        self.slot
            .as_deref()
            .is_some_and(|slot| SWAP_SLOTS.contains(&slot))
    }

    /// Build the gem instances of this item
    ///
    /// Socketed gems get the item's local modifiers and the character's
    /// global ones. Gems granted by mods only get the global ones. Level
    /// and quality are clamped once, after every modifier is summed.
    pub fn gems(
        &self,
        reference: &ReferenceData,
        character: &CharacterStats,
    ) -> Result<ItemGems, EngineError> {
        let groups = SocketGroups::new(&self.sockets);
        let mut gems = ItemGems {
            groups,
            ..Default::default()
        };
        if self.is_swap() {
            return Ok(gems);
        }

        let mut local_levels = Vec::new();
        let mut local_quality = Vec::new();
        let mut granted_skills = Vec::new();
        let mut granted_supports = Vec::new();

        for text in &self.mods {
            match ItemMod::parse(text)? {
                ItemMod::SocketedLevel(mods) => local_levels.extend(mods),
                ItemMod::SocketedQuality(mods) => local_quality.extend(mods),
                ItemMod::GrantedSkill { name, level } => {
                    let gem = GemInstance::new(reference, &name, level, 0, None)?;
                    granted_skills.push(ItemSkill::new(gem));
                }
                ItemMod::GrantedCurse { name, inc_effect } => {
                    let gem = GemInstance::new(reference, &name, 1, 0, None)?;
                    let mut skill = ItemSkill::new(gem);
                    skill.effects.inc_curse_effect = inc_effect;
                    granted_skills.push(skill);
                }
                ItemMod::GrantedSupport { name, level } => {
                    let gem = GemInstance::new(reference, &name, level, 0, None)?;
                    if !gem.is_support() {
                        return Err(EngineError::NotASupport(name));
                    }
                    granted_supports.push(gem);
                }
                ItemMod::Other => {}
            }
        }

        for description in &self.gems {
            let gem = self.socketed_gem(description, reference)?;
            if gem.is_support() {
                gems.supports.push(gem);
            } else {
                gems.skills.push(ItemSkill::new(gem));
            }
        }
        gems.skills.extend(granted_skills);
        gems.supports.extend(granted_supports);

        let all = gems
            .skills
            .iter_mut()
            .map(|skill| &mut skill.gem)
            .chain(gems.supports.iter_mut());
        for gem in all {
            // item mods only reach gems sitting in the item's sockets
            let (levels, quality) = if gem.is_socketed() {
                (local_levels.as_slice(), local_quality.as_slice())
            } else {
                (&[][..], &[][..])
            };
            gem.apply_level_modifiers(&[levels, character.global_level_mods.as_slice()]);
            gem.apply_quality_modifiers(&[quality, character.global_quality_mods.as_slice()]);
        }

        tracing::debug!(
            item = %self.name,
            skills = gems.skills.len(),
            supports = gems.supports.len(),
            "Collected item gems"
        );
        Ok(gems)
    }

    fn socketed_gem(
        &self,
        description: &GemDescription,
        reference: &ReferenceData,
    ) -> Result<GemInstance, EngineError> {
        let shown = description.type_line.as_deref().unwrap_or(&description.name);
        let level = description
            .level
            .ok_or_else(|| EngineError::MissingLevel(shown.to_string()))?;

        if let Some(socket) = description.socket {
            if socket >= self.sockets.len() {
                return Err(EngineError::InvalidSocket {
                    gem: shown.to_string(),
                    socket,
                    available: self.sockets.len(),
                });
            }
        }

        let mut gem = GemInstance::new(
            reference,
            &description.name,
            level,
            description.quality,
            description.socket,
        )?;
        if let Some(type_line) = &description.type_line {
            gem = gem.with_display_name(type_line);
        }
        if let Some(base) = &description.base_name {
            reference.gem(base)?;
            gem = gem.with_base_name(base);
        }
        if description.support && !gem.is_support() {
            return Err(EngineError::NotASupport(description.name.clone()));
        }
        Ok(gem)
    }
}
