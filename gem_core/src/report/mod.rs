//! Build report: per category, one block of effect lines per skill
//!
//! Translated lines are normalised from the game's internal phrasing
//! ("You and nearby Allies have X") into the phrasing a character sheet
//! uses ("X"). Unrecognised aura, mine and link lines abort the report;
//! unrecognised curse lines are collected as [`Warning`]s.

pub mod aura;
pub mod curse;
pub mod link;
pub mod mine;

use crate::config::{BuildDescription, CharacterStats, ReferenceData};
use crate::error::EngineError;
use crate::item::ItemDescription;
use crate::support::{resolve, EffectForm, SkillGem, SupportGem};
use crate::translate::translate;
use crate::types::{OutputCategory, QualityVariant};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of normalising one translated line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Lines(Vec<String>),
    /// Recognised but has no player-facing counterpart
    Skip,
    Unhandled,
}

impl Rewrite {
    pub fn line(text: impl Into<String>) -> Self {
        Rewrite::Lines(vec![text.into()])
    }
}

/// Header plus effect lines of one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBlock {
    pub header: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: OutputCategory,
    pub blocks: Vec<SkillBlock>,
}

/// A curse line no rewrite rule recognised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub gem: String,
    pub line: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unhandled formatted line from {}: {}", self.gem, self.line)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// One entry per category, in [`OutputCategory::all`] order
    pub categories: Vec<CategoryReport>,
    pub warnings: Vec<Warning>,
}

impl BuildReport {
    pub fn category(&self, category: OutputCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Blocks of one category, empty if none
    pub fn blocks(&self, category: OutputCategory) -> &[SkillBlock] {
        self.category(category)
            .map(|c| c.blocks.as_slice())
            .unwrap_or(&[])
    }

    /// Keep only `category`
    pub fn retain_category(&mut self, category: OutputCategory) {
        self.categories.retain(|c| c.category == category);
    }
}

impl fmt::Display for SkillBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for category in &self.categories {
            for block in &category.blocks {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{}", block)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Runs resolution and translation for one character
pub struct Analyzer<'a> {
    reference: &'a ReferenceData,
    character: &'a CharacterStats,
}

impl<'a> Analyzer<'a> {
    pub fn new(reference: &'a ReferenceData, character: &'a CharacterStats) -> Self {
        Analyzer {
            reference,
            character,
        }
    }

    /// Resolve every active skill of one item, character effects included
    pub fn skills_in_item(&self, item: &ItemDescription) -> Result<Vec<SkillGem>, EngineError> {
        let gems = item.gems(self.reference, self.character)?;
        let supports = gems
            .supports
            .into_iter()
            .map(|gem| SupportGem::new(gem, self.reference))
            .collect::<Result<Vec<_>, _>>()?;

        gems.skills
            .iter()
            .map(|skill| {
                let mut resolved = resolve(skill, &supports, &gems.groups, self.reference)?;
                resolved.add_character_effects(self.character);
                Ok(resolved)
            })
            .collect()
    }

    /// Report every category for a set of equipped items
    pub fn analyze(&self, items: &[ItemDescription]) -> Result<BuildReport, EngineError> {
        let mut skills = Vec::new();
        for item in items {
            skills.extend(self.skills_in_item(item)?);
        }

        let mut report = BuildReport::default();
        for &category in OutputCategory::all() {
            let mut blocks = Vec::new();
            for skill in skills.iter().filter(|s| s.belongs_to(category)) {
                for &form in skill.forms() {
                    let block = self.block(skill, category, form, &mut report.warnings)?;
                    blocks.extend(block);
                }
            }
            report.categories.push(CategoryReport { category, blocks });
        }
        Ok(report)
    }

    /// Effect block of one skill form, `None` when it has no lines
    pub fn block(
        &self,
        skill: &SkillGem,
        category: OutputCategory,
        form: EffectForm,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<SkillBlock>, EngineError> {
        let mut stats = skill.effect_stats(self.reference, form)?;
        if category == OutputCategory::Mine {
            stats.extend(skill.support_stats.iter().cloned());
        }
        let scaling = skill.scaling(category);
        let translated = translate(&stats, scaling, self.reference.translations(category))?;

        let mut lines = Vec::new();
        for line in translated {
            let rewrite = match category {
                OutputCategory::Aura => aura::rewrite(&line),
                OutputCategory::Curse => curse::rewrite(&line),
                OutputCategory::Mine => mine::rewrite(&line, skill.effects.mine_limit),
                OutputCategory::Link => link::rewrite(&line, self.character.maximum_life),
            };
            match rewrite {
                Rewrite::Lines(rewritten) => lines.extend(rewritten),
                Rewrite::Skip => {}
                Rewrite::Unhandled if category == OutputCategory::Curse => {
                    tracing::warn!(gem = %skill.name(), line = %line, "Unhandled curse line");
                    warnings.push(Warning {
                        gem: skill.name().to_string(),
                        line,
                    });
                }
                Rewrite::Unhandled => {
                    return Err(EngineError::UnhandledPhrasing {
                        category,
                        gem: skill.name().to_string(),
                        line,
                    });
                }
            }
        }

        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(SkillBlock {
            header: header(skill, form, scaling),
            lines,
        }))
    }
}

/// `// [Variant ]Name (lvl L, Q%) [(Support 20, ...)] S%`
pub fn header(skill: &SkillGem, form: EffectForm, scaling: i64) -> String {
    let mut header = String::from("// ");
    if skill.gem.quality_variant != QualityVariant::Superior {
        header.push_str(skill.gem.quality_variant.name());
        header.push(' ');
    }
    header.push_str(&format!(
        "{} (lvl {}, {}%)",
        skill.form_name(form),
        skill.gem.level,
        skill.gem.quality
    ));
    if !skill.supports.is_empty() {
        let supports: Vec<String> = skill
            .supports
            .iter()
            .map(|s| format!("{} {}", s.name, s.level))
            .collect();
        header.push_str(&format!(" ({})", supports.join(", ")));
    }
    header.push_str(&format!(" {}%", scaling));
    header
}

/// Load-free entry point: report a whole build description
pub fn analyze_build(
    reference: &ReferenceData,
    build: &BuildDescription,
) -> Result<BuildReport, EngineError> {
    Analyzer::new(reference, &build.character).analyze(&build.items)
}
