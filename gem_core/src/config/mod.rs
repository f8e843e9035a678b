//! Reference data and build loading from JSON/TOML files

mod build;
mod character;
mod gems;
mod translations;

pub use build::{load_build, parse_build, BuildDescription};
pub use character::CharacterStats;
pub use gems::{ActiveSkillData, GemDefinition, GemLibrary, QualityStat, StaticStat, SupportData};
pub use translations::{
    Candidate, Condition, IndexHandler, TranslationEntry, TranslationTable, ValueFormat,
};

use crate::error::EngineError;
use crate::types::OutputCategory;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON file and deserialize it
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content)
}

/// Load a JSON string and deserialize it
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = serde_json::from_str(content)?;
    Ok(config)
}

/// Read-only reference data: gem definitions and one translation table per
/// output category
///
/// Built once and shared by reference with everything that resolves builds;
/// nothing in the engine mutates it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub gems: GemLibrary,
    pub aura_translations: TranslationTable,
    pub curse_translations: TranslationTable,
    pub mine_translations: TranslationTable,
    pub link_translations: TranslationTable,
}

/// File names inside a reference data directory
pub const GEMS_FILE: &str = "gems.json";
pub const AURA_TRANSLATIONS_FILE: &str = "aura_translations.json";
pub const CURSE_TRANSLATIONS_FILE: &str = "curse_translations.json";
pub const MINE_TRANSLATIONS_FILE: &str = "mine_translations.json";
pub const LINK_TRANSLATIONS_FILE: &str = "link_translations.json";

/// Raw JSON documents making up a reference data set
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSources<'a> {
    pub gems: &'a str,
    pub aura_translations: &'a str,
    pub curse_translations: &'a str,
    pub mine_translations: &'a str,
    pub link_translations: &'a str,
}

impl ReferenceData {
    /// Parse and validate a reference data set
    pub fn from_sources(sources: ReferenceSources<'_>) -> Result<Self, ConfigError> {
        let gems: HashMap<String, GemDefinition> = parse_json(sources.gems)?;
        let data = ReferenceData {
            gems: GemLibrary::new(gems),
            aura_translations: parse_json(sources.aura_translations)?,
            curse_translations: parse_json(sources.curse_translations)?,
            mine_translations: parse_json(sources.mine_translations)?,
            link_translations: parse_json(sources.link_translations)?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Load a reference data directory
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let read = |name: &str| fs::read_to_string(dir.join(name));
        let gems = read(GEMS_FILE)?;
        let aura = read(AURA_TRANSLATIONS_FILE)?;
        let curse = read(CURSE_TRANSLATIONS_FILE)?;
        let mine = read(MINE_TRANSLATIONS_FILE)?;
        let link = read(LINK_TRANSLATIONS_FILE)?;

        let data = Self::from_sources(ReferenceSources {
            gems: &gems,
            aura_translations: &aura,
            curse_translations: &curse,
            mine_translations: &mine,
            link_translations: &link,
        })?;
        tracing::debug!(dir = %dir.display(), gems = data.gems.len(), "Loaded reference data");
        Ok(data)
    }

    /// The reference set shipped with the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_sources(ReferenceSources {
            gems: include_str!("../../data/gems.json"),
            aura_translations: include_str!("../../data/aura_translations.json"),
            curse_translations: include_str!("../../data/curse_translations.json"),
            mine_translations: include_str!("../../data/mine_translations.json"),
            link_translations: include_str!("../../data/link_translations.json"),
        })
    }

    pub fn gem(&self, name: &str) -> Result<&GemDefinition, EngineError> {
        self.gems.get(name)
    }

    pub fn translations(&self, category: OutputCategory) -> &TranslationTable {
        match category {
            OutputCategory::Aura => &self.aura_translations,
            OutputCategory::Curse => &self.curse_translations,
            OutputCategory::Mine => &self.mine_translations,
            OutputCategory::Link => &self.link_translations,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        for category in OutputCategory::all() {
            problems.extend(
                self.translations(*category)
                    .validate()
                    .into_iter()
                    .map(|p| format!("{} translations: {}", category, p)),
            );
        }
        for gem in self.gems.iter() {
            if gem.quality_stats.len() > 4 {
                problems.push(format!("{}: more than four quality variants", gem.name));
            }
            for (level, row) in &gem.per_level {
                if row.len() > gem.stats.len() {
                    problems.push(format!(
                        "{}: level {} has {} values for {} stats",
                        gem.name,
                        level,
                        row.len(),
                        gem.stats.len()
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(problems.join("; ")))
        }
    }
}
