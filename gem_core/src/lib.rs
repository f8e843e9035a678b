//! gem_core - Aura, curse, mine and link effect engine for skill gems
//!
//! This library provides:
//! - ReferenceData: gem definitions and stat translation tables
//! - GemInstance: a gem on an item, with level/quality modifiers applied
//! - Support resolution: which linked supports apply and what they add
//! - Translation: raw stat values to scaled effect lines
//! - Analyzer: per-category effect blocks for a whole build

pub mod config;
pub mod error;
pub mod gem;
pub mod item;
pub mod prelude;
pub mod report;
pub mod support;
pub mod translate;
pub mod types;

// Re-export core types for convenience
pub use config::{BuildDescription, CharacterStats, ConfigError, GemDefinition, ReferenceData};
pub use error::EngineError;
pub use gem::{GemInstance, TagModifier};
pub use item::{ItemDescription, ItemMod, SocketGroups};
pub use report::{analyze_build, Analyzer, BuildReport, SkillBlock, Warning};
pub use support::{resolve, EffectAccumulators, SkillGem, SupportGem, SupportLink};
pub use translate::translate;
pub use types::{GemCategory, OutputCategory, QualityVariant, RawStat, TagSet};
