//! Prelude module for convenient imports
//!
//! ```rust
//! use gem_core::prelude::*;
//! ```

// Reference data and builds
pub use crate::config::{load_build, BuildDescription, CharacterStats, ReferenceData};

// Gems and items
pub use crate::gem::{GemInstance, TagModifier};
pub use crate::item::{GemDescription, ItemDescription, SocketDescription};

// Resolution and output
pub use crate::report::{analyze_build, Analyzer, BuildReport};
pub use crate::support::{resolve, SkillGem, SupportGem};

// Core types
pub use crate::error::EngineError;
pub use crate::types::{OutputCategory, QualityVariant, RawStat};
