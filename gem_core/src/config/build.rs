//! Build descriptions: the character bundle plus equipped items

use super::{CharacterStats, ConfigError};
use crate::item::ItemDescription;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One character's build as read from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildDescription {
    #[serde(default)]
    pub character: CharacterStats,
    #[serde(default)]
    pub items: Vec<ItemDescription>,
}

/// Load a build from a TOML file
pub fn load_build(path: &Path) -> Result<BuildDescription, ConfigError> {
    super::load_toml(path)
}

/// Load a build from a TOML string
pub fn parse_build(content: &str) -> Result<BuildDescription, ConfigError> {
    super::parse_toml(content)
}
