//! Fatal errors raised while resolving a build
//!
//! Any of these aborts the whole build: a report is either complete or not
//! produced at all. Recoverable curse phrasing problems are reported as
//! [`Warning`](crate::report::Warning)s instead.

use crate::types::OutputCategory;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A gem name that the reference data does not know
    #[error("Unknown gem: {0}")]
    UnknownGem(String),

    /// A gem was listed as a support but has no support data
    #[error("{0} is not a support gem")]
    NotASupport(String),

    /// A gem instance came without a level
    #[error("Could not find the level of {0}")]
    MissingLevel(String),

    /// The per-level stat table has no row for the gem's resolved level
    #[error("{gem} has no stat data for level {level}")]
    MissingLevelData { gem: String, level: u32 },

    /// A non-zero stat value that no translation candidate accepts
    #[error("Could not find a translation for {stat_id} with value {value}")]
    Untranslatable { stat_id: String, value: i64 },

    /// A translated line that matches none of the category's rewrite rules
    #[error("Unhandled {category} line from {gem}: {line}")]
    UnhandledPhrasing {
        category: OutputCategory,
        gem: String,
        line: String,
    },

    /// An item mod that looked gem-related but could not be read
    #[error("Could not parse skill from mod: {0}")]
    UnparsedItemMod(String),

    /// A gem sits in a socket its item does not have
    #[error("{gem} is in socket {socket} but the item only has {available} sockets")]
    InvalidSocket {
        gem: String,
        socket: usize,
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::UnknownGem("Purity of Nothing".to_string());
        assert_eq!(err.to_string(), "Unknown gem: Purity of Nothing");

        let err = EngineError::UnhandledPhrasing {
            category: OutputCategory::Aura,
            gem: "Grace".to_string(),
            line: "Enemies flee".to_string(),
        };
        assert!(err.to_string().contains("aura"));
        assert!(err.to_string().contains("Enemies flee"));
    }
}
