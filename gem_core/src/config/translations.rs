//! Stat translation tables
//!
//! Loaded from RePoE-style JSON: a list of entries, each naming the stat ids
//! it consumes and an ordered list of English candidates.
//!
//! ```json
//! { "ids": ["base_evasion_rating"],
//!   "English": [{ "condition": [{ "min": 1 }], "format": ["#"],
//!                 "index_handlers": [[]],
//!                 "string": "You and nearby Allies gain {0} additional Evasion Rating" }] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unit conversion applied to a raw value before percentage scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexHandler {
    PerMinuteToPerSecond,
    #[serde(rename = "per_minute_to_per_second_2dp")]
    PerMinuteToPerSecond2dp,
    MillisecondsToSeconds,
    #[serde(rename = "milliseconds_to_seconds_2dp")]
    MillisecondsToSeconds2dp,
    DivideByOneHundred,
    DivideByOneThousand,
    #[serde(rename = "divide_by_ten_1dp")]
    DivideByTen1dp,
    Negate,
}

impl IndexHandler {
    /// Divisor applied by this handler, or `None` for a sign flip
    pub fn divisor(self) -> Option<f64> {
        match self {
            IndexHandler::PerMinuteToPerSecond | IndexHandler::PerMinuteToPerSecond2dp => {
                Some(60.0)
            }
            IndexHandler::MillisecondsToSeconds | IndexHandler::MillisecondsToSeconds2dp => {
                Some(1000.0)
            }
            IndexHandler::DivideByOneHundred => Some(100.0),
            IndexHandler::DivideByOneThousand => Some(1000.0),
            IndexHandler::DivideByTen1dp => Some(10.0),
            IndexHandler::Negate => None,
        }
    }
}

/// How a scaled value is written into the template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFormat {
    #[default]
    #[serde(rename = "#")]
    Plain,
    /// Always carries a sign (`+5`, `-5`)
    #[serde(rename = "+#")]
    Signed,
    /// Consumed but not written
    #[serde(rename = "ignore")]
    Ignore,
}

/// Inclusive range a raw value must fall in; empty means unconditional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

impl Condition {
    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// One candidate phrasing of a translation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// One condition per consumed stat; missing conditions always match
    #[serde(default)]
    pub condition: Vec<Condition>,
    #[serde(default)]
    pub format: Vec<ValueFormat>,
    /// One handler list per consumed stat
    #[serde(default)]
    pub index_handlers: Vec<Vec<IndexHandler>>,
    /// Template with `{0}`, `{1}` placeholders
    pub string: String,
}

impl Candidate {
    /// Whether every raw value falls in its condition
    pub fn matches(&self, values: &[i64]) -> bool {
        values
            .iter()
            .enumerate()
            .all(|(i, value)| self.condition.get(i).map_or(true, |c| c.contains(*value)))
    }

    pub fn handlers(&self, position: usize) -> &[IndexHandler] {
        self.index_handlers
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn value_format(&self, position: usize) -> ValueFormat {
        self.format.get(position).copied().unwrap_or_default()
    }
}

/// All phrasings for a group of stat ids translated together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub ids: Vec<String>,
    #[serde(rename = "English")]
    pub candidates: Vec<Candidate>,
}

impl TranslationEntry {
    /// Number of consecutive stat values this entry consumes
    pub fn arity(&self) -> usize {
        self.ids.len()
    }

    /// First candidate accepting all values
    pub fn select(&self, values: &[i64]) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.matches(values))
    }
}

/// Stat id -> translation lookup for one output category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TranslationEntry>", into = "Vec<TranslationEntry>")]
pub struct TranslationTable {
    entries: Vec<TranslationEntry>,
    /// stat id -> (entry index, position within the entry's ids)
    by_stat: HashMap<String, (usize, usize)>,
}

impl From<Vec<TranslationEntry>> for TranslationTable {
    fn from(entries: Vec<TranslationEntry>) -> Self {
        let mut by_stat = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            for (position, id) in entry.ids.iter().enumerate() {
                by_stat.entry(id.clone()).or_insert((index, position));
            }
        }
        TranslationTable { entries, by_stat }
    }
}

impl From<TranslationTable> for Vec<TranslationEntry> {
    fn from(table: TranslationTable) -> Self {
        table.entries
    }
}

impl TranslationTable {
    /// Entry index and position for a stat id
    pub fn lookup(&self, stat_id: &str) -> Option<(usize, usize)> {
        self.by_stat.get(stat_id).copied()
    }

    pub fn entry(&self, index: usize) -> &TranslationEntry {
        &self.entries[index]
    }

    pub fn contains(&self, stat_id: &str) -> bool {
        self.by_stat.contains_key(stat_id)
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Problems that would make translation ambiguous, as readable messages
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for entry in &self.entries {
            let label = entry.ids.join(", ");
            if entry.ids.is_empty() {
                problems.push("translation entry without stat ids".to_string());
            }
            for candidate in &entry.candidates {
                if !candidate.format.is_empty() && candidate.format.len() != entry.arity() {
                    problems.push(format!(
                        "{}: format has {} values but the entry has {} ids",
                        label,
                        candidate.format.len(),
                        entry.arity()
                    ));
                }
            }
        }
        problems
    }
}
