//! Effect translation: raw stat values to formatted English lines

mod scaling;
mod template;

pub use scaling::{scale_value, ScaledValue};
pub use template::fill;

use crate::config::{TranslationEntry, TranslationTable, ValueFormat};
use crate::error::EngineError;
use crate::types::RawStat;

/// Translate a stat stream into lines, scaling every value by `scaling` %
///
/// Stats missing from `table` are skipped. Entries consuming several stats
/// wait until their last stat is seen; an entry left incomplete (the next
/// stat belongs elsewhere, or the stream ends) fills the gaps with zero.
pub fn translate(
    stats: &[RawStat],
    scaling: i64,
    table: &TranslationTable,
) -> Result<Vec<String>, EngineError> {
    let mut lines = Vec::new();
    let mut pending: Option<Pending> = None;

    for stat in stats {
        let Some((index, position)) = table.lookup(&stat.id) else {
            continue;
        };

        if let Some(open) = pending.take() {
            if open.index == index && open.values[position].is_none() {
                pending = Some(open);
            } else {
                lines.extend(open.emit(table, scaling)?);
            }
        }

        let entry = table.entry(index);
        let mut current = pending
            .take()
            .unwrap_or_else(|| Pending::new(index, entry.arity()));
        current.values[position] = Some(stat.value);

        if position + 1 == entry.arity() || current.is_complete() {
            lines.extend(current.emit(table, scaling)?);
        } else {
            pending = Some(current);
        }
    }

    if let Some(open) = pending {
        lines.extend(open.emit(table, scaling)?);
    }
    Ok(lines)
}

/// Values collected so far for one multi-stat entry
struct Pending {
    index: usize,
    values: Vec<Option<i64>>,
}

impl Pending {
    fn new(index: usize, arity: usize) -> Self {
        Pending {
            index,
            values: vec![None; arity],
        }
    }

    fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    fn emit(self, table: &TranslationTable, scaling: i64) -> Result<Option<String>, EngineError> {
        let values: Vec<i64> = self.values.iter().map(|v| v.unwrap_or(0)).collect();
        translate_entry(table.entry(self.index), &values, scaling)
    }
}

/// Format one entry's values with the first candidate accepting them
///
/// All-zero values without a candidate are dropped; anything else without a
/// candidate means the translation data is incomplete.
pub fn translate_entry(
    entry: &TranslationEntry,
    values: &[i64],
    scaling: i64,
) -> Result<Option<String>, EngineError> {
    let Some(candidate) = entry.select(values) else {
        return match values.iter().position(|v| *v != 0) {
            None => Ok(None),
            Some(i) => Err(EngineError::Untranslatable {
                stat_id: entry.ids.get(i).cloned().unwrap_or_default(),
                value: values[i],
            }),
        };
    };

    let rendered: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, value)| match candidate.value_format(i) {
            ValueFormat::Ignore => String::new(),
            format => scale_value(*value, scaling, candidate.handlers(i)).render(format),
        })
        .collect();
    Ok(Some(fill(&candidate.string, &rendered)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r##"[
        { "ids": ["armour_+%_final"],
          "English": [
            { "condition": [{ "min": 1 }], "format": ["#"], "index_handlers": [[]],
              "string": "You and nearby Allies have {0}% more Armour" }
          ] },
        { "ids": ["chaos_resistance"],
          "English": [
            { "condition": [{ "max": -1 }], "format": ["#"], "index_handlers": [[]],
              "string": "Cursed enemies have {0}% to Chaos Resistance" },
            { "condition": [{ "min": 1 }], "format": ["+#"], "index_handlers": [[]],
              "string": "Cursed enemies have {0}% to Chaos Resistance" }
          ] },
        { "ids": ["minimum_added_fire", "maximum_added_fire"],
          "English": [
            { "condition": [{}, {}], "format": ["#", "#"], "index_handlers": [[], []],
              "string": "You and nearby Allies deal {0} to {1} additional Fire Damage" }
          ] },
        { "ids": ["life_regen_per_minute"],
          "English": [
            { "condition": [{}], "format": ["#"], "index_handlers": [["per_minute_to_per_second"]],
              "string": "You and nearby Allies Regenerate {0} Life per second" }
          ] }
    ]"##;

    fn table() -> TranslationTable {
        serde_json::from_str(TABLE).unwrap()
    }

    #[test]
    fn test_single_value_scaled() {
        let lines = translate(&[RawStat::new("armour_+%_final", 35)], 78, &table()).unwrap();
        assert_eq!(lines, vec!["You and nearby Allies have 62% more Armour"]);
    }

    #[test]
    fn test_unknown_stats_skipped() {
        let stats = [RawStat::new("base_deal_no_damage", 1), RawStat::new("chaos_resistance", 10)];
        let lines = translate(&stats, 0, &table()).unwrap();
        assert_eq!(lines, vec!["Cursed enemies have +10% to Chaos Resistance"]);
    }

    #[test]
    fn test_zero_without_candidate_omitted() {
        let lines = translate(&[RawStat::new("chaos_resistance", 0)], 0, &table()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_nonzero_without_candidate_fails() {
        let err = translate(&[RawStat::new("armour_+%_final", -3)], 0, &table()).unwrap_err();
        assert_eq!(
            err,
            EngineError::Untranslatable {
                stat_id: "armour_+%_final".to_string(),
                value: -3
            }
        );
    }

    #[test]
    fn test_pair_buffered_until_last_id() {
        let stats = [
            RawStat::new("minimum_added_fire", 10),
            RawStat::new("maximum_added_fire", 20),
            RawStat::new("armour_+%_final", 10),
        ];
        let lines = translate(&stats, 50, &table()).unwrap();
        assert_eq!(
            lines,
            vec![
                "You and nearby Allies deal 15 to 30 additional Fire Damage",
                "You and nearby Allies have 15% more Armour",
            ]
        );
    }

    #[test]
    fn test_incomplete_pair_flushed_with_zero() {
        let stats = [
            RawStat::new("minimum_added_fire", 10),
            RawStat::new("armour_+%_final", 10),
        ];
        let lines = translate(&stats, 0, &table()).unwrap();
        assert_eq!(
            lines,
            vec![
                "You and nearby Allies deal 10 to 0 additional Fire Damage",
                "You and nearby Allies have 10% more Armour",
            ]
        );
    }

    #[test]
    fn test_handler_applied_before_scaling() {
        let lines = translate(&[RawStat::new("life_regen_per_minute", 600)], 20, &table()).unwrap();
        assert_eq!(lines, vec!["You and nearby Allies Regenerate 12.0 Life per second"]);
    }
}
