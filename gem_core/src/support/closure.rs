//! Fixed-point closure of the tags a skill gains from its supports

use super::SupportGem;
use crate::types::TagSet;

/// Outcome of closing a skill's tags over its linked supports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    /// Skill tags including everything added by eligible supports
    pub tags: TagSet,
    /// Indices of the supports eligible under the final tags, in input order
    pub applied: Vec<usize>,
    /// Number of passes until the tag set stopped growing
    pub passes: usize,
}

/// Union the added types of every eligible support into `tags` until stable
///
/// Tags only ever grow and come from a finite set, so this terminates. A
/// support that stops being eligible after another one adds an excluded tag
/// is not applied, but the tags it added earlier stay.
pub fn close_tags(tags: &TagSet, skill_socketed: bool, supports: &[&SupportGem]) -> Closure {
    let mut current = tags.clone();
    let mut passes = 0;

    loop {
        passes += 1;
        let eligible: Vec<usize> = eligible(&current, skill_socketed, supports);
        let mut next = current.clone();
        for &index in &eligible {
            next.extend(supports[index].added_types().iter().cloned());
        }

        if next == current {
            return Closure {
                tags: current,
                applied: eligible,
                passes,
            };
        }
        current = next;
    }
}

fn eligible(tags: &TagSet, skill_socketed: bool, supports: &[&SupportGem]) -> Vec<usize> {
    supports
        .iter()
        .enumerate()
        .filter(|(_, support)| support.can_support(tags, skill_socketed))
        .map(|(index, _)| index)
        .collect()
}
