//! Aura phrasing: "You and nearby Allies have X" -> "X"

use super::Rewrite;
use regex::Regex;
use std::sync::LazyLock;

static ALLIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you and nearby (?:non-minion )?allies(?: deal| have| gain| are|) (.*)")
        .expect("aura subject pattern")
});
static POSSESSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nearby allies' (.*)").expect("aura possessive pattern"));
static GRANTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Aura|Buff) grants (.*)").expect("aura grants pattern"));

pub fn rewrite(line: &str) -> Rewrite {
    if let Some(caps) = ALLIES.captures(line) {
        return Rewrite::line(&caps[1]);
    }
    if let Some(caps) = POSSESSIVE.captures(line) {
        return Rewrite::line(format!("Your {}", &caps[1]));
    }
    if let Some(caps) = GRANTS.captures(line) {
        return Rewrite::line(&caps[1]);
    }
    Rewrite::Unhandled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_and_verb_stripped() {
        assert_eq!(
            rewrite("You and nearby Allies have 62% more Armour"),
            Rewrite::line("62% more Armour")
        );
        assert_eq!(
            rewrite("You and nearby allies gain 1200 additional Evasion Rating"),
            Rewrite::line("1200 additional Evasion Rating")
        );
        assert_eq!(
            rewrite("You and nearby Allies Regenerate 1.4% of Life per second"),
            Rewrite::line("Regenerate 1.4% of Life per second")
        );
    }

    #[test]
    fn test_non_minion_allies() {
        assert_eq!(
            rewrite("You and nearby Non-Minion Allies have a 20% chance to Dodge Attack Hits"),
            Rewrite::line("a 20% chance to Dodge Attack Hits")
        );
    }

    #[test]
    fn test_possessive_allies() {
        assert_eq!(
            rewrite("Nearby Allies' Energy Shield Recharge starts 40% faster"),
            Rewrite::line("Your Energy Shield Recharge starts 40% faster")
        );
    }

    #[test]
    fn test_grants_prefix() {
        assert_eq!(
            rewrite("Aura grants 10% increased Evasion Rating"),
            Rewrite::line("10% increased Evasion Rating")
        );
        assert_eq!(rewrite("Buff grants Onslaught"), Rewrite::line("Onslaught"));
    }

    #[test]
    fn test_unknown_phrasing() {
        assert_eq!(rewrite("Enemies near you are Blinded"), Rewrite::Unhandled);
    }
}
