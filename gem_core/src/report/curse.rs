//! Curse phrasing: effects on "Cursed enemies" become effects on nearby enemies
//!
//! Rules are tried in order and the first one that recognises a line wins.

use super::Rewrite;
use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("curse rule pattern")
}

static AILMENT_EXPIRY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"Other effects on Cursed enemies expire (\d+)% slower"));
static RESOURCE_ON_HIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Cursed enemies grant (\d+) (Life|Mana) when Hit by (Attacks|Spells)")
});
static LEECH: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)Cursed Enemies grant (.*)% (Life|Mana) Leech when Hit by (Attack|Spell)s")
});
static RESOURCE_ON_KILL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"Cursed enemies grant (\d+) (Life|Mana) when Killed"));
static HIT_MODIFIERS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"Hits (?:against|on) Cursed Enemies have (.*)"));
static INFLICTED_AILMENTS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"Ailments inflicted on Cursed Enemies (.*)"));
static DOT_TAKEN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Cursed enemies take (\d+)% increased Damage from Damage over Time effects")
});
static PROJECTILE_TAKEN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Cursed enemies take (\d+)% increased Damage from Projectile Hits")
});
static AILMENT_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(Ignite|Freeze|Shock)s? on Cursed enemies (?:have|has) (\d+)% increased Duration")
});
static CHANCE_ON_HIT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"Hits have (\d+)% chance to (.*) Cursed Enemies"));
static GENERIC: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^Cursed.*Enemies (.*)"));

/// One rewrite rule for translated curse lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurseRule {
    AilmentExpiry,
    Debilitate,
    HitsAgainstCursed,
    ResourceOnHit,
    Leech,
    ResourceOnKill,
    HitModifiers,
    InflictedAilments,
    DamageOverTimeTaken,
    ProjectileDamageTaken,
    AilmentTypeDuration,
    ElementalAilmentDuration,
    ChanceOnHit,
    Ignored,
    Generic,
}

impl CurseRule {
    /// All rules in the order they are tried
    pub fn all() -> &'static [CurseRule] {
        &[
            CurseRule::AilmentExpiry,
            CurseRule::Debilitate,
            CurseRule::HitsAgainstCursed,
            CurseRule::ResourceOnHit,
            CurseRule::Leech,
            CurseRule::ResourceOnKill,
            CurseRule::HitModifiers,
            CurseRule::InflictedAilments,
            CurseRule::DamageOverTimeTaken,
            CurseRule::ProjectileDamageTaken,
            CurseRule::AilmentTypeDuration,
            CurseRule::ElementalAilmentDuration,
            CurseRule::ChanceOnHit,
            CurseRule::Ignored,
            CurseRule::Generic,
        ]
    }

    /// Rewrite `line` if this rule recognises it
    pub fn apply(self, line: &str) -> Option<Rewrite> {
        match self {
            CurseRule::AilmentExpiry => {
                let caps = AILMENT_EXPIRY.captures(line)?;
                // ailments are the only "other effects" that matter
                Some(Rewrite::line(format!("{}% more Duration of Ailments", &caps[1])))
            }
            CurseRule::Debilitate => line.contains("Cursed Enemies are Debilitated").then(|| {
                Rewrite::Lines(vec![
                    "Nearby Enemies deal 10% less damage".to_string(),
                    "Nearby Enemies have 20% less movement speed.".to_string(),
                ])
            }),
            CurseRule::HitsAgainstCursed => line
                .contains("to Hits against Cursed Enemies")
                .then(|| Rewrite::line(line.replace(" against Cursed Enemies", ""))),
            CurseRule::ResourceOnHit => {
                let caps = RESOURCE_ON_HIT.captures(line)?;
                Some(Rewrite::line(format!(
                    "+{} {} gained for each Enemy hit by your {}",
                    &caps[1], &caps[2], &caps[3]
                )))
            }
            CurseRule::Leech => {
                let caps = LEECH.captures(line)?;
                Some(Rewrite::line(format!(
                    "{}% of {} Damage leeched as {}",
                    &caps[1], &caps[3], &caps[2]
                )))
            }
            CurseRule::ResourceOnKill => {
                let caps = RESOURCE_ON_KILL.captures(line)?;
                Some(Rewrite::line(format!("+{} {} gained on kill", &caps[1], &caps[2])))
            }
            CurseRule::HitModifiers => {
                let caps = HIT_MODIFIERS.captures(line)?;
                Some(Rewrite::line(&caps[1]))
            }
            CurseRule::InflictedAilments => {
                let caps = INFLICTED_AILMENTS.captures(line)?;
                Some(Rewrite::line(format!("Damaging Ailments {}", &caps[1])))
            }
            CurseRule::DamageOverTimeTaken => {
                let caps = DOT_TAKEN.captures(line)?;
                Some(Rewrite::line(format!(
                    "Nearby Enemies have {}% increased Damage over Time taken",
                    &caps[1]
                )))
            }
            CurseRule::ProjectileDamageTaken => {
                let caps = PROJECTILE_TAKEN.captures(line)?;
                Some(Rewrite::line(format!(
                    "Nearby Enemies take {}% increased Projectile Damage",
                    &caps[1]
                )))
            }
            CurseRule::AilmentTypeDuration => {
                let caps = AILMENT_DURATION.captures(line)?;
                Some(Rewrite::line(format!(
                    "{}% increased {} Duration on Enemies",
                    &caps[2], &caps[1]
                )))
            }
            CurseRule::ElementalAilmentDuration => line
                .contains("increased Duration of Elemental Ailments on Cursed enemies")
                .then(|| Rewrite::line(line.replace(" on Cursed enemies", ""))),
            CurseRule::ChanceOnHit => {
                let caps = CHANCE_ON_HIT.captures(line)?;
                Some(Rewrite::line(format!(
                    "{}% Chance to {} Enemies on Hit",
                    &caps[1], &caps[2]
                )))
            }
            CurseRule::Ignored => {
                // no counterpart in the receiving calculator
                let lower = line.to_lowercase();
                ["split", "charge", "overkill"]
                    .iter()
                    .any(|word| lower.contains(word))
                    .then_some(Rewrite::Skip)
            }
            CurseRule::Generic => {
                let caps = GENERIC.captures(line)?;
                Some(Rewrite::line(format!("Nearby Enemies {}", &caps[1])))
            }
        }
    }
}

/// Rewrite a translated curse line with the first matching rule
pub fn rewrite(line: &str) -> Rewrite {
    CurseRule::all()
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or(Rewrite::Unhandled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> String {
        match rewrite(line) {
            Rewrite::Lines(lines) if lines.len() == 1 => lines[0].clone(),
            other => panic!("expected one line for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_generic_cursed_enemies() {
        assert_eq!(
            one("Cursed enemies have -23% to Chaos Resistance"),
            "Nearby Enemies have -23% to Chaos Resistance"
        );
        assert_eq!(
            one("Cursed Rare or Unique Enemies take 10% increased Damage"),
            "Nearby Enemies take 10% increased Damage"
        );
    }

    #[test]
    fn test_ailment_expiry() {
        assert_eq!(
            one("Other effects on Cursed enemies expire 30% slower"),
            "30% more Duration of Ailments"
        );
    }

    #[test]
    fn test_debilitate_expands() {
        assert_eq!(
            rewrite("Cursed Enemies are Debilitated"),
            Rewrite::Lines(vec![
                "Nearby Enemies deal 10% less damage".to_string(),
                "Nearby Enemies have 20% less movement speed.".to_string(),
            ])
        );
    }

    #[test]
    fn test_hits_against_cursed() {
        assert_eq!(
            one("+50% to Critical Strike Multiplier to Hits against Cursed Enemies"),
            "+50% to Critical Strike Multiplier to Hits"
        );
    }

    #[test]
    fn test_resource_rules() {
        assert_eq!(
            one("Cursed enemies grant 30 Life when Hit by Attacks"),
            "+30 Life gained for each Enemy hit by your Attacks"
        );
        assert_eq!(
            one("Cursed Enemies grant 0.5% Mana Leech when Hit by Spells"),
            "0.5% of Spell Damage leeched as Mana"
        );
        assert_eq!(one("Cursed enemies grant 40 Mana when Killed"), "+40 Mana gained on kill");
    }

    #[test]
    fn test_hit_modifiers_and_ailments() {
        assert_eq!(
            one("Hits against Cursed Enemies have 25% chance to Blind"),
            "25% chance to Blind"
        );
        assert_eq!(
            one("Ailments inflicted on Cursed Enemies deal 20% more Damage"),
            "Damaging Ailments deal 20% more Damage"
        );
    }

    #[test]
    fn test_damage_taken_rules() {
        assert_eq!(
            one("Cursed enemies take 24% increased Damage from Damage over Time effects"),
            "Nearby Enemies have 24% increased Damage over Time taken"
        );
        assert_eq!(
            one("Cursed enemies take 25% increased Damage from Projectile Hits"),
            "Nearby Enemies take 25% increased Projectile Damage"
        );
    }

    #[test]
    fn test_ailment_durations() {
        assert_eq!(
            one("Shocks on Cursed enemies have 25% increased Duration"),
            "25% increased Shock Duration on Enemies"
        );
        assert_eq!(
            one("Freeze on Cursed enemies has 10% increased Duration"),
            "10% increased Freeze Duration on Enemies"
        );
        assert_eq!(
            one("15% increased Duration of Elemental Ailments on Cursed enemies"),
            "15% increased Duration of Elemental Ailments"
        );
    }

    #[test]
    fn test_chance_on_hit() {
        assert_eq!(
            one("Hits have 20% chance to Blind Cursed Enemies"),
            "20% Chance to Blind Enemies on Hit"
        );
    }

    #[test]
    fn test_chance_on_hit_takes_longest_effect() {
        assert_eq!(
            one("Hits have 10% chance to Hinder Cursed Enemies near Cursed Enemies"),
            "10% Chance to Hinder Cursed Enemies near Enemies on Hit"
        );
    }

    #[test]
    fn test_case_sensitive_rules_fall_through() {
        // lowercase "hits" is not the hit-modifier phrasing
        assert_eq!(rewrite("hits against Cursed Enemies have 5% chance to Blind"), Rewrite::Unhandled);
        assert_eq!(
            one("cursed enemies grant 1% life leech when hit by attacks"),
            "1% of attack Damage leeched as life"
        );
    }

    #[test]
    fn test_ignored_and_unhandled() {
        assert_eq!(
            rewrite("Cursed enemies grant an Endurance Charge when Killed"),
            Rewrite::Skip
        );
        assert_eq!(rewrite("Your skills deal no damage"), Rewrite::Unhandled);
    }

    #[test]
    fn test_rule_order_is_stable() {
        assert_eq!(CurseRule::all().len(), 15);
        assert_eq!(CurseRule::all()[0], CurseRule::AilmentExpiry);
        assert_eq!(CurseRule::all()[14], CurseRule::Generic);
    }
}
