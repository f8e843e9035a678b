//! Link buff phrasing: "Linked target gains X" -> "X"

use super::Rewrite;
use regex::Regex;
use std::sync::LazyLock;

static FIRE_FROM_LIFE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Linked target gains Added Fire Damage equal to (\d+(?:\.\d+)?)% of your maximum Life$")
        .expect("link fire damage pattern")
});
/// Subject plus verb; "takes" lines turn into "<rest> taken", other verbs go away
static LINKED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Linked targets? (?:(takes?)|gains?|has|have|deals?|is|are) (.*)$")
        .expect("link subject pattern")
});

pub fn rewrite(line: &str, maximum_life: i64) -> Rewrite {
    if let Some(caps) = FIRE_FROM_LIFE.captures(line) {
        return match caps[1].parse::<f64>() {
            Ok(percent) => {
                let added = (maximum_life as f64 * percent / 100.0).trunc() as i64;
                Rewrite::line(format!("Adds {} to {} Fire Damage", added, added))
            }
            Err(_) => Rewrite::Unhandled,
        };
    }

    let Some(caps) = LINKED.captures(line) else {
        return Rewrite::Unhandled;
    };
    if caps.get(1).is_some() {
        Rewrite::line(format!("{} taken", &caps[2]))
    } else {
        Rewrite::line(&caps[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_damage_from_life() {
        assert_eq!(
            rewrite(
                "Linked target gains Added Fire Damage equal to 11% of your maximum Life",
                5000
            ),
            Rewrite::line("Adds 550 to 550 Fire Damage")
        );
    }

    #[test]
    fn test_verbs_dropped() {
        assert_eq!(
            rewrite("Linked target has 22% chance to Ignite", 0),
            Rewrite::line("22% chance to Ignite")
        );
        assert_eq!(
            rewrite("Linked targets gain 10% increased Attack Speed", 0),
            Rewrite::line("10% increased Attack Speed")
        );
    }

    #[test]
    fn test_damage_taken() {
        assert_eq!(
            rewrite("Linked target takes 5% less Damage", 0),
            Rewrite::line("5% less Damage taken")
        );
    }

    #[test]
    fn test_unhandled() {
        assert_eq!(rewrite("Link lasts 2 seconds", 0), Rewrite::Unhandled);
        assert_eq!(rewrite("Linked target glows", 0), Rewrite::Unhandled);
    }
}
