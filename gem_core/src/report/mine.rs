//! Mine aura phrasing: per-mine values multiplied out to the mine limit

use super::Rewrite;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static EACH_MINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Each Mine (?:applies )?(.*), up to a maximum of (.*)$")
        .expect("mine aura pattern")
});
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern"));

/// "Each Mine applies 3% chance ..., up to a maximum of 100%" with a limit of
/// 22 becomes "66% chance ..."
///
/// The n-th number before the cap phrase is paired with the n-th number after
/// it (or the last one when there are fewer caps).
pub fn rewrite(line: &str, mine_limit: i64) -> Rewrite {
    let Some(caps) = EACH_MINE.captures(line) else {
        return Rewrite::Unhandled;
    };
    let limits: Vec<f64> = NUMBER
        .find_iter(&caps[2])
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let mut index = 0;
    let body = NUMBER.replace_all(&caps[1], |number: &Captures| {
        let value: f64 = number[0].parse().unwrap_or(0.0);
        let total = value * mine_limit as f64;
        let capped = match limits.get(index).or(limits.last()) {
            Some(limit) => total.min(*limit),
            None => total,
        };
        index += 1;
        format_number(capped)
    });
    Rewrite::line(body)
}

fn format_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
