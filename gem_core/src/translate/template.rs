//! Placeholder substitution for translation strings

/// Replace `{N}` (and `{N:...}`) placeholders with `values[N]`
///
/// Braces that do not hold a placeholder index are copied through, as are
/// placeholders without a value.
pub fn fill(template: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let inner = &after[..close];
        let index = inner.split(':').next().unwrap_or_default();
        match index.parse::<usize>().ok().and_then(|i| values.get(i)) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fill_positions() {
        let text = fill("Adds {0} to {1} Fire Damage", &values(&["10", "20"]));
        assert_eq!(text, "Adds 10 to 20 Fire Damage");
    }

    #[test]
    fn test_fill_with_sign_format() {
        let text = fill("{0:+d}% to Chaos Resistance", &values(&["+5"]));
        assert_eq!(text, "+5% to Chaos Resistance");
    }

    #[test]
    fn test_fill_reordered_and_missing() {
        assert_eq!(fill("{1} then {0}", &values(&["a", "b"])), "b then a");
        assert_eq!(fill("{2} stays", &values(&["a"])), "{2} stays");
        assert_eq!(fill("open { brace", &values(&[])), "open { brace");
    }
}
