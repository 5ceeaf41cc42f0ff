//! Numeral grammar: mixed fractions, fractions, decimals, integers.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Error, Result};

/// Vulgar fraction characters and their ASCII spelling.
const VULGAR_FRACTIONS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Alternatives in priority order. Group names are prefixed so the pattern
/// can appear more than once in one regex.
pub(crate) fn pattern(prefix: &str) -> String {
    format!(
        r"(?:(?P<{p}mi>\d+)(?: | and |-)(?P<{p}mn>\d+)/(?P<{p}md>\d+)|(?P<{p}fn>\d+)/(?P<{p}fd>\d+)|(?P<{p}dec>\d+\.\d+)|(?P<{p}int>\d+))",
        p = prefix
    )
}

static LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{}", pattern("n_"))).unwrap());

/// Replace vulgar fraction characters with ASCII fractions, separated from a
/// preceding integer by one space: `"2½"` and `"2 ½"` both become `"2 1/2"`.
pub fn normalize_fractions(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        match VULGAR_FRACTIONS.iter().find(|(c, _)| *c == ch) {
            Some((_, ascii)) => {
                if out.ends_with(char::is_whitespace) {
                    out.pop();
                }
                out.push(' ');
                out.push_str(ascii);
            }
            None => out.push(ch),
        }
    }
    out.trim().to_string()
}

/// Evaluate the numeral captured under `prefix` in `caps`.
///
/// Returns `Ok(None)` when no alternative under that prefix matched, or when
/// the digits overflow to a non-finite value.
pub(crate) fn value(caps: &Captures<'_>, prefix: &str, input: &str) -> Result<Option<f64>> {
    Ok(raw_value(caps, prefix, input)?.filter(|v| v.is_finite()))
}

fn raw_value(caps: &Captures<'_>, prefix: &str, input: &str) -> Result<Option<f64>> {
    let group = |name: &str| caps.name(&format!("{prefix}{name}")).map(|m| m.as_str());

    if let (Some(whole), Some(num), Some(den)) = (group("mi"), group("mn"), group("md")) {
        return Ok(Some(number(whole) + fraction(num, den, input)?));
    }
    if let (Some(num), Some(den)) = (group("fn"), group("fd")) {
        return Ok(Some(fraction(num, den, input)?));
    }
    if let Some(dec) = group("dec") {
        return Ok(Some(number(dec)));
    }
    Ok(group("int").map(number))
}

/// Parse a numeral at the start of `text`, returning its value and the
/// unconsumed remainder.
pub fn leading(text: &str) -> Result<Option<(f64, &str)>> {
    let Some(caps) = LEADING.captures(text) else {
        return Ok(None);
    };
    let end = caps.get(0).map_or(0, |m| m.end());
    Ok(value(&caps, "n_", text)?.map(|v| (v, &text[end..])))
}

fn number(digits: &str) -> f64 {
    digits.parse().unwrap_or(0.0)
}

fn fraction(num: &str, den: &str, input: &str) -> Result<f64> {
    let d = number(den);
    if d == 0.0 {
        return Err(Error::MalformedQuantity {
            input: input.to_string(),
            reason: format!("zero denominator in {num}/{den}"),
        });
    }
    Ok(number(num) / d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeral_priority() {
        assert_eq!(leading("5 cups").unwrap(), Some((5.0, " cups")));
        assert_eq!(leading("3.5").unwrap(), Some((3.5, "")));
        assert_eq!(leading("1/4").unwrap(), Some((0.25, "")));
        assert_eq!(leading("2 1/4 tsp").unwrap(), Some((2.25, " tsp")));
        assert_eq!(leading("1 and 1/2").unwrap(), Some((1.5, "")));
        assert_eq!(leading("2-1/2").unwrap(), Some((2.5, "")));
    }

    #[test]
    fn test_range_is_not_mixed_fraction() {
        assert_eq!(leading("1-2 cups").unwrap(), Some((1.0, "-2 cups")));
    }

    #[test]
    fn test_no_numeral() {
        assert_eq!(leading("salt to taste").unwrap(), None);
    }

    #[test]
    fn test_zero_denominator() {
        assert!(matches!(leading("3/0 cup"), Err(Error::MalformedQuantity { .. })));
        assert!(matches!(leading("1 1/0"), Err(Error::MalformedQuantity { .. })));
    }

    #[test]
    fn test_overflowing_numeral_is_not_a_numeral() {
        let digits = "9".repeat(400);
        assert_eq!(leading(&digits).unwrap(), None);
        assert_eq!(leading(&format!("{digits}/3")).unwrap(), None);
        assert_eq!(leading(&format!("1/{digits}")).unwrap().map(|(v, _)| v.is_finite()), Some(true));
    }

    #[test]
    fn test_normalize_fractions() {
        assert_eq!(normalize_fractions("¾ cup almonds"), "3/4 cup almonds");
        assert_eq!(normalize_fractions("2½ cups"), "2 1/2 cups");
        assert_eq!(normalize_fractions("1- 1 ½ cups"), "1- 1 1/2 cups");
        assert_eq!(normalize_fractions("2 and ½ cups"), "2 and 1/2 cups");
    }
}
