//! # Quantity Parser
//!
//! Turns an ingredient phrase into a structured amount and the remaining
//! ingredient name. Pure functions: no I/O, no state.
//!
//! Formats, in detection priority:
//!
//! | Format | Example | Result |
//! |--------|---------|--------|
//! | Alternate measurement | `2 cups (226g) flour` | mass preferred, else first |
//! | Range | `1 to 1 1/2 cups flour` | mean of both ends |
//! | Simple | `3/4 tsp baking soda` | |
//! | Fallback | `salt to taste` | zero, dimensionless, whole text is the name |
//!
//! A unit word missing from the vocabulary never blocks parsing: the amount
//! becomes dimensionless and the word stays in the name.

pub mod numeral;
pub mod units;

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Quantity;
use crate::Result;

pub use numeral::normalize_fractions;

/// Output of [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    pub quantity: Quantity,
    pub name: String,
}

/// `(B word)` following the first measurement.
static ALTERNATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*\(\s*{}\s?(?P<unit>[^\s)]+)?\s*\)(?P<rest>.*)$",
        numeral::pattern("b_")
    ))
    .unwrap()
});

/// `- B` or `to B` directly after the first numeral.
static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?:-\s?|to\s){}\s?(?P<rest>.*)$", numeral::pattern("b_"))).unwrap()
});

/// Parse an ingredient phrase.
///
/// Fails only on a zero denominator; anything else unreadable falls back to a
/// zero, dimensionless quantity.
pub fn parse(text: &str) -> Result<ParsedIngredient> {
    let normalized = normalize_fractions(text);

    let Some((a, rest)) = numeral::leading(&normalized)? else {
        tracing::warn!(phrase = text, "no leading amount, using zero quantity");
        return Ok(ParsedIngredient {
            quantity: Quantity::zero(),
            name: text.trim().to_string(),
        });
    };
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let (first, tail) = split_unit(a, rest);

    if let Some(caps) = ALTERNATE.captures(tail) {
        if let Some(b) = numeral::value(&caps, "b_", text)? {
            let second = match caps.name("unit") {
                Some(word) => Quantity::with_unit_word(b, word.as_str()),
                None => Quantity::dimensionless(b),
            };
            let name = caps.name("rest").map_or("", |m| m.as_str()).trim().to_string();
            let quantity = if second.is_mass() && !first.is_mass() { second } else { first };
            tracing::debug!(phrase = text, %quantity, "alternate measurement");
            return Ok(ParsedIngredient { quantity, name });
        }
    }

    if let Some(caps) = RANGE.captures(rest) {
        if let Some(b) = numeral::value(&caps, "b_", text)? {
            let rest_b = caps.name("rest").map_or("", |m| m.as_str());
            let (upper, name) = split_unit(b, rest_b);
            let quantity = Quantity {
                magnitude: (a + upper.magnitude) / 2.0,
                ..upper
            };
            tracing::debug!(phrase = text, %quantity, "range");
            return Ok(ParsedIngredient {
                quantity,
                name: name.trim().to_string(),
            });
        }
    }

    tracing::debug!(phrase = text, quantity = %first, "simple");
    Ok(ParsedIngredient {
        quantity: first,
        name: tail.trim().to_string(),
    })
}

/// Parse a standalone amount such as `"1 1/2"` or `"¾"`.
///
/// `Ok(None)` when the text does not start with a numeral.
pub fn parse_amount(text: &str) -> Result<Option<f64>> {
    let normalized = normalize_fractions(text);
    Ok(numeral::leading(&normalized)?.map(|(value, _)| value))
}

/// Try the first word of `rest` as a unit. On success the word is consumed;
/// otherwise the quantity is dimensionless and `rest` is returned whole.
fn split_unit(magnitude: f64, rest: &str) -> (Quantity, &str) {
    let rest = rest.trim_start();
    let (word, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let quantity = Quantity::with_unit_word(magnitude, word);
    if quantity.is_dimensionless() {
        (quantity, rest)
    } else {
        (quantity, tail)
    }
}
