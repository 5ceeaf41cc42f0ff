//! Ingredient: a parsed amount plus the lemmas used for reference matching.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Quantity;
use crate::quantity;
use crate::Result;

/// Words that never carry meaning for reference matching.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "and", "or", "to", "for", "with", "in", "into", "at", "on", "plus",
    "about", "more", "as", "such", "if", "your", "each",
];

/// Opaque ingredient identifier. Equal to the id of the ingredient's node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub u32);

impl std::fmt::Display for IngredientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recipe ingredient. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub quantity: Quantity,
    /// Lowercased, trimmed name.
    pub name: String,
    pub notes: Option<String>,
    /// Significant lemmas of `name`, in name order, without duplicates.
    pub lemmas: SmallVec<[String; 4]>,
}

impl Ingredient {
    pub fn new(id: IngredientId, quantity: Quantity, name: &str) -> Self {
        let name = name.trim().to_lowercase();
        let lemmas = significant_lemmas(&name);
        Self {
            id,
            quantity,
            name,
            notes: None,
            lemmas,
        }
    }

    /// Parse a complete ingredient phrase such as `"2 cups (226g) flour"`.
    pub fn parse(id: IngredientId, phrase: &str) -> Result<Self> {
        let parsed = quantity::parse(phrase)?;
        Ok(Self::new(id, parsed.quantity, &parsed.name))
    }

    /// Build an ingredient from separately entered fields.
    ///
    /// An unreadable amount gives a zero quantity. A unit word missing from
    /// the vocabulary is kept as the first word of the name.
    pub fn from_components(
        id: IngredientId,
        amount: Option<&str>,
        unit: Option<&str>,
        name: &str,
        notes: Option<&str>,
    ) -> Result<Self> {
        let magnitude = match amount {
            Some(text) => quantity::parse_amount(text)?.unwrap_or(0.0),
            None => 0.0,
        };
        let (quantity, name) = match unit.map(str::trim).filter(|u| !u.is_empty()) {
            Some(word) => {
                let q = super::Quantity::with_unit_word(magnitude, word);
                if q.is_dimensionless() {
                    (q, format!("{word} {name}"))
                } else {
                    (q, name.to_string())
                }
            }
            None => (super::Quantity::dimensionless(magnitude), name.to_string()),
        };
        Ok(Self::new(id, quantity, &name).with_notes(notes))
    }

    pub fn with_notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty());
        self
    }

    /// Replace the derived lemmas with caller-supplied ones.
    pub fn with_lemmas(mut self, lemmas: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let mut out: SmallVec<[String; 4]> = SmallVec::new();
        for lemma in lemmas {
            let lemma = normalize_lemma(lemma.as_ref());
            if !lemma.is_empty() && !out.contains(&lemma) {
                out.push(lemma);
            }
        }
        self.lemmas = out;
        self
    }

    /// Number of distinct reference lemmas that occur among this
    /// ingredient's lemmas. Reference lemmas must already be normalized.
    pub fn matching_words(&self, reference: &[String]) -> usize {
        let mut seen: SmallVec<[&str; 4]> = SmallVec::new();
        for lemma in reference {
            if !seen.contains(&lemma.as_str()) && self.lemmas.iter().any(|l| l == lemma) {
                seen.push(lemma);
            }
        }
        seen.len()
    }

    /// The head word of the name, used for similarity comparisons.
    ///
    /// English ingredient names put the head noun last, before any
    /// comma-separated preparation note ("eggs, separated").
    pub fn base_term(&self) -> Option<String> {
        let head = self.name.split(',').next().unwrap_or_default();
        significant_lemmas(head).into_iter().last()
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Split a name into normalized lemmas, dropping stopwords, numbers and
/// punctuation.
pub fn significant_lemmas(name: &str) -> SmallVec<[String; 4]> {
    let mut out: SmallVec<[String; 4]> = SmallVec::new();
    for word in name.split(|c: char| !(c.is_alphanumeric() || c == '\'')) {
        let word = word.trim_matches('\'');
        if word.is_empty() || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let lower = word.to_lowercase();
        if STOPWORDS.contains(&lower.as_str()) {
            continue;
        }
        let lemma = normalize_lemma(&lower);
        if !out.contains(&lemma) {
            out.push(lemma);
        }
    }
    out
}

/// Lowercase and fold regular English plurals.
///
/// Applied to both annotation lemmas and ingredient words, so the two sides
/// agree even where the folding is not a true lemma.
pub fn normalize_lemma(word: &str) -> String {
    let lower = word.trim().to_lowercase();
    if lower.len() <= 3 {
        return lower;
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["ches", "shes", "xes", "sses", "oes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return lower;
    }
    match lower.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dimensionality;

    #[test]
    fn test_name_is_lowercased_and_trimmed() {
        let ing = Ingredient::new(IngredientId(0), Quantity::zero(), "  Heavy Cream ");
        assert_eq!(ing.name, "heavy cream");
        assert_eq!(ing.lemmas.as_slice(), ["heavy", "cream"]);
    }

    #[test]
    fn test_plural_folding() {
        assert_eq!(normalize_lemma("cheeses"), "cheese");
        assert_eq!(normalize_lemma("berries"), "berry");
        assert_eq!(normalize_lemma("tomatoes"), "tomato");
        assert_eq!(normalize_lemma("peaches"), "peach");
        assert_eq!(normalize_lemma("glass"), "glass");
        assert_eq!(normalize_lemma("asparagus"), "asparagus");
        assert_eq!(normalize_lemma("Marshmallows"), "marshmallow");
    }

    #[test]
    fn test_significant_lemmas_skip_stopwords_and_numbers() {
        let lemmas = significant_lemmas("1 can of the diced tomatoes, drained");
        assert_eq!(lemmas.as_slice(), ["can", "diced", "tomato", "drained"]);
    }

    #[test]
    fn test_matching_words_counts_distinct_hits() {
        let ing = Ingredient::new(IngredientId(0), Quantity::zero(), "poultry seasoning");
        let reference = vec!["poultry".to_string(), "seasoning".to_string(), "poultry".to_string()];
        assert_eq!(ing.matching_words(&reference), 2);
        assert_eq!(ing.matching_words(&["salt".to_string()]), 0);
    }

    #[test]
    fn test_base_term_ignores_preparation_note() {
        let ing = Ingredient::new(IngredientId(0), Quantity::zero(), "large eggs, separated");
        assert_eq!(ing.base_term().as_deref(), Some("egg"));
    }

    #[test]
    fn test_from_components_known_unit() {
        let ing = Ingredient::from_components(
            IngredientId(3),
            Some("1 1/2"),
            Some("cups"),
            "Macaroni Pasta",
            Some(" cooked "),
        )
        .unwrap();
        assert_eq!(ing.quantity.magnitude, 1.5);
        assert_eq!(ing.quantity.unit.as_deref(), Some("cup"));
        assert_eq!(ing.name, "macaroni pasta");
        assert_eq!(ing.notes.as_deref(), Some("cooked"));
    }

    #[test]
    fn test_from_components_unknown_unit_joins_name() {
        let ing =
            Ingredient::from_components(IngredientId(0), Some("2"), Some("cloves"), "garlic", None)
                .unwrap();
        assert_eq!(ing.quantity.dimensionality, Dimensionality::Dimensionless);
        assert_eq!(ing.name, "cloves garlic");
    }

    #[test]
    fn test_from_components_unreadable_amount_is_zero() {
        let ing =
            Ingredient::from_components(IngredientId(0), Some("a pinch"), None, "salt", None)
                .unwrap();
        assert_eq!(ing.quantity.magnitude, 0.0);
    }

    #[test]
    fn test_with_lemmas_overrides() {
        let ing = Ingredient::new(IngredientId(0), Quantity::zero(), "scallions")
            .with_lemmas(["Green", "onions", "green"]);
        assert_eq!(ing.lemmas.as_slice(), ["green", "onion"]);
    }
}
