//! End-to-end tests for ingredient phrase parsing.
//!
//! Each test goes through `Ingredient::parse` / `Ingredient::from_components`
//! so the quantity grammar, the units vocabulary and name normalisation are
//! exercised together.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use recipe_graph::quantity;
use recipe_graph::{Dimensionality, Error, Ingredient, IngredientId, Quantity};

fn ingredient(phrase: &str) -> Ingredient {
    Ingredient::parse(IngredientId(0), phrase).unwrap()
}

// ============================================================================
// 1. Formats named in the parser's priority list
// ============================================================================

#[test]
fn test_range_takes_the_mean() {
    let flour = ingredient("1-2 cups flour");
    assert_eq!(flour.quantity.magnitude, 1.5);
    assert_eq!(flour.quantity.unit.as_deref(), Some("cup"));
    assert_eq!(flour.name, "flour");
}

#[test]
fn test_alternate_prefers_mass() {
    let flour = ingredient("2 cups (226g) flour");
    assert_eq!(
        flour.quantity,
        Quantity {
            magnitude: 226.0,
            unit: Some("gram".into()),
            dimensionality: Dimensionality::Mass,
        }
    );
    assert_eq!(flour.name, "flour");
}

#[test]
fn test_alternate_without_mass_keeps_first() {
    let noodles = ingredient("5 cups (1 package) noodles");
    assert_eq!(noodles.quantity.magnitude, 5.0);
    assert_eq!(noodles.quantity.unit.as_deref(), Some("cup"));
    assert_eq!(noodles.name, "noodles");
}

#[test]
fn test_fallback_is_zero_and_dimensionless() {
    let salt = ingredient("Salt and freshly ground pepper");
    assert_eq!(salt.quantity, Quantity::zero());
    assert_eq!(salt.name, "salt and freshly ground pepper");
    assert_eq!(salt.lemmas.as_slice(), ["salt", "freshly", "ground", "pepper"]);
}

// ============================================================================
// 2. Unit vocabulary
// ============================================================================

#[test]
fn test_abbreviated_units_with_periods() {
    let yeast = ingredient("2 1/4 tsp. active dry yeast");
    assert_eq!(yeast.quantity.magnitude, 2.25);
    assert_eq!(yeast.quantity.unit.as_deref(), Some("teaspoon"));
    assert_eq!(yeast.name, "active dry yeast");
}

#[test]
fn test_unknown_unit_folds_into_name() {
    let garlic = ingredient("3 cloves garlic, minced");
    assert!(garlic.quantity.is_dimensionless());
    assert_eq!(garlic.quantity.magnitude, 3.0);
    assert_eq!(garlic.name, "cloves garlic, minced");
    assert_eq!(garlic.base_term().as_deref(), Some("garlic"));
}

#[test]
fn test_unicode_fraction_glued_to_integer() {
    let milk = ingredient("1½ cups whole milk");
    assert_eq!(milk.quantity.magnitude, 1.5);
    assert_eq!(milk.quantity.unit.as_deref(), Some("cup"));
}

#[test]
fn test_conversion_between_units() {
    let butter = ingredient("1 lb butter");
    let grams = butter.quantity.convert_to("g").unwrap();
    assert!((grams.magnitude - 453.59237).abs() < 1e-9);
    assert!(matches!(
        butter.quantity.convert_to("cup"),
        Err(Error::IncompatibleUnits { .. })
    ));
}

// ============================================================================
// 3. Manual entry
// ============================================================================

#[test]
fn test_from_components() {
    let sugar = Ingredient::from_components(
        IngredientId(4),
        Some("¾"),
        Some("Cup"),
        "Brown Sugar",
        Some(" packed "),
    )
    .unwrap();
    assert_eq!(sugar.id, IngredientId(4));
    assert_eq!(sugar.quantity.magnitude, 0.75);
    assert_eq!(sugar.quantity.unit.as_deref(), Some("cup"));
    assert_eq!(sugar.name, "brown sugar");
    assert_eq!(sugar.notes.as_deref(), Some("packed"));
}

#[test]
fn test_from_components_unknown_unit_and_amount() {
    let salt = Ingredient::from_components(IngredientId(0), Some("a"), Some("pinch"), "salt", None)
        .unwrap();
    assert_eq!(salt.quantity, Quantity::zero());
    assert_eq!(salt.name, "pinch salt");
    assert_eq!(salt.notes, None);
}

// ============================================================================
// 4. Errors
// ============================================================================

#[test]
fn test_zero_denominator_names_the_input() {
    let err = Ingredient::parse(IngredientId(0), "1 1/0 cups milk").unwrap_err();
    match err {
        Error::MalformedQuantity { input, .. } => assert_eq!(input, "1 1/0 cups milk"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_overflowing_amount_falls_back_to_zero() {
    let phrase = format!("{} cups flour", "9".repeat(400));
    let flour = ingredient(&phrase);
    assert_eq!(flour.quantity, Quantity::zero());
    assert_eq!(flour.name, phrase.to_lowercase());

    let recipe = recipe_graph::Recipe::from_ingredients(vec![
        flour,
        Ingredient::parse(IngredientId(1), "1 cup milk").unwrap(),
    ])
    .unwrap();
    assert_eq!(recipe.volume_shares(), vec![0.0, 1.0]);
}

// ============================================================================
// 5. Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_parse_only_fails_on_zero_denominator(text in "[0-9a-z ./()½¾-]{0,24}") {
        let result = quantity::parse(&text);
        if !text.contains("/0") {
            prop_assert!(result.is_ok(), "{text:?} failed: {result:?}");
        }
        if let Ok(parsed) = result {
            prop_assert!(parsed.quantity.magnitude >= 0.0);
            prop_assert!(parsed.quantity.magnitude.is_finite());
        }
    }

    #[test]
    fn prop_long_digit_strings_stay_finite(digits in "[1-9][0-9]{300,400}") {
        let parsed = quantity::parse(&format!("{digits} cups stock")).unwrap();
        prop_assert!(parsed.quantity.magnitude.is_finite());
    }

    #[test]
    fn prop_range_is_between_its_ends(a in 1u32..50, b in 1u32..50) {
        let parsed = quantity::parse(&format!("{a}-{b} cups stock")).unwrap();
        let (lo, hi) = (a.min(b) as f64, a.max(b) as f64);
        prop_assert!(parsed.quantity.magnitude >= lo && parsed.quantity.magnitude <= hi);
        prop_assert_eq!(parsed.quantity.unit.as_deref(), Some("cup"));
        prop_assert_eq!(parsed.name, "stock");
    }
}
