//! Units vocabulary.
//!
//! Every unit has one canonical name, the spellings recipes use for it, and a
//! factor to the base unit of its dimension (gram, milliliter, centimeter).

use std::sync::LazyLock;

use hashbrown::HashMap;

use crate::model::Dimensionality;

/// A unit known to the parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub name: &'static str,
    pub dimensionality: Dimensionality,
    /// Multiply by this to get the dimension's base unit.
    pub factor: f64,
    pub aliases: &'static [&'static str],
}

const fn unit(
    name: &'static str,
    dimensionality: Dimensionality,
    factor: f64,
    aliases: &'static [&'static str],
) -> UnitDef {
    UnitDef { name, dimensionality, factor, aliases }
}

use Dimensionality::{Length, Mass, Volume};

pub const UNITS: &[UnitDef] = &[
    // Mass (gram)
    unit("gram", Mass, 1.0, &["g", "gr", "gm", "gms", "gram", "grams", "gramme", "grammes"]),
    unit("kilogram", Mass, 1000.0, &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"]),
    unit("milligram", Mass, 0.001, &["mg", "milligram", "milligrams"]),
    unit("ounce", Mass, 28.349523125, &["oz", "ozs", "ounce", "ounces"]),
    unit("pound", Mass, 453.59237, &["lb", "lbs", "pound", "pounds"]),
    // Volume (milliliter)
    unit("milliliter", Volume, 1.0, &["ml", "mls", "milliliter", "milliliters", "millilitre", "millilitres"]),
    unit("deciliter", Volume, 100.0, &["dl", "deciliter", "deciliters", "decilitre", "decilitres"]),
    unit("liter", Volume, 1000.0, &["l", "liter", "liters", "litre", "litres"]),
    unit("teaspoon", Volume, 4.92892159375, &["tsp", "tsps", "teaspoon", "teaspoons"]),
    unit("tablespoon", Volume, 14.78676478125, &["tbsp", "tbsps", "tbs", "tbl", "tblsp", "tablespoon", "tablespoons"]),
    unit("fluid_ounce", Volume, 29.5735295625, &["floz", "fluid_ounce", "fluid_ounces"]),
    unit("cup", Volume, 236.5882365, &["cup", "cups"]),
    unit("pint", Volume, 473.176473, &["pt", "pts", "pint", "pints"]),
    unit("quart", Volume, 946.352946, &["qt", "qts", "quart", "quarts"]),
    unit("gallon", Volume, 3785.411784, &["gal", "gals", "gallon", "gallons"]),
    // Length (centimeter)
    unit("millimeter", Length, 0.1, &["mm", "millimeter", "millimeters", "millimetre", "millimetres"]),
    unit("centimeter", Length, 1.0, &["cm", "cms", "centimeter", "centimeters", "centimetre", "centimetres"]),
    unit("inch", Length, 2.54, &["inch", "inches"]),
];

static BY_ALIAS: LazyLock<HashMap<&'static str, &'static UnitDef>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for def in UNITS {
        for alias in def.aliases {
            map.insert(*alias, def);
        }
    }
    map
});

/// Resolve a unit word ("Tbsp.", "cups,", "g") to its definition.
pub fn lookup(word: &str) -> Option<&'static UnitDef> {
    let cleaned = word.trim().trim_end_matches(['.', ',', ';']).to_lowercase();
    if cleaned.is_empty() {
        return None;
    }
    BY_ALIAS.get(cleaned.as_str()).copied()
}
