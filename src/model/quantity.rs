//! Measured amount of an ingredient.

use serde::{Deserialize, Serialize};

use crate::quantity::units;
use crate::{Error, Result};

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    Mass,
    Volume,
    Length,
    Dimensionless,
}

impl std::fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dimensionality::Mass => "[mass]",
            Dimensionality::Volume => "[volume]",
            Dimensionality::Length => "[length]",
            Dimensionality::Dimensionless => "dimensionless",
        };
        f.write_str(name)
    }
}

/// A magnitude with an optional canonical unit name.
///
/// `unit` is always a canonical vocabulary name (`"cup"`, `"gram"`, ...) or
/// `None` for counts and unresolved units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Option<String>,
    pub dimensionality: Dimensionality,
}

impl Quantity {
    /// A unitless amount.
    pub fn dimensionless(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: None,
            dimensionality: Dimensionality::Dimensionless,
        }
    }

    /// The zero quantity used when no amount could be read.
    pub fn zero() -> Self {
        Self::dimensionless(0.0)
    }

    /// Build a quantity from a unit word; unknown words give a dimensionless
    /// quantity.
    pub fn with_unit_word(magnitude: f64, word: &str) -> Self {
        match units::lookup(word) {
            Some(def) => Self {
                magnitude,
                unit: Some(def.name.to_string()),
                dimensionality: def.dimensionality,
            },
            None => Self::dimensionless(magnitude),
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimensionality == Dimensionality::Dimensionless
    }

    pub fn is_mass(&self) -> bool {
        self.dimensionality == Dimensionality::Mass
    }

    pub fn is_volume(&self) -> bool {
        self.dimensionality == Dimensionality::Volume
    }

    /// Convert to another unit of the same dimension.
    pub fn convert_to(&self, unit: &str) -> Result<Quantity> {
        let target = units::lookup(unit)
            .ok_or_else(|| Error::NotFound(format!("unit '{unit}'")))?;
        let source = self
            .unit
            .as_deref()
            .and_then(units::lookup)
            .ok_or_else(|| Error::NotFound(format!("unit of dimensionless quantity {self}")))?;
        if source.dimensionality != target.dimensionality {
            return Err(Error::IncompatibleUnits {
                from: source.name.to_string(),
                to: target.name.to_string(),
            });
        }
        Ok(Quantity {
            magnitude: self.magnitude * source.factor / target.factor,
            unit: Some(target.name.to_string()),
            dimensionality: target.dimensionality,
        })
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.magnitude, unit),
            None => write!(f, "{}", self.magnitude),
        }
    }
}
