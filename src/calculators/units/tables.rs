//! Unit tables and conversion
//!
//! Every unit maps to its dimension's base unit (gram, millilitre, metre,
//! kelvin) through `base = value × factor + offset`. Only temperature has a
//! non-zero offset.

use serde::Serialize;
use thiserror::Error;

/// Slack for float error at exactly absolute zero (e.g. -459.67 °F)
const ABSOLUTE_ZERO_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("cannot convert {from} ({from_dimension}) to {to} ({to_dimension})")]
    IncompatibleUnits {
        from: &'static str,
        to: &'static str,
        from_dimension: Dimension,
        to_dimension: Dimension,
    },

    #[error("{value} {unit} is below absolute zero")]
    BelowAbsoluteZero { value: f64, unit: &'static str },

    #[error("value must be a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Mass,
    Volume,
    Length,
    Temperature,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Mass,
        Dimension::Volume,
        Dimension::Length,
        Dimension::Temperature,
    ];

    /// Unit symbols in this dimension, smallest first
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            Dimension::Mass => &["mg", "g", "kg", "oz", "lb"],
            Dimension::Volume => &["ml", "l", "tsp", "tbsp", "fl_oz", "cup", "pt", "qt", "gal"],
            Dimension::Length => &["mm", "cm", "m", "km", "in", "ft", "yd", "mi"],
            Dimension::Temperature => &["c", "f", "k"],
        }
    }

    pub fn units(&self) -> impl Iterator<Item = &'static Unit> + '_ {
        UNITS.iter().filter(move |u| u.dimension == *self)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Mass => write!(f, "mass"),
            Dimension::Volume => write!(f, "volume"),
            Dimension::Length => write!(f, "length"),
            Dimension::Temperature => write!(f, "temperature"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    pub symbol: &'static str,
    pub name: &'static str,
    pub dimension: Dimension,
    #[serde(skip)]
    aliases: &'static [&'static str],
    #[serde(skip)]
    factor: f64,
    #[serde(skip)]
    offset: f64,
}

const fn linear(
    symbol: &'static str,
    name: &'static str,
    dimension: Dimension,
    factor: f64,
    aliases: &'static [&'static str],
) -> Unit {
    Unit {
        symbol,
        name,
        dimension,
        aliases,
        factor,
        offset: 0.0,
    }
}

pub static UNITS: &[Unit] = &[
    // mass, base gram
    linear("mg", "milligram", Dimension::Mass, 0.001, &["milligram", "milligrams"]),
    linear("g", "gram", Dimension::Mass, 1.0, &["gram", "grams"]),
    linear("kg", "kilogram", Dimension::Mass, 1000.0, &["kilogram", "kilograms", "kilo"]),
    linear("oz", "ounce", Dimension::Mass, 28.349523125, &["ounce", "ounces"]),
    linear("lb", "pound", Dimension::Mass, 453.59237, &["lbs", "pound", "pounds"]),
    // volume, base millilitre (US customary)
    linear("ml", "millilitre", Dimension::Volume, 1.0, &["milliliter", "millilitre"]),
    linear("l", "litre", Dimension::Volume, 1000.0, &["liter", "litre", "liters", "litres"]),
    linear("tsp", "teaspoon", Dimension::Volume, 4.92892159375, &["teaspoon", "teaspoons"]),
    linear("tbsp", "tablespoon", Dimension::Volume, 14.78676478125, &["tablespoon", "tablespoons"]),
    linear("fl_oz", "fluid ounce", Dimension::Volume, 29.5735295625, &["floz", "fluid_ounce"]),
    linear("cup", "cup", Dimension::Volume, 236.5882365, &["cups"]),
    linear("pt", "pint", Dimension::Volume, 473.176473, &["pint", "pints"]),
    linear("qt", "quart", Dimension::Volume, 946.352946, &["quart", "quarts"]),
    linear("gal", "gallon", Dimension::Volume, 3785.411784, &["gallon", "gallons"]),
    // length, base metre
    linear("mm", "millimetre", Dimension::Length, 0.001, &["millimeter", "millimetre"]),
    linear("cm", "centimetre", Dimension::Length, 0.01, &["centimeter", "centimetre"]),
    linear("m", "metre", Dimension::Length, 1.0, &["meter", "metre", "meters", "metres"]),
    linear("km", "kilometre", Dimension::Length, 1000.0, &["kilometer", "kilometre"]),
    linear("in", "inch", Dimension::Length, 0.0254, &["inch", "inches"]),
    linear("ft", "foot", Dimension::Length, 0.3048, &["foot", "feet"]),
    linear("yd", "yard", Dimension::Length, 0.9144, &["yard", "yards"]),
    linear("mi", "mile", Dimension::Length, 1609.344, &["mile", "miles"]),
    // temperature, base kelvin
    Unit {
        symbol: "c",
        name: "degree Celsius",
        dimension: Dimension::Temperature,
        aliases: &["celsius", "°c"],
        factor: 1.0,
        offset: 273.15,
    },
    Unit {
        symbol: "f",
        name: "degree Fahrenheit",
        dimension: Dimension::Temperature,
        aliases: &["fahrenheit", "°f"],
        factor: 5.0 / 9.0,
        offset: 273.15 - 32.0 * 5.0 / 9.0,
    },
    Unit {
        symbol: "k",
        name: "kelvin",
        dimension: Dimension::Temperature,
        aliases: &["kelvin"],
        factor: 1.0,
        offset: 0.0,
    },
];

impl Unit {
    /// Look up a unit by symbol or alias, case-insensitively
    pub fn parse(s: &str) -> Result<&'static Unit, ConversionError> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        UNITS
            .iter()
            .find(|u| u.symbol == wanted || u.aliases.contains(&wanted.as_str()))
            .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
    }

    fn to_base(&self, value: f64) -> Result<f64, ConversionError> {
        let base = value * self.factor + self.offset;
        if self.dimension == Dimension::Temperature && base < -ABSOLUTE_ZERO_TOLERANCE {
            return Err(ConversionError::BelowAbsoluteZero {
                value,
                unit: self.symbol,
            });
        }
        Ok(base)
    }

    fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.factor
    }

    /// Whether `value` is a physically meaningful amount in this unit
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && self.to_base(value).is_ok()
    }
}

/// Convert `value` between two units of the same dimension
pub fn convert(value: f64, from: &Unit, to: &Unit) -> Result<f64, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::NonFinite);
    }
    if from.dimension != to.dimension {
        return Err(ConversionError::IncompatibleUnits {
            from: from.symbol,
            to: to.symbol,
            from_dimension: from.dimension,
            to_dimension: to.dimension,
        });
    }
    if from.symbol == to.symbol {
        from.to_base(value)?;
        return Ok(value);
    }
    Ok(to.from_base(from.to_base(value)?))
}

/// [`convert`] with units given by symbol or alias
pub fn convert_str(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    convert(value, Unit::parse(from)?, Unit::parse(to)?)
}
