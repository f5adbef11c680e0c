//! Base calculator trait and types
//!
//! This module defines the core abstractions for calculators:
//! - `Calculator` trait that every calculator implements
//! - `Category` for grouping calculators in listings
//! - `CalcError` for the (validation-prevented) computation failures

use super::units::ConversionError;
use crate::interpret::BandSet;
use crate::models::{InputRecord, ResultRecord};
use crate::schema::Schema;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while evaluating an already-validated input.
///
/// These indicate a schema/formula mismatch, never bad user input:
/// user-correctable problems are caught by the validator first.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("input '{field}' was not provided")]
    MissingInput { field: String },

    #[error("input '{field}' is not a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator families
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Finance,
    Health,
    Sports,
    Units,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Finance => write!(f, "finance"),
            Category::Health => write!(f, "health"),
            Category::Sports => write!(f, "sports"),
            Category::Units => write!(f, "units"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "finance" => Ok(Category::Finance),
            "health" | "fitness" => Ok(Category::Health),
            "sports" | "sport" => Ok(Category::Sports),
            "units" | "unit" | "conversion" => Ok(Category::Units),
            _ => Err(format!(
                "Unknown category '{}'. Valid categories: finance, health, sports, units",
                s
            )),
        }
    }
}

/// Trait for all calculators
///
/// A calculator is a pure function from a validated [`InputRecord`] to a
/// [`ResultRecord`], plus the schema that guards its domain and the bands
/// that interpret its outputs.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct EnterpriseValueCalculator;
///
/// impl Calculator for EnterpriseValueCalculator {
///     fn id(&self) -> &'static str {
///         "enterprise-value"
///     }
///
///     fn schema(&self) -> Schema {
///         Schema::new().field(FieldSpec::non_negative("market_cap"))
///     }
///
///     fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
///         let ev = input.number("market_cap")?;
///         Ok(ResultRecord::new().number("enterprise_value", ev, OutputKind::Currency))
///     }
///     // ...
/// }
/// ```
pub trait Calculator: Send + Sync {
    /// Unique kebab-case identifier, used as the registry key
    fn id(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    /// One-line description of what is computed
    fn description(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Input declaration checked before `evaluate` runs
    fn schema(&self) -> Schema;

    /// Compute outputs from a validated input.
    ///
    /// Must be deterministic: the same input always produces a
    /// bit-identical result.
    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord>;

    /// Bands applied to the result after evaluation
    ///
    /// Default: none
    fn bands(&self) -> Vec<BandSet> {
        vec![]
    }
}
