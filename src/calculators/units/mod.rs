//! Unit conversion
//!
//! [`convert`] is the plain conversion function; [`UnitConverter`] exposes
//! one dimension as a registry calculator.

mod converter;
mod tables;

pub use converter::UnitConverter;
pub use tables::{convert, convert_str, ConversionError, Dimension, Unit, UNITS};
