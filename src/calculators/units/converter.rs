//! Converter calculators, one per dimension

use super::tables::{convert, Dimension, Unit};
use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Range, Refinement, Schema};

const CONVERTED: OutputKind = OutputKind::Measure {
    decimals: 3,
    unit: "",
};

fn value_is_physical(input: &InputRecord) -> bool {
    match (input.number("value"), input.choice("from")) {
        (Ok(value), Ok(from)) => Unit::parse(from).map(|u| u.accepts(value)).unwrap_or(false),
        _ => false,
    }
}

/// Converts a value between two units of one dimension
pub struct UnitConverter {
    dimension: Dimension,
}

impl UnitConverter {
    pub fn new(dimension: Dimension) -> Self {
        Self { dimension }
    }

    pub fn all() -> Vec<UnitConverter> {
        Dimension::ALL.into_iter().map(Self::new).collect()
    }
}

impl Calculator for UnitConverter {
    fn id(&self) -> &'static str {
        match self.dimension {
            Dimension::Mass => "mass-converter",
            Dimension::Volume => "volume-converter",
            Dimension::Length => "length-converter",
            Dimension::Temperature => "temperature-converter",
        }
    }

    fn name(&self) -> &'static str {
        match self.dimension {
            Dimension::Mass => "Mass Converter",
            Dimension::Volume => "Volume Converter",
            Dimension::Length => "Length Converter",
            Dimension::Temperature => "Temperature Converter",
        }
    }

    fn description(&self) -> &'static str {
        match self.dimension {
            Dimension::Mass => "Convert between metric and imperial mass units",
            Dimension::Volume => "Convert between metric and US customary volume units",
            Dimension::Length => "Convert between metric and imperial length units",
            Dimension::Temperature => "Convert between Celsius, Fahrenheit and kelvin",
        }
    }

    fn category(&self) -> Category {
        Category::Units
    }

    fn schema(&self) -> Schema {
        let symbols = self.dimension.symbols();
        let schema = Schema::new()
            .field(FieldSpec::number("value", Range::ANY))
            .field(FieldSpec::choice("from", symbols))
            .field(FieldSpec::choice("to", symbols));
        if self.dimension == Dimension::Temperature {
            schema.refine(Refinement {
                field: "value",
                depends_on: &["value", "from"],
                message: "temperature is below absolute zero",
                check: value_is_physical,
            })
        } else {
            schema
        }
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let value = input.number("value")?;
        let from = Unit::parse(input.choice("from")?)?;
        let to = Unit::parse(input.choice("to")?)?;

        let converted = convert(value, from, to)?;
        // one `to` unit expressed in `from` units
        let reverse = convert(1.0, to, from)?;

        Ok(ResultRecord::new()
            .number("converted", converted, CONVERTED)
            .number("reverse_factor", reverse, CONVERTED)
            .text("from_unit", from.name)
            .text("to_unit", to.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::calculators::RunError;
    use crate::models::RawInput;
    use crate::schema::ViolationKind;

    fn conversion(value: f64, from: &str, to: &str) -> RawInput {
        RawInput::new()
            .with("value", value)
            .with("from", from)
            .with("to", to)
    }

    #[test]
    fn test_milligrams_to_grams() {
        let mass = UnitConverter::new(Dimension::Mass);
        let eval = run_calculator(&mass, &conversion(1000.0, "mg", "g")).unwrap();
        let converted = eval.result.get_number("converted").unwrap();
        assert!((converted - 1.0).abs() < 1e-12);
        let reverse = eval.result.get_number("reverse_factor").unwrap();
        assert!((reverse - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_dimension_unit_is_invalid_choice() {
        let mass = UnitConverter::new(Dimension::Mass);
        match run_calculator(&mass, &conversion(1.0, "kg", "m")) {
            Err(RunError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "to");
                assert!(matches!(errors[0].kind, ViolationKind::InvalidChoice { .. }));
            }
            other => panic!("expected invalid choice, got {:?}", other),
        }
    }

    #[test]
    fn test_below_absolute_zero_is_validation_error() {
        let temperature = UnitConverter::new(Dimension::Temperature);
        match run_calculator(&temperature, &conversion(-500.0, "f", "c")) {
            Err(RunError::Invalid(errors)) => {
                assert_eq!(errors[0].field, "value");
                assert!(matches!(
                    errors[0].kind,
                    ViolationKind::RefinementViolation { .. }
                ));
            }
            other => panic!("expected refinement violation, got {:?}", other),
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = UnitConverter::all().iter().map(|c| c.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
