//! Inflation: future cost and purchasing power of an amount

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Schema};

pub struct Inflation;

impl Calculator for Inflation {
    fn id(&self) -> &'static str {
        "inflation"
    }

    fn name(&self) -> &'static str {
        "Inflation"
    }

    fn description(&self) -> &'static str {
        "What an amount will cost, and be worth, after years of constant inflation"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::positive("amount"))
            .field(FieldSpec::bounded("annual_rate", -50.0, 100.0).help("Annual inflation, %"))
            .field(FieldSpec::integer("years", 1, 200))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let amount = input.number("amount")?;
        let rate = input.number("annual_rate")? / 100.0;
        let years = input.integer("years")?;

        let growth = (1.0 + rate).powi(years as i32);
        Ok(ResultRecord::new()
            .number("future_cost", amount * growth, OutputKind::Currency)
            .number("purchasing_power", amount / growth, OutputKind::Currency)
            .number(
                "cumulative_inflation",
                (growth - 1.0) * 100.0,
                OutputKind::Percent,
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::calculators::RunError;
    use crate::models::RawInput;
    use crate::schema::ViolationKind;

    #[test]
    fn test_compounding() {
        let raw = RawInput::new()
            .with("amount", 100)
            .with("annual_rate", 3)
            .with("years", 10);
        let eval = run_calculator(&Inflation, &raw).unwrap();
        let future = eval.result.get_number("future_cost").unwrap();
        assert!((future - 134.3916).abs() < 1e-4);
        let power = eval.result.get_number("purchasing_power").unwrap();
        assert!((power - 74.4094).abs() < 1e-4);
    }

    #[test]
    fn test_zero_years_rejected() {
        let raw = RawInput::new()
            .with("amount", 100)
            .with("annual_rate", 3)
            .with("years", 0);
        match run_calculator(&Inflation, &raw) {
            Err(RunError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "years");
                assert!(matches!(errors[0].kind, ViolationKind::RangeViolation { .. }));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }
}
