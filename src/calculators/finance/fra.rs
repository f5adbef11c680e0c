//! Forward rate agreement settlement
//!
//! ```text
//! τ        = (months_to - months_from) / 12
//! payment  = N × (r_market - r_agreed) × τ / (1 + r_market × τ)
//! ```
//!
//! The settlement is paid at the start of the period, hence the discount
//! by the market rate.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Refinement, Schema};

pub const LONG_TO_SHORT: &str = "from long to short";
pub const SHORT_TO_LONG: &str = "from short to long";
pub const NO_PAYMENT: &str = "no payment";

pub struct ForwardRateAgreement;

impl ForwardRateAgreement {
    /// Signed settlement amount and the paying direction
    pub fn settle(
        notional: f64,
        agreed_pct: f64,
        market_pct: f64,
        year_fraction: f64,
    ) -> (f64, &'static str) {
        let agreed = agreed_pct / 100.0;
        let market = market_pct / 100.0;
        let payment = notional * (market - agreed) * year_fraction / (1.0 + market * year_fraction);
        let direction = if market > agreed {
            LONG_TO_SHORT
        } else if market < agreed {
            SHORT_TO_LONG
        } else {
            NO_PAYMENT
        };
        (payment, direction)
    }
}

fn period_is_positive(input: &InputRecord) -> bool {
    match (input.integer("months_from"), input.integer("months_to")) {
        (Ok(from), Ok(to)) => to > from,
        _ => false,
    }
}

/// `1 + market × τ` must stay positive or the settlement discount blows up.
/// An empty or inverted period is left to `period_is_positive`.
fn discount_is_positive(input: &InputRecord) -> bool {
    match (
        input.number("market_rate"),
        input.integer("months_from"),
        input.integer("months_to"),
    ) {
        (Ok(market), Ok(from), Ok(to)) => {
            to <= from || 1.0 + market / 100.0 * (to - from) as f64 / 12.0 > 0.0
        }
        _ => false,
    }
}

impl Calculator for ForwardRateAgreement {
    fn id(&self) -> &'static str {
        "forward-rate-agreement"
    }

    fn name(&self) -> &'static str {
        "Forward Rate Agreement"
    }

    fn description(&self) -> &'static str {
        "Settlement amount and paying side of an FRA at fixing"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::positive("notional"))
            .field(FieldSpec::bounded("agreed_rate", -10.0, 100.0).help("Contract rate, %"))
            .field(FieldSpec::bounded("market_rate", -10.0, 100.0).help("Reference rate at fixing, %"))
            .field(FieldSpec::integer("months_from", 0, 120))
            .field(FieldSpec::integer("months_to", 1, 120))
            .refine(Refinement {
                field: "months_to",
                depends_on: &["months_from", "months_to"],
                message: "the period must end after it starts",
                check: period_is_positive,
            })
            .refine(Refinement {
                field: "market_rate",
                depends_on: &["market_rate", "months_from", "months_to"],
                message: "the market rate is too negative for this period (1 + rate × years must be positive)",
                check: discount_is_positive,
            })
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let notional = input.number("notional")?;
        let agreed = input.number("agreed_rate")?;
        let market = input.number("market_rate")?;
        let months = input.integer("months_to")? - input.integer("months_from")?;
        let year_fraction = months as f64 / 12.0;

        let (payment, direction) = Self::settle(notional, agreed, market, year_fraction);

        Ok(ResultRecord::new()
            .number("year_fraction", year_fraction, OutputKind::Measure { decimals: 4, unit: "" })
            .number("settlement_amount", payment.abs(), OutputKind::Currency)
            .text("direction", direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::calculators::RunError;
    use crate::models::RawInput;
    use crate::schema::ViolationKind;

    fn fra(agreed: f64, market: f64, from: u32, to: u32) -> RawInput {
        RawInput::new()
            .with("notional", 1_000_000)
            .with("agreed_rate", agreed)
            .with("market_rate", market)
            .with("months_from", from)
            .with("months_to", to)
    }

    #[test]
    fn test_six_by_nine() {
        let eval = run_calculator(&ForwardRateAgreement, &fra(4.5, 4.8, 6, 9)).unwrap();
        assert_eq!(eval.result.get_number("year_fraction"), Some(0.25));
        let expected = 1_000_000.0 * 0.003 * 0.25 / (1.0 + 0.048 * 0.25);
        let amount = eval.result.get_number("settlement_amount").unwrap();
        assert!((amount - expected).abs() < 1e-6);
        assert_eq!(eval.result.get_text("direction"), Some(LONG_TO_SHORT));
    }

    #[test]
    fn test_direction_reverses() {
        let eval = run_calculator(&ForwardRateAgreement, &fra(5.0, 4.0, 0, 6)).unwrap();
        assert_eq!(eval.result.get_text("direction"), Some(SHORT_TO_LONG));
        let eval = run_calculator(&ForwardRateAgreement, &fra(4.0, 4.0, 0, 6)).unwrap();
        assert_eq!(eval.result.get_text("direction"), Some(NO_PAYMENT));
        assert_eq!(eval.result.get_number("settlement_amount"), Some(0.0));
    }

    #[test]
    fn test_zero_discount_factor_rejected() {
        // -10 % over ten years makes 1 + r·τ exactly zero
        match run_calculator(&ForwardRateAgreement, &fra(4.5, -10.0, 0, 120)) {
            Err(RunError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "market_rate");
                assert!(matches!(
                    errors[0].kind,
                    ViolationKind::RefinementViolation { .. }
                ));
            }
            other => panic!("expected discount factor violation, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rates_stay_finite() {
        let eval = run_calculator(&ForwardRateAgreement, &fra(-0.5, -9.0, 0, 120)).unwrap();
        let amount = eval.result.get_number("settlement_amount").unwrap();
        assert!(amount.is_finite());
        let expected: f64 = 1_000_000.0 * (-0.09 + 0.005) * 10.0 / (1.0 - 0.09 * 10.0);
        assert!((amount - expected.abs()).abs() < 1e-9 * expected.abs());
        assert_eq!(eval.result.get_text("direction"), Some(SHORT_TO_LONG));
    }

    #[test]
    fn test_inverted_period_reported_once() {
        match run_calculator(&ForwardRateAgreement, &fra(4.0, 100.0, 120, 6)) {
            Err(RunError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "months_to");
            }
            other => panic!("expected period violation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_period_rejected() {
        assert!(run_calculator(&ForwardRateAgreement, &fra(4.0, 4.5, 9, 9)).is_err());
    }
}
