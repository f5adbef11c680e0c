//! Enterprise value

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Value};
use crate::schema::{FieldSpec, Schema};

pub struct EnterpriseValue;

impl Calculator for EnterpriseValue {
    fn id(&self) -> &'static str {
        "enterprise-value"
    }

    fn name(&self) -> &'static str {
        "Enterprise Value"
    }

    fn description(&self) -> &'static str {
        "Market capitalisation plus debt and other claims, less cash"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::non_negative("market_cap"))
            .field(FieldSpec::non_negative("total_debt"))
            .field(FieldSpec::non_negative("cash").help("Cash and cash equivalents"))
            .field(FieldSpec::non_negative("preferred_equity").with_default(Value::Number(0.0)))
            .field(FieldSpec::non_negative("minority_interest").with_default(Value::Number(0.0)))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let market_cap = input.number("market_cap")?;
        let debt = input.number("total_debt")?;
        let cash = input.number("cash")?;
        let preferred = input.number("preferred_equity")?;
        let minority = input.number("minority_interest")?;

        let net_debt = debt - cash;
        Ok(ResultRecord::new()
            .number(
                "enterprise_value",
                market_cap + net_debt + preferred + minority,
                OutputKind::Currency,
            )
            .number("net_debt", net_debt, OutputKind::Currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::models::RawInput;

    #[test]
    fn test_enterprise_value() {
        let raw = RawInput::new()
            .with("market_cap", 500000)
            .with("total_debt", 100000)
            .with("cash", 50000);
        let eval = run_calculator(&EnterpriseValue, &raw).unwrap();
        assert_eq!(eval.result.get_number("enterprise_value"), Some(550000.0));
        assert_eq!(eval.result.get_number("net_debt"), Some(50000.0));
    }

    #[test]
    fn test_optional_claims_added() {
        let raw = RawInput::new()
            .with("market_cap", 100)
            .with("total_debt", 0)
            .with("cash", 0)
            .with("preferred_equity", 10)
            .with("minority_interest", 5);
        let eval = run_calculator(&EnterpriseValue, &raw).unwrap();
        assert_eq!(eval.result.get_number("enterprise_value"), Some(115.0));
    }
}
