//! Price-to-rent ratio

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::interpret::{Band, BandSet};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Schema};

const RATIO_BANDS: BandSet = BandSet::new(
    "price_to_rent_ratio",
    &[
        Band::new(
            21.0,
            "Renting favored",
            &["Prices are high relative to rents; renting and investing the difference is usually cheaper."],
        ),
        Band::new(
            16.0,
            "Either could work",
            &["Compare how long you plan to stay and your expected maintenance costs."],
        ),
        Band::floor(
            "Buying favored",
            &["Prices are low relative to rents; buying tends to cost less over time."],
        ),
    ],
);

pub struct PriceToRent;

impl Calculator for PriceToRent {
    fn id(&self) -> &'static str {
        "price-to-rent"
    }

    fn name(&self) -> &'static str {
        "Price-to-Rent Ratio"
    }

    fn description(&self) -> &'static str {
        "Home price divided by a year of rent for a comparable home"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::positive("home_price"))
            .field(FieldSpec::positive("monthly_rent"))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let price = input.number("home_price")?;
        let annual_rent = input.number("monthly_rent")? * 12.0;

        Ok(ResultRecord::new()
            .number("annual_rent", annual_rent, OutputKind::Currency)
            .number("price_to_rent_ratio", price / annual_rent, OutputKind::Ratio))
    }

    fn bands(&self) -> Vec<BandSet> {
        vec![RATIO_BANDS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::models::RawInput;

    #[test]
    fn test_ratio_and_band() {
        let raw = RawInput::new()
            .with("home_price", 360000)
            .with("monthly_rent", 1500);
        let eval = run_calculator(&PriceToRent, &raw).unwrap();
        assert_eq!(eval.result.get_number("price_to_rent_ratio"), Some(20.0));
        assert_eq!(eval.interpretations[0].label, "Either could work");
    }

    #[test]
    fn test_zero_rent_rejected() {
        let raw = RawInput::new()
            .with("home_price", 360000)
            .with("monthly_rent", 0);
        assert!(run_calculator(&PriceToRent, &raw).is_err());
    }
}
