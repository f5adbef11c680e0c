//! Swap spread over the matching-maturity treasury yield

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::interpret::{Band, BandSet};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Schema};

/// Spread rounded to whole basis points (2.3 - 1.8 is 49.999... in f64)
pub fn spread_bps(swap_rate: f64, treasury_yield: f64) -> f64 {
    ((swap_rate - treasury_yield) * 100.0).round()
}

const SPREAD_BANDS: BandSet = BandSet::new(
    "spread_bps",
    &[
        Band::new(
            50.0,
            "Wide",
            &["Wide spreads usually signal elevated bank credit or liquidity stress."],
        ),
        Band::new(
            0.0,
            "Normal",
            &["Swaps trade above treasuries, the usual relationship."],
        ),
        Band::floor(
            "Inverted",
            &["Negative spreads often reflect balance-sheet constraints on dealers holding treasuries."],
        ),
    ],
);

pub struct SwapSpread;

impl Calculator for SwapSpread {
    fn id(&self) -> &'static str {
        "swap-spread"
    }

    fn name(&self) -> &'static str {
        "Swap Spread"
    }

    fn description(&self) -> &'static str {
        "Difference between a swap rate and the treasury yield of the same maturity"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::bounded("swap_rate", -10.0, 100.0).help("Fixed swap rate, %"))
            .field(FieldSpec::bounded("treasury_yield", -10.0, 100.0).help("Treasury yield, %"))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let swap_rate = input.number("swap_rate")?;
        let treasury_yield = input.number("treasury_yield")?;
        Ok(ResultRecord::new()
            .number("spread", swap_rate - treasury_yield, OutputKind::Percent)
            .number(
                "spread_bps",
                spread_bps(swap_rate, treasury_yield),
                OutputKind::Measure {
                    decimals: 0,
                    unit: "bps",
                },
            ))
    }

    fn bands(&self) -> Vec<BandSet> {
        vec![SPREAD_BANDS]
    }
}
