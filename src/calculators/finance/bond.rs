//! Bond price and duration
//!
//! Price is the sum of discounted coupons and principal; Macaulay duration
//! is the PV-weighted average time (in years) to each cash flow, and
//! modified duration divides it by one plus the periodic yield.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Value};
use crate::schema::{FieldSpec, Schema};

const FREQUENCIES: &[&str] = &["annual", "semiannual", "quarterly", "monthly"];

fn periods_per_year(frequency: &str) -> u32 {
    match frequency {
        "semiannual" => 2,
        "quarterly" => 4,
        "monthly" => 12,
        _ => 1,
    }
}

/// Price and durations of a plain fixed-coupon bond
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondMetrics {
    pub price: f64,
    pub macaulay_duration: f64,
    pub modified_duration: f64,
}

pub fn bond_metrics(face: f64, coupon_pct: f64, yield_pct: f64, years: u32, frequency: u32) -> BondMetrics {
    let f = frequency as f64;
    let coupon = face * coupon_pct / 100.0 / f;
    let y = yield_pct / 100.0 / f;
    let periods = years * frequency;

    let mut price = 0.0;
    let mut weighted = 0.0;
    let mut discount = 1.0;
    for t in 1..=periods {
        discount *= 1.0 + y;
        let flow = if t == periods { coupon + face } else { coupon };
        let pv = flow / discount;
        price += pv;
        weighted += (t as f64 / f) * pv;
    }

    let macaulay_duration = weighted / price;
    BondMetrics {
        price,
        macaulay_duration,
        modified_duration: macaulay_duration / (1.0 + y),
    }
}

pub struct BondDuration;

impl Calculator for BondDuration {
    fn id(&self) -> &'static str {
        "bond-duration"
    }

    fn name(&self) -> &'static str {
        "Bond Duration"
    }

    fn description(&self) -> &'static str {
        "Price, Macaulay duration and modified duration of a fixed-coupon bond"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::positive("face_value"))
            .field(FieldSpec::bounded("coupon_rate", 0.0, 100.0).help("Annual coupon, %"))
            .field(FieldSpec::bounded("yield_rate", 0.0, 100.0).help("Yield to maturity, %"))
            .field(FieldSpec::integer("years_to_maturity", 1, 100))
            .field(
                FieldSpec::choice("frequency", FREQUENCIES)
                    .with_default(Value::Text("annual".to_string())),
            )
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let metrics = bond_metrics(
            input.number("face_value")?,
            input.number("coupon_rate")?,
            input.number("yield_rate")?,
            input.integer("years_to_maturity")?,
            periods_per_year(input.choice("frequency")?),
        );
        let years = OutputKind::Measure {
            decimals: 2,
            unit: "years",
        };

        Ok(ResultRecord::new()
            .number("price", metrics.price, OutputKind::Currency)
            .number("macaulay_duration", metrics.macaulay_duration, years)
            .number("modified_duration", metrics.modified_duration, years))
    }
}
