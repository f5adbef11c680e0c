//! Net present value of a series of year-end cash flows

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::interpret::{Band, BandSet};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Range, Schema};

/// Bound on the discounting loop, enforced through the schema
pub const MAX_CASH_FLOWS: usize = 100;

const NPV_BANDS: BandSet = BandSet::new(
    "npv",
    &[
        Band::new(
            0.0,
            "Accept",
            &["The project earns at least the discount rate; it adds value at this rate."],
        ),
        Band::floor(
            "Reject",
            &[
                "The project earns less than the discount rate.",
                "Revisit the cash flow assumptions or look for a cheaper source of capital.",
            ],
        ),
    ],
);

pub struct NetPresentValue;

impl NetPresentValue {
    /// Present value of flows received at the end of years 1..=n
    pub fn present_value(rate_pct: f64, flows: &[f64]) -> f64 {
        let factor = 1.0 + rate_pct / 100.0;
        let mut discount = 1.0;
        let mut pv = 0.0;
        for flow in flows {
            discount *= factor;
            pv += flow / discount;
        }
        pv
    }
}

impl Calculator for NetPresentValue {
    fn id(&self) -> &'static str {
        "net-present-value"
    }

    fn name(&self) -> &'static str {
        "Net Present Value"
    }

    fn description(&self) -> &'static str {
        "Discounted value of future cash flows minus the initial investment"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::bounded("discount_rate", 0.0, 100.0).help("Annual discount rate, %"))
            .field(FieldSpec::non_negative("initial_investment"))
            .field(
                FieldSpec::list("cash_flows", 1, MAX_CASH_FLOWS, Range::ANY)
                    .help("Year-end cash flows, comma separated"),
            )
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let rate = input.number("discount_rate")?;
        let investment = input.number("initial_investment")?;
        let flows = input.list("cash_flows")?;

        let pv = Self::present_value(rate, flows);
        let mut result = ResultRecord::new()
            .number("npv", pv - investment, OutputKind::Currency)
            .number("present_value_of_cash_flows", pv, OutputKind::Currency);
        if investment > 0.0 {
            result = result.number("profitability_index", pv / investment, OutputKind::Ratio);
        }
        Ok(result)
    }

    fn bands(&self) -> Vec<BandSet> {
        vec![NPV_BANDS]
    }
}
