//! Price sensitivity sweep
//!
//! Varies the unit price from `min_change` % to `max_change` % in `step` %
//! increments and reports profit at each point. The number of points is
//! checked by the schema so the sweep never exceeds [`MAX_STEPS`].

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Table};
use crate::schema::{FieldSpec, Limit, Range, Refinement, Schema};

/// Upper bound on sweep points
pub const MAX_STEPS: usize = 100;

/// Tolerance so that e.g. (20 - -20) / 0.1 counts 400 whole steps
const STEP_EPSILON: f64 = 1e-9;

/// Number of sweep points between `min` and `max` inclusive
pub fn sweep_steps(min: f64, max: f64, step: f64) -> usize {
    ((max - min) / step + STEP_EPSILON).floor() as usize + 1
}

fn range_is_ordered(input: &InputRecord) -> bool {
    match (input.number("min_change"), input.number("max_change")) {
        (Ok(min), Ok(max)) => max > min,
        _ => false,
    }
}

fn steps_within_cap(input: &InputRecord) -> bool {
    match (
        input.number("min_change"),
        input.number("max_change"),
        input.number("step"),
    ) {
        (Ok(min), Ok(max), Ok(step)) => max <= min || sweep_steps(min, max, step) <= MAX_STEPS,
        _ => false,
    }
}

pub struct SensitivityAnalysis;

impl Calculator for SensitivityAnalysis {
    fn id(&self) -> &'static str {
        "sensitivity-analysis"
    }

    fn name(&self) -> &'static str {
        "Price Sensitivity Analysis"
    }

    fn description(&self) -> &'static str {
        "Profit across a sweep of unit-price changes"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::positive("unit_price"))
            .field(FieldSpec::non_negative("unit_cost"))
            .field(FieldSpec::positive("volume").help("Units sold"))
            .field(FieldSpec::non_negative("fixed_costs"))
            .field(FieldSpec::bounded("min_change", -100.0, 100.0).help("Lowest price change, %"))
            .field(FieldSpec::bounded("max_change", -100.0, 1000.0).help("Highest price change, %"))
            .field(
                FieldSpec::number(
                    "step",
                    Range {
                        min: Limit::Exclusive(0.0),
                        max: Limit::Inclusive(1000.0),
                    },
                )
                .help("Increment between points, %"),
            )
            .refine(Refinement {
                field: "max_change",
                depends_on: &["min_change", "max_change"],
                message: "the highest change must be above the lowest change",
                check: range_is_ordered,
            })
            .refine(Refinement {
                field: "step",
                depends_on: &["min_change", "max_change", "step"],
                message: "the sweep would exceed 100 steps; use a larger step",
                check: steps_within_cap,
            })
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let unit_price = input.number("unit_price")?;
        let unit_cost = input.number("unit_cost")?;
        let volume = input.number("volume")?;
        let fixed = input.number("fixed_costs")?;
        let min = input.number("min_change")?;
        let max = input.number("max_change")?;
        let step = input.number("step")?;

        let profit_at = |price: f64| (price - unit_cost) * volume - fixed;

        let mut table = Table::new(
            "sweep",
            &[
                ("price_change", OutputKind::Percent),
                ("price", OutputKind::Currency),
                ("profit", OutputKind::Currency),
            ],
        );
        let mut min_profit = f64::INFINITY;
        let mut max_profit = f64::NEG_INFINITY;
        for i in 0..sweep_steps(min, max, step).min(MAX_STEPS) {
            let change = min + i as f64 * step;
            let price = unit_price * (1.0 + change / 100.0);
            let profit = profit_at(price);
            min_profit = min_profit.min(profit);
            max_profit = max_profit.max(profit);
            table.push_row(vec![change, price, profit]);
        }

        Ok(ResultRecord::new()
            .number("base_profit", profit_at(unit_price), OutputKind::Currency)
            .number("min_profit", min_profit, OutputKind::Currency)
            .number("max_profit", max_profit, OutputKind::Currency)
            .number(
                "breakeven_price",
                unit_cost + fixed / volume,
                OutputKind::Currency,
            )
            .table(table))
    }
}
