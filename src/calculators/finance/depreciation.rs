//! Depreciation schedules
//!
//! Three methods over the same asset inputs (cost, salvage value, useful
//! life in whole years):
//!
//! ```text
//! straight-line        D_k = (C - S) / n
//! declining balance    D_k = min(B_{k-1} * m / n, B_{k-1} - S),  last year: B_{n-1} - S
//! sum-of-years-digits  D_k = (C - S) * (n - k + 1) / (n(n+1)/2)
//! ```
//!
//! Book value is carried forward unrounded from year to year.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Table, Value};
use crate::schema::{FieldSpec, Refinement, Schema};

const MAX_LIFE_YEARS: i64 = 100;

/// Fields shared by every method; salvage must be strictly below cost
fn asset_schema() -> Schema {
    Schema::new()
        .field(FieldSpec::positive("cost").help("Purchase cost of the asset"))
        .field(FieldSpec::non_negative("salvage_value").help("Value at the end of its useful life"))
        .field(FieldSpec::integer("useful_life", 1, MAX_LIFE_YEARS).help("Useful life in years"))
        .refine(Refinement {
            field: "salvage_value",
            depends_on: &["cost", "salvage_value"],
            message: "salvage value must be less than the asset cost",
            check: salvage_below_cost,
        })
}

fn salvage_below_cost(input: &InputRecord) -> bool {
    match (input.number("salvage_value"), input.number("cost")) {
        (Ok(salvage), Ok(cost)) => salvage < cost,
        _ => false,
    }
}

struct Asset {
    cost: f64,
    salvage: f64,
    life: u32,
}

impl Asset {
    fn from_input(input: &InputRecord) -> CalcResult<Self> {
        Ok(Self {
            cost: input.number("cost")?,
            salvage: input.number("salvage_value")?,
            life: input.integer("useful_life")?,
        })
    }

    fn base(&self) -> f64 {
        self.cost - self.salvage
    }
}

/// Year-by-year table from a list of annual charges
fn schedule(cost: f64, charges: &[f64]) -> Table {
    let mut table = Table::new(
        "schedule",
        &[
            ("year", OutputKind::Count),
            ("depreciation", OutputKind::Currency),
            ("accumulated", OutputKind::Currency),
            ("book_value", OutputKind::Currency),
        ],
    );
    let mut accumulated = 0.0;
    for (i, charge) in charges.iter().enumerate() {
        accumulated += charge;
        table.push_row(vec![(i + 1) as f64, *charge, accumulated, cost - accumulated]);
    }
    table
}

pub struct StraightLineDepreciation;

impl Calculator for StraightLineDepreciation {
    fn id(&self) -> &'static str {
        "straight-line-depreciation"
    }

    fn name(&self) -> &'static str {
        "Straight-Line Depreciation"
    }

    fn description(&self) -> &'static str {
        "Equal depreciation charge in every year of the asset's life"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        asset_schema()
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let asset = Asset::from_input(input)?;
        let annual = asset.base() / asset.life as f64;
        let charges = vec![annual; asset.life as usize];

        Ok(ResultRecord::new()
            .number("annual_depreciation", annual, OutputKind::Currency)
            .number("depreciable_base", asset.base(), OutputKind::Currency)
            .number(
                "depreciation_rate",
                100.0 / asset.life as f64,
                OutputKind::Percent,
            )
            .table(schedule(asset.cost, &charges)))
    }
}

pub struct DecliningBalanceDepreciation;

impl DecliningBalanceDepreciation {
    fn charges(asset: &Asset, multiplier: f64) -> Vec<f64> {
        let rate = multiplier / asset.life as f64;
        let mut book = asset.cost;
        let mut charges = Vec::with_capacity(asset.life as usize);
        for year in 1..=asset.life {
            let headroom = book - asset.salvage;
            let charge = if year == asset.life {
                headroom
            } else {
                (book * rate).min(headroom)
            };
            book -= charge;
            charges.push(charge);
        }
        charges
    }
}

impl Calculator for DecliningBalanceDepreciation {
    fn id(&self) -> &'static str {
        "declining-balance-depreciation"
    }

    fn name(&self) -> &'static str {
        "Declining-Balance Depreciation"
    }

    fn description(&self) -> &'static str {
        "Accelerated depreciation at a multiple of the straight-line rate (double-declining by default)"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        asset_schema().field(
            FieldSpec::bounded("rate_multiplier", 1.0, 3.0)
                .with_default(Value::Number(2.0))
                .help("Multiple of the straight-line rate (2 = double-declining)"),
        )
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let asset = Asset::from_input(input)?;
        let multiplier = input.number("rate_multiplier")?;
        let charges = Self::charges(&asset, multiplier);
        let first = charges.first().copied().unwrap_or_default();
        let total: f64 = charges.iter().sum();

        Ok(ResultRecord::new()
            .number("first_year_depreciation", first, OutputKind::Currency)
            .number("total_depreciation", total, OutputKind::Currency)
            .number(
                "annual_rate",
                multiplier * 100.0 / asset.life as f64,
                OutputKind::Percent,
            )
            .table(schedule(asset.cost, &charges)))
    }
}

pub struct SumOfYearsDigitsDepreciation;

impl Calculator for SumOfYearsDigitsDepreciation {
    fn id(&self) -> &'static str {
        "sum-of-years-digits-depreciation"
    }

    fn name(&self) -> &'static str {
        "Sum-of-Years-Digits Depreciation"
    }

    fn description(&self) -> &'static str {
        "Accelerated depreciation weighted by remaining life over the sum of the years' digits"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn schema(&self) -> Schema {
        asset_schema()
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let asset = Asset::from_input(input)?;
        let n = asset.life as f64;
        let sum_of_years = n * (n + 1.0) / 2.0;
        let charges: Vec<f64> = (1..=asset.life)
            .map(|k| asset.base() * (n - k as f64 + 1.0) / sum_of_years)
            .collect();
        let first = charges.first().copied().unwrap_or_default();

        Ok(ResultRecord::new()
            .number("sum_of_years", sum_of_years, OutputKind::Count)
            .number("first_year_depreciation", first, OutputKind::Currency)
            .number("depreciable_base", asset.base(), OutputKind::Currency)
            .table(schedule(asset.cost, &charges)))
    }
}
