//! Calculators
//!
//! This module provides the calculator framework and the built-in catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Registry                            │
//! │  - Looks calculators up by kebab-case id                    │
//! │  - Runs validate → evaluate → interpret                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Calculator Trait                        │
//! │  - id(), name(), description(), category()                  │
//! │  - schema(): fields, ranges and refinements                 │
//! │  - evaluate(input): pure formula                            │
//! │  - bands(): thresholds for interpreting outputs             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!        ┌──────────────┬──────┴───────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!   ┌─────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │ finance │   │ health   │   │ sports   │   │ units    │
//!   └─────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use calcdeck::calculators::Registry;
//! use calcdeck::models::RawInput;
//!
//! let registry = Registry::builtin();
//! let raw = RawInput::new()
//!     .with("market_cap", 500000)
//!     .with("total_debt", 100000)
//!     .with("cash", 50000);
//! let eval = registry.run("enterprise-value", &raw).unwrap();
//! assert_eq!(eval.result.get_number("enterprise_value"), Some(550000.0));
//! ```

mod base;
pub mod finance;
pub mod health;
mod registry;
pub mod sports;
pub mod units;

pub use base::{CalcError, CalcResult, Calculator, Category};
pub use registry::{normalize_calculator_id, run_calculator, Evaluation, Registry, RunError};

use std::sync::Arc;

/// Create the default set of calculators
pub fn default_calculators() -> Vec<Arc<dyn Calculator>> {
    let mut calculators: Vec<Arc<dyn Calculator>> = vec![
        // Depreciation
        Arc::new(finance::StraightLineDepreciation),
        Arc::new(finance::DecliningBalanceDepreciation),
        Arc::new(finance::SumOfYearsDigitsDepreciation),
        // Investment and rates
        Arc::new(finance::NetPresentValue),
        Arc::new(finance::ForwardRateAgreement),
        Arc::new(finance::BondDuration),
        Arc::new(finance::SwapSpread),
        Arc::new(finance::EnterpriseValue),
        Arc::new(finance::Inflation),
        Arc::new(finance::SensitivityAnalysis),
        Arc::new(finance::PriceToRent),
        // Health and fitness
        Arc::new(health::BasalMetabolicRate),
        Arc::new(health::DailyCalories),
        Arc::new(health::FatFreeMassIndex),
        Arc::new(health::HeartRateZones),
        Arc::new(health::StepCalories),
        Arc::new(health::BodyShape),
        Arc::new(health::BurnoutRisk),
        // Sports
        Arc::new(sports::GolfHandicap),
    ];

    for converter in units::UnitConverter::all() {
        calculators.push(Arc::new(converter));
    }

    calculators
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_normalized() {
        let calculators = default_calculators();
        let ids: HashSet<_> = calculators.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), calculators.len());
        for id in ids {
            assert_eq!(normalize_calculator_id(id), id);
        }
    }

    #[test]
    fn test_every_band_set_partitions() {
        for calculator in default_calculators() {
            for bands in calculator.bands() {
                assert!(
                    bands.is_partition(),
                    "{} has a malformed band set for {}",
                    calculator.id(),
                    bands.metric
                );
            }
        }
    }

    #[test]
    fn test_every_schema_field_has_unique_name() {
        for calculator in default_calculators() {
            let schema = calculator.schema();
            let names: HashSet<_> = schema.fields.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), schema.fields.len(), "{}", calculator.id());
        }
    }
}
