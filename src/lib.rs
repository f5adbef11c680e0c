//! calcdeck - a catalog of small validated calculators
//!
//! Finance, health, sports and unit-conversion calculators share one
//! pipeline: raw input is validated against a declarative schema (all
//! problems collected at once), a pure formula computes the results, and
//! fixed bands interpret them. A money-habits quiz sits alongside, with an
//! optional language-model report behind [`quiz::ReportService`].
//!
//! ```
//! use calcdeck::calculators::Registry;
//! use calcdeck::models::RawInput;
//!
//! let registry = Registry::builtin();
//! let raw = RawInput::new()
//!     .with("amount", 100)
//!     .with("annual_rate", 3)
//!     .with("years", 10);
//! let evaluation = registry.run("inflation", &raw).unwrap();
//! assert!(evaluation.result.get_number("future_cost").is_some());
//! ```

pub mod ai;
pub mod calculators;
pub mod config;
pub mod interpret;
pub mod models;
pub mod quiz;
pub mod reporters;
pub mod schema;
