//! Calculator registry
//!
//! The Registry is the single lookup table of calculators keyed by
//! identifier. Running a calculator always goes through the same pipeline:
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌─────────────┐
//! │ RawInput │──▶│ validate  │──▶│ evaluate   │──▶│ interpret   │──▶ Evaluation
//! └──────────┘   │ (schema)  │   │ (formula)  │   │ (bands)     │
//!                └───────────┘   └────────────┘   └─────────────┘
//! ```
//!
//! No stage calls back into an earlier one and nothing is retained
//! between runs.

use crate::calculators::base::{CalcError, Calculator, Category};
use crate::interpret::{interpret, Interpretation};
use crate::models::{InputRecord, RawInput, ResultRecord};
use crate::schema::{validate, ValidationError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a run produced no result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunError {
    #[error("Unknown calculator '{0}'. Run `calcdeck list` to see available calculators")]
    UnknownCalculator(String),

    #[error("{} invalid input(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Computation(#[from] CalcError),
}

/// Everything produced by one successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub calculator: String,
    pub input: InputRecord,
    pub result: ResultRecord,
    pub interpretations: Vec<Interpretation>,
}

/// Lookup table of calculators by identifier
#[derive(Default)]
pub struct Registry {
    calculators: BTreeMap<&'static str, Arc<dyn Calculator>>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in calculator
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_all(super::default_calculators());
        registry
    }

    /// Register a calculator, replacing any with the same id
    pub fn register(&mut self, calculator: Arc<dyn Calculator>) {
        debug!("Registering calculator: {}", calculator.id());
        if let Some(previous) = self.calculators.insert(calculator.id(), calculator) {
            warn!("Calculator '{}' registered twice; keeping the later one", previous.id());
        }
    }

    /// Register multiple calculators at once
    pub fn register_all(&mut self, calculators: impl IntoIterator<Item = Arc<dyn Calculator>>) {
        for calculator in calculators {
            self.register(calculator);
        }
    }

    /// Drop calculators by id (used for `[calculators] disabled` config)
    pub fn without<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        for id in ids {
            let id = normalize_calculator_id(id.as_ref());
            if self.calculators.remove(id.as_str()).is_some() {
                debug!("Disabled calculator: {}", id);
            } else {
                warn!("Cannot disable unknown calculator '{}'", id);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Look up a calculator; accepts `snake_case` and `CamelCase` spellings
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Calculator>> {
        self.calculators.get(normalize_calculator_id(id).as_str())
    }

    /// Ids of all registered calculators, sorted
    pub fn ids(&self) -> Vec<&'static str> {
        self.calculators.keys().copied().collect()
    }

    /// All calculators, sorted by id
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Calculator>> {
        self.calculators.values()
    }

    pub fn by_category(&self, category: Category) -> Vec<&Arc<dyn Calculator>> {
        self.iter().filter(|c| c.category() == category).collect()
    }

    /// Validate, evaluate and interpret in one call
    pub fn run(&self, id: &str, raw: &RawInput) -> Result<Evaluation, RunError> {
        let calculator = self
            .get(id)
            .ok_or_else(|| RunError::UnknownCalculator(id.to_string()))?;
        run_calculator(calculator.as_ref(), raw)
    }
}

/// Run a single calculator through validate → evaluate → interpret
pub fn run_calculator(calculator: &dyn Calculator, raw: &RawInput) -> Result<Evaluation, RunError> {
    let schema = calculator.schema();
    let input = validate(raw, &schema).map_err(RunError::Invalid)?;
    let result = calculator.evaluate(&input)?;
    let interpretations = calculator
        .bands()
        .iter()
        .map(|bands| interpret(&result, bands))
        .collect();

    debug!(
        "Evaluated {} ({} outputs, {} tables)",
        calculator.id(),
        result.outputs.len(),
        result.tables.len()
    );

    Ok(Evaluation {
        calculator: calculator.id().to_string(),
        input,
        result,
        interpretations,
    })
}

/// Normalize a calculator id for lookup
/// Converts various spellings to kebab-case
pub fn normalize_calculator_id(id: &str) -> String {
    // StraightLineDepreciation -> straight-line-depreciation
    // straight_line_depreciation -> straight-line-depreciation
    // NPV -> npv

    let mut result = String::new();
    let chars: Vec<char> = id.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' || *c == ' ' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches("-calculator").to_string()
}
