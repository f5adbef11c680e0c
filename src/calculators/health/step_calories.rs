//! Calories burned walking a number of steps
//!
//! Stride is estimated from height; calories scale with distance and body
//! weight by a pace factor. The stride ratio and pace factors are
//! heuristic constants and are kept as-is.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Value};
use crate::schema::{FieldSpec, Schema};

const PACES: &[&str] = &["slow", "moderate", "brisk"];

/// Stride length as a fraction of height
const STRIDE_TO_HEIGHT: f64 = 0.415;

/// kcal per kg of body weight per km walked
fn pace_factor(pace: &str) -> f64 {
    match pace {
        "slow" => 0.50,
        "brisk" => 0.65,
        _ => 0.57,
    }
}

pub struct StepCalories;

impl Calculator for StepCalories {
    fn id(&self) -> &'static str {
        "step-calories"
    }

    fn name(&self) -> &'static str {
        "Steps to Calories"
    }

    fn description(&self) -> &'static str {
        "Distance and calories burned from a step count"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::integer("steps", 1, 100_000))
            .field(FieldSpec::bounded("weight_kg", 20.0, 400.0))
            .field(FieldSpec::bounded("height_cm", 100.0, 250.0))
            .field(FieldSpec::choice("pace", PACES).with_default(Value::Text("moderate".to_string())))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let steps = input.integer("steps")? as f64;
        let weight = input.number("weight_kg")?;
        let stride_m = input.number("height_cm")? * STRIDE_TO_HEIGHT / 100.0;
        let distance_km = steps * stride_m / 1000.0;
        let calories = distance_km * weight * pace_factor(input.choice("pace")?);

        Ok(ResultRecord::new()
            .number(
                "stride_length",
                stride_m,
                OutputKind::Measure {
                    decimals: 2,
                    unit: "m",
                },
            )
            .number(
                "distance",
                distance_km,
                OutputKind::Measure {
                    decimals: 2,
                    unit: "km",
                },
            )
            .number(
                "calories",
                calories,
                OutputKind::Measure {
                    decimals: 0,
                    unit: "kcal",
                },
            ))
    }
}
