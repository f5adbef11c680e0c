//! Burnout risk score
//!
//! An additive heuristic on a 0..=100 scale. Weights are fixed and kept
//! exactly as listed below.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::interpret::{Band, BandSet};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Schema};

const STANDARD_WEEK_HOURS: f64 = 40.0;
const OVERTIME_WEIGHT: f64 = 1.5;
const OVERTIME_CAP: f64 = 30.0;
const RECOMMENDED_SLEEP_HOURS: f64 = 8.0;
const SLEEP_DEBT_WEIGHT: f64 = 5.0;
const SLEEP_DEBT_CAP: f64 = 25.0;
const STRESS_WEIGHT: f64 = 3.0;
const TARGET_EXERCISE_DAYS: u32 = 3;
const MISSED_EXERCISE_WEIGHT: f64 = 5.0;

const BURNOUT_BANDS: BandSet = BandSet::new(
    "score",
    &[
        Band::new(
            70.0,
            "High risk",
            &[
                "Reduce working hours where you can and protect time off.",
                "Talk to a healthcare professional or counselor.",
                "Prioritize sleep over evening work.",
            ],
        ),
        Band::new(
            40.0,
            "Moderate risk",
            &[
                "Set firm boundaries around work hours.",
                "Schedule at least three active days per week.",
            ],
        ),
        Band::floor(
            "Low risk",
            &["Current workload looks sustainable; keep monitoring stress."],
        ),
    ],
);

pub fn burnout_score(weekly_hours: f64, sleep_hours: f64, stress: u32, exercise_days: u32) -> f64 {
    let overtime = (OVERTIME_WEIGHT * (weekly_hours - STANDARD_WEEK_HOURS).max(0.0)).min(OVERTIME_CAP);
    let sleep_debt =
        (SLEEP_DEBT_WEIGHT * (RECOMMENDED_SLEEP_HOURS - sleep_hours).max(0.0)).min(SLEEP_DEBT_CAP);
    let stress = STRESS_WEIGHT * stress as f64;
    let missed = TARGET_EXERCISE_DAYS - exercise_days.min(TARGET_EXERCISE_DAYS);
    overtime + sleep_debt + stress + MISSED_EXERCISE_WEIGHT * missed as f64
}

pub struct BurnoutRisk;

impl Calculator for BurnoutRisk {
    fn id(&self) -> &'static str {
        "burnout-risk"
    }

    fn name(&self) -> &'static str {
        "Burnout Risk"
    }

    fn description(&self) -> &'static str {
        "Heuristic burnout score from workload, sleep, stress and exercise"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::bounded("weekly_hours", 0.0, 120.0).help("Hours worked per week"))
            .field(FieldSpec::bounded("sleep_hours", 0.0, 24.0).help("Average sleep per night"))
            .field(FieldSpec::integer("stress_level", 1, 10))
            .field(FieldSpec::integer("exercise_days", 0, 7).help("Active days per week"))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let score = burnout_score(
            input.number("weekly_hours")?,
            input.number("sleep_hours")?,
            input.integer("stress_level")?,
            input.integer("exercise_days")?,
        );
        Ok(ResultRecord::new().number("score", score, OutputKind::Count))
    }

    fn bands(&self) -> Vec<BandSet> {
        vec![BURNOUT_BANDS]
    }
}
