//! Basal metabolic rate and daily calorie needs
//!
//! Two standard equations:
//!
//! ```text
//! Mifflin-St Jeor   10w + 6.25h - 5a + 5     (male)
//!                   10w + 6.25h - 5a - 161   (female)
//! Harris-Benedict   88.362 + 13.397w + 4.799h - 5.677a    (male, revised)
//!                   447.593 + 9.247w + 3.098h - 4.330a    (female, revised)
//! ```
//!
//! w in kg, h in cm, a in years.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Value};
use crate::schema::{FieldSpec, Schema};

pub(crate) const SEXES: &[&str] = &["male", "female"];
const EQUATIONS: &[&str] = &["mifflin", "harris"];
const ACTIVITY_LEVELS: &[&str] = &["sedentary", "light", "moderate", "active", "very_active"];
const GOALS: &[&str] = &["lose", "maintain", "gain"];

/// Daily adjustment applied for a weight goal, kcal
const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

const KCAL_PER_DAY: OutputKind = OutputKind::Measure {
    decimals: 0,
    unit: "kcal/day",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(s: &str) -> Self {
        match s {
            "female" => Sex::Female,
            _ => Sex::Male,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equation {
    MifflinStJeor,
    HarrisBenedict,
}

impl Equation {
    pub fn parse(s: &str) -> Self {
        match s {
            "harris" => Equation::HarrisBenedict,
            _ => Equation::MifflinStJeor,
        }
    }
}

pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: f64, sex: Sex, equation: Equation) -> f64 {
    match (equation, sex) {
        (Equation::MifflinStJeor, Sex::Male) => 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + 5.0,
        (Equation::MifflinStJeor, Sex::Female) => {
            10.0 * weight_kg + 6.25 * height_cm - 5.0 * age - 161.0
        }
        (Equation::HarrisBenedict, Sex::Male) => {
            88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age
        }
        (Equation::HarrisBenedict, Sex::Female) => {
            447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age
        }
    }
}

/// Total daily energy expenditure multiplier
pub fn activity_factor(level: &str) -> f64 {
    match level {
        "light" => 1.375,
        "moderate" => 1.55,
        "active" => 1.725,
        "very_active" => 1.9,
        _ => 1.2,
    }
}

fn body_schema() -> Schema {
    Schema::new()
        .field(FieldSpec::bounded("weight_kg", 20.0, 400.0))
        .field(FieldSpec::bounded("height_cm", 100.0, 250.0))
        .field(FieldSpec::integer("age", 15, 100))
        .field(FieldSpec::choice("sex", SEXES))
        .field(
            FieldSpec::choice("equation", EQUATIONS)
                .with_default(Value::Text("mifflin".to_string())),
        )
}

fn bmr_from_input(input: &InputRecord) -> CalcResult<f64> {
    Ok(basal_metabolic_rate(
        input.number("weight_kg")?,
        input.number("height_cm")?,
        input.integer("age")? as f64,
        Sex::parse(input.choice("sex")?),
        Equation::parse(input.choice("equation")?),
    ))
}

pub struct BasalMetabolicRate;

impl Calculator for BasalMetabolicRate {
    fn id(&self) -> &'static str {
        "bmr"
    }

    fn name(&self) -> &'static str {
        "Basal Metabolic Rate"
    }

    fn description(&self) -> &'static str {
        "Calories burned at complete rest (Mifflin-St Jeor or Harris-Benedict)"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        body_schema()
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        Ok(ResultRecord::new().number("bmr", bmr_from_input(input)?, KCAL_PER_DAY))
    }
}

pub struct DailyCalories;

impl Calculator for DailyCalories {
    fn id(&self) -> &'static str {
        "daily-calories"
    }

    fn name(&self) -> &'static str {
        "Daily Calorie Needs"
    }

    fn description(&self) -> &'static str {
        "Maintenance and goal calories from BMR and activity level"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        body_schema()
            .field(FieldSpec::choice("activity", ACTIVITY_LEVELS))
            .field(FieldSpec::choice("goal", GOALS).with_default(Value::Text("maintain".to_string())))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let bmr = bmr_from_input(input)?;
        let maintenance = bmr * activity_factor(input.choice("activity")?);
        let target = match input.choice("goal")? {
            "lose" => maintenance - GOAL_ADJUSTMENT_KCAL,
            "gain" => maintenance + GOAL_ADJUSTMENT_KCAL,
            _ => maintenance,
        };

        Ok(ResultRecord::new()
            .number("bmr", bmr, KCAL_PER_DAY)
            .number("maintenance_calories", maintenance, KCAL_PER_DAY)
            .number("target_calories", target, KCAL_PER_DAY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::models::RawInput;

    #[test]
    fn test_mifflin() {
        // 70 kg, 175 cm, 30 y male: 700 + 1093.75 - 150 + 5
        let bmr = basal_metabolic_rate(70.0, 175.0, 30.0, Sex::Male, Equation::MifflinStJeor);
        assert!((bmr - 1648.75).abs() < 1e-9);
        let bmr = basal_metabolic_rate(70.0, 175.0, 30.0, Sex::Female, Equation::MifflinStJeor);
        assert!((bmr - 1482.75).abs() < 1e-9);
    }

    #[test]
    fn test_harris_benedict() {
        let bmr = basal_metabolic_rate(70.0, 175.0, 30.0, Sex::Male, Equation::HarrisBenedict);
        assert!((bmr - 1695.667).abs() < 1e-3);
    }

    #[test]
    fn test_daily_calories_goal() {
        let raw = RawInput::new()
            .with("weight_kg", 70)
            .with("height_cm", 175)
            .with("age", 30)
            .with("sex", "male")
            .with("activity", "moderate")
            .with("goal", "lose");
        let eval = run_calculator(&DailyCalories, &raw).unwrap();
        let maintenance = eval.result.get_number("maintenance_calories").unwrap();
        assert!((maintenance - 1648.75 * 1.55).abs() < 1e-9);
        let target = eval.result.get_number("target_calories").unwrap();
        assert!((target - (maintenance - 500.0)).abs() < 1e-9);
    }

    #[test]
    fn test_sex_required() {
        let raw = RawInput::new()
            .with("weight_kg", 70)
            .with("height_cm", 175)
            .with("age", 30);
        assert!(run_calculator(&BasalMetabolicRate, &raw).is_err());
    }
}
