//! Heart-rate training zones
//!
//! Maximum heart rate is estimated as `220 - age`. Zones are either a
//! straight percentage of the maximum or, with the Karvonen method, a
//! percentage of heart-rate reserve added to the resting rate.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord, Table, Value};
use crate::schema::{FieldSpec, Refinement, Schema};

const METHODS: &[&str] = &["max_percent", "karvonen"];

/// Zone boundaries as fractions of max (or of reserve)
pub const ZONE_BOUNDS: [(f64, f64); 5] = [
    (0.50, 0.60),
    (0.60, 0.70),
    (0.70, 0.80),
    (0.80, 0.90),
    (0.90, 1.00),
];

pub fn max_heart_rate(age: u32) -> f64 {
    220.0 - age as f64
}

fn resting_below_max(input: &InputRecord) -> bool {
    match (input.integer("age"), input.integer("resting_heart_rate")) {
        (Ok(age), Ok(resting)) => (resting as f64) < max_heart_rate(age),
        _ => false,
    }
}

pub struct HeartRateZones;

impl Calculator for HeartRateZones {
    fn id(&self) -> &'static str {
        "heart-rate-zones"
    }

    fn name(&self) -> &'static str {
        "Heart-Rate Zones"
    }

    fn description(&self) -> &'static str {
        "Five training zones from age-predicted maximum heart rate"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::integer("age", 10, 100))
            .field(
                FieldSpec::choice("method", METHODS)
                    .with_default(Value::Text("max_percent".to_string())),
            )
            .field(
                FieldSpec::integer("resting_heart_rate", 30, 120)
                    .with_default(Value::Number(60.0))
                    .help("Used by the Karvonen method"),
            )
            .refine(Refinement {
                field: "resting_heart_rate",
                depends_on: &["age", "resting_heart_rate"],
                message: "resting heart rate must be below the maximum heart rate",
                check: resting_below_max,
            })
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let max_hr = max_heart_rate(input.integer("age")?);
        let resting = input.integer("resting_heart_rate")? as f64;
        let karvonen = input.choice("method")? == "karvonen";

        let bpm = OutputKind::Measure {
            decimals: 0,
            unit: "bpm",
        };
        let mut zones = Table::new(
            "zones",
            &[("zone", OutputKind::Count), ("low_bpm", bpm), ("high_bpm", bpm)],
        );
        for (i, (low, high)) in ZONE_BOUNDS.iter().enumerate() {
            let at = |pct: f64| {
                if karvonen {
                    resting + pct * (max_hr - resting)
                } else {
                    pct * max_hr
                }
            };
            zones.push_row(vec![(i + 1) as f64, at(*low), at(*high)]);
        }

        Ok(ResultRecord::new()
            .number("max_heart_rate", max_hr, bpm)
            .number("heart_rate_reserve", max_hr - resting, bpm)
            .table(zones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::models::RawInput;

    #[test]
    fn test_percent_of_max() {
        let eval = run_calculator(&HeartRateZones, &RawInput::new().with("age", 40)).unwrap();
        assert_eq!(eval.result.get_number("max_heart_rate"), Some(180.0));
        let zones = eval.result.get_table("zones").unwrap();
        assert_eq!(zones.rows.len(), 5);
        assert_eq!(zones.column("low_bpm").unwrap()[0], 90.0);
        assert_eq!(zones.column("high_bpm").unwrap()[4], 180.0);
    }

    #[test]
    fn test_karvonen() {
        let raw = RawInput::new()
            .with("age", 40)
            .with("method", "karvonen")
            .with("resting_heart_rate", 60);
        let eval = run_calculator(&HeartRateZones, &raw).unwrap();
        let zones = eval.result.get_table("zones").unwrap();
        // 60 + 0.5 * 120
        assert_eq!(zones.column("low_bpm").unwrap()[0], 120.0);
    }

    #[test]
    fn test_resting_above_max_rejected() {
        let raw = RawInput::new().with("age", 100).with("resting_heart_rate", 120);
        assert!(run_calculator(&HeartRateZones, &raw).is_err());
    }
}
