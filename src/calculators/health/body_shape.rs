//! Body shape and waist-to-hip ratio
//!
//! Shape is decided by the first matching rule, in this order:
//!
//! ```text
//! apple              waist >= 0.9 × max(bust, hips)
//! hourglass          |bust - hips| <= 5% of hips  and  waist <= 0.75 × min(bust, hips)
//! pear               hips - bust  >  5% of hips
//! inverted triangle  bust - hips  >  5% of hips
//! rectangle          otherwise
//! ```
//!
//! Risk bands use female WHR thresholds. Male ratios are shifted down by
//! 0.10 first, so the same bands read as 0.95 / 0.90 for men.

use super::bmr::SEXES;
use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::interpret::{Band, BandSet};
use crate::models::{InputRecord, OutputKind, ResultRecord, Value};
use crate::schema::{FieldSpec, Schema};

const APPLE_WAIST_SHARE: f64 = 0.9;
const HOURGLASS_WAIST_SHARE: f64 = 0.75;
const BALANCE_TOLERANCE: f64 = 0.05;
const MALE_WHR_OFFSET: f64 = 0.10;

const WHR_BANDS: BandSet = BandSet::new(
    "risk_ratio",
    &[
        Band::new(
            0.85,
            "High risk",
            &[
                "Abdominal fat at this level is linked to cardiovascular and metabolic disease.",
                "Talk to a doctor about screening for blood pressure and blood sugar.",
            ],
        ),
        Band::new(
            0.80,
            "Moderate risk",
            &["Regular activity and a fiber-rich diet help reduce waist circumference."],
        ),
        Band::floor("Low risk", &["Keep up current habits."]),
    ],
);

pub fn body_shape(bust: f64, waist: f64, hips: f64) -> &'static str {
    let tolerance = BALANCE_TOLERANCE * hips;
    if waist >= APPLE_WAIST_SHARE * bust.max(hips) {
        "apple"
    } else if (bust - hips).abs() <= tolerance && waist <= HOURGLASS_WAIST_SHARE * bust.min(hips) {
        "hourglass"
    } else if hips - bust > tolerance {
        "pear"
    } else if bust - hips > tolerance {
        "inverted triangle"
    } else {
        "rectangle"
    }
}

pub struct BodyShape;

impl Calculator for BodyShape {
    fn id(&self) -> &'static str {
        "body-shape"
    }

    fn name(&self) -> &'static str {
        "Body Shape"
    }

    fn description(&self) -> &'static str {
        "Body shape from bust, waist and hip measurements, with waist-to-hip risk"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::bounded("bust_cm", 40.0, 250.0))
            .field(FieldSpec::bounded("waist_cm", 40.0, 250.0))
            .field(FieldSpec::bounded("hips_cm", 40.0, 250.0))
            .field(FieldSpec::choice("sex", SEXES).with_default(Value::Text("female".to_string())))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let bust = input.number("bust_cm")?;
        let waist = input.number("waist_cm")?;
        let hips = input.number("hips_cm")?;
        let whr = waist / hips;
        let risk_ratio = if input.choice("sex")? == "male" {
            whr - MALE_WHR_OFFSET
        } else {
            whr
        };

        Ok(ResultRecord::new()
            .number(
                "waist_to_hip_ratio",
                whr,
                OutputKind::Measure {
                    decimals: 2,
                    unit: "",
                },
            )
            .number(
                "risk_ratio",
                risk_ratio,
                OutputKind::Measure {
                    decimals: 2,
                    unit: "",
                },
            )
            .text("shape", body_shape(bust, waist, hips)))
    }

    fn bands(&self) -> Vec<BandSet> {
        vec![WHR_BANDS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::models::RawInput;

    #[test]
    fn test_shapes() {
        assert_eq!(body_shape(90.0, 85.0, 92.0), "apple");
        assert_eq!(body_shape(92.0, 66.0, 94.0), "hourglass");
        assert_eq!(body_shape(85.0, 70.0, 100.0), "pear");
        assert_eq!(body_shape(105.0, 80.0, 95.0), "inverted triangle");
        assert_eq!(body_shape(92.0, 75.0, 94.0), "rectangle");
    }

    #[test]
    fn test_whr_bands() {
        let raw = RawInput::new()
            .with("bust_cm", 90)
            .with("waist_cm", 70)
            .with("hips_cm", 100);
        let eval = run_calculator(&BodyShape, &raw).unwrap();
        assert_eq!(eval.result.get_number("waist_to_hip_ratio"), Some(0.7));
        assert_eq!(eval.interpretations[0].label, "Low risk");
    }

    #[test]
    fn test_male_thresholds_shifted() {
        let raw = RawInput::new()
            .with("bust_cm", 100)
            .with("waist_cm", 88)
            .with("hips_cm", 100)
            .with("sex", "male");
        let eval = run_calculator(&BodyShape, &raw).unwrap();
        // 0.88 would be high risk for a woman
        assert_eq!(eval.interpretations[0].label, "Low risk");
    }
}
