//! Fat-free mass index
//!
//! FFMI = lean mass / height², normalized to a 1.8 m reference height with
//! `FFMI + 6.1 × (1.8 - h)`. Bands follow the usual (editorial) scale for
//! men and are kept as published.

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::interpret::{Band, BandSet};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Schema};

const REFERENCE_HEIGHT_M: f64 = 1.8;
const HEIGHT_CORRECTION: f64 = 6.1;

const FFMI_BANDS: BandSet = BandSet::new(
    "normalized_ffmi",
    &[
        Band::new(
            26.0,
            "Suspicious",
            &["Values this high are rarely reached without performance-enhancing drugs; double-check the body fat estimate."],
        ),
        Band::new(23.0, "Superior", &["Near the natural ceiling for most people."]),
        Band::new(22.0, "Excellent", &["Well above average muscularity."]),
        Band::new(20.0, "Above average", &["Consistent training shows."]),
        Band::new(18.0, "Average", &["Typical for adults who train occasionally."]),
        Band::floor(
            "Below average",
            &["Resistance training and adequate protein raise lean mass over time."],
        ),
    ],
);

pub struct FatFreeMassIndex;

impl Calculator for FatFreeMassIndex {
    fn id(&self) -> &'static str {
        "ffmi"
    }

    fn name(&self) -> &'static str {
        "Fat-Free Mass Index"
    }

    fn description(&self) -> &'static str {
        "Lean mass relative to height, with the 1.8 m height normalization"
    }

    fn category(&self) -> Category {
        Category::Health
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::bounded("weight_kg", 20.0, 400.0))
            .field(FieldSpec::bounded("height_cm", 100.0, 250.0))
            .field(FieldSpec::bounded("body_fat", 3.0, 60.0).help("Body fat, %"))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let weight = input.number("weight_kg")?;
        let height_m = input.number("height_cm")? / 100.0;
        let body_fat = input.number("body_fat")? / 100.0;

        let lean_mass = weight * (1.0 - body_fat);
        let ffmi = lean_mass / (height_m * height_m);
        let normalized = ffmi + HEIGHT_CORRECTION * (REFERENCE_HEIGHT_M - height_m);

        Ok(ResultRecord::new()
            .number(
                "lean_mass",
                lean_mass,
                OutputKind::Measure {
                    decimals: 1,
                    unit: "kg",
                },
            )
            .number("ffmi", ffmi, OutputKind::Ratio)
            .number("normalized_ffmi", normalized, OutputKind::Ratio))
    }

    fn bands(&self) -> Vec<BandSet> {
        vec![FFMI_BANDS]
    }
}
