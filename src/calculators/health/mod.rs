//! Health and fitness calculators

mod bmr;
mod body_shape;
mod burnout;
mod ffmi;
mod heart_rate;
mod step_calories;

pub use bmr::{activity_factor, basal_metabolic_rate, BasalMetabolicRate, DailyCalories, Equation, Sex};
pub use body_shape::{body_shape, BodyShape};
pub use burnout::{burnout_score, BurnoutRisk};
pub use ffmi::FatFreeMassIndex;
pub use heart_rate::{max_heart_rate, HeartRateZones, ZONE_BOUNDS};
pub use step_calories::StepCalories;
