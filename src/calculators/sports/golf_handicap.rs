//! Golf handicap index
//!
//! Each round's differential is `(score - course rating) × 113 / slope`.
//! The index averages the lowest differentials of the most recent rounds,
//! how many depends on how many rounds were played:
//!
//! | rounds | used | adjustment |
//! |--------|------|------------|
//! | 3      | 1    | -2.0       |
//! | 4      | 1    | -1.0       |
//! | 5      | 1    |            |
//! | 6      | 2    | -1.0       |
//! | 7-8    | 2    |            |
//! | 9-11   | 3    |            |
//! | 12-14  | 4    |            |
//! | 15-16  | 5    |            |
//! | 17-18  | 6    |            |
//! | 19     | 7    |            |
//! | 20     | 8    |            |

use crate::calculators::base::{CalcResult, Calculator, Category};
use crate::models::{InputRecord, OutputKind, ResultRecord};
use crate::schema::{FieldSpec, Range, Schema};

pub const MIN_ROUNDS: usize = 3;
pub const MAX_ROUNDS: usize = 20;
pub const MAX_HANDICAP_INDEX: f64 = 54.0;

/// Slope rating of a course of standard difficulty
const STANDARD_SLOPE: f64 = 113.0;

/// Differentials counted and adjustment applied for a number of rounds
pub fn differentials_to_use(rounds: usize) -> (usize, f64) {
    match rounds {
        0..=3 => (1, -2.0),
        4 => (1, -1.0),
        5 => (1, 0.0),
        6 => (2, -1.0),
        7..=8 => (2, 0.0),
        9..=11 => (3, 0.0),
        12..=14 => (4, 0.0),
        15..=16 => (5, 0.0),
        17..=18 => (6, 0.0),
        19 => (7, 0.0),
        _ => (8, 0.0),
    }
}

pub fn score_differential(score: f64, course_rating: f64, slope_rating: f64) -> f64 {
    (score - course_rating) * STANDARD_SLOPE / slope_rating
}

pub struct GolfHandicap;

impl Calculator for GolfHandicap {
    fn id(&self) -> &'static str {
        "golf-handicap"
    }

    fn name(&self) -> &'static str {
        "Golf Handicap Index"
    }

    fn description(&self) -> &'static str {
        "Handicap index from recent scores, course rating and slope"
    }

    fn category(&self) -> Category {
        Category::Sports
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(
                FieldSpec::list("scores", MIN_ROUNDS, MAX_ROUNDS, Range::between(40.0, 200.0))
                    .help("Adjusted gross scores, most recent last"),
            )
            .field(FieldSpec::bounded("course_rating", 55.0, 85.0))
            .field(FieldSpec::bounded("slope_rating", 55.0, 155.0))
    }

    fn evaluate(&self, input: &InputRecord) -> CalcResult<ResultRecord> {
        let scores = input.list("scores")?;
        let rating = input.number("course_rating")?;
        let slope = input.number("slope_rating")?;

        let recent = &scores[scores.len().saturating_sub(MAX_ROUNDS)..];
        let mut differentials: Vec<f64> = recent
            .iter()
            .map(|s| score_differential(*s, rating, slope))
            .collect();
        differentials.sort_by(|a, b| a.total_cmp(b));

        let (used, adjustment) = differentials_to_use(differentials.len());
        let average = differentials[..used].iter().sum::<f64>() / used as f64;
        let index = (average + adjustment).min(MAX_HANDICAP_INDEX);

        Ok(ResultRecord::new()
            .number("differentials_used", used as f64, OutputKind::Count)
            .number("average_differential", average, OutputKind::Ratio)
            .number("handicap_index", index, OutputKind::Ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::registry::run_calculator;
    use crate::models::RawInput;

    fn rounds(scores: &str) -> RawInput {
        RawInput::new()
            .with("scores", scores)
            .with("course_rating", 72)
            .with("slope_rating", 113)
    }

    #[test]
    fn test_lookup_table() {
        assert_eq!(differentials_to_use(3), (1, -2.0));
        assert_eq!(differentials_to_use(6), (2, -1.0));
        assert_eq!(differentials_to_use(11), (3, 0.0));
        assert_eq!(differentials_to_use(20), (8, 0.0));
    }

    #[test]
    fn test_three_rounds() {
        let eval = run_calculator(&GolfHandicap, &rounds("90, 85, 95")).unwrap();
        assert_eq!(eval.result.get_number("differentials_used"), Some(1.0));
        assert_eq!(eval.result.get_number("average_differential"), Some(13.0));
        assert_eq!(eval.result.get_number("handicap_index"), Some(11.0));
    }

    #[test]
    fn test_lowest_differentials_averaged() {
        let eval = run_calculator(&GolfHandicap, &rounds("80,82,84,86,88,90,92,94,96")).unwrap();
        // lowest three: 8, 10, 12
        assert_eq!(eval.result.get_number("differentials_used"), Some(3.0));
        assert_eq!(eval.result.get_number("handicap_index"), Some(10.0));
    }

    #[test]
    fn test_index_capped() {
        let eval = run_calculator(&GolfHandicap, &rounds("200,200,200,200,200")).unwrap();
        assert_eq!(eval.result.get_number("handicap_index"), Some(MAX_HANDICAP_INDEX));
    }

    #[test]
    fn test_too_few_rounds_rejected() {
        assert!(run_calculator(&GolfHandicap, &rounds("90,91")).is_err());
    }
}
