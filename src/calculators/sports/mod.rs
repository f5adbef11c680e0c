//! Sports calculators

mod golf_handicap;

pub use golf_handicap::{
    differentials_to_use, score_differential, GolfHandicap, MAX_HANDICAP_INDEX, MAX_ROUNDS,
    MIN_ROUNDS,
};
