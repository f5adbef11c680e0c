//! Property tests over the whole catalog

use calcdeck::calculators::units::{convert, Dimension, UNITS};
use calcdeck::calculators::{Calculator, Registry, RunError};
use calcdeck::interpret::BandSet;
use calcdeck::models::{RawInput, ResultRecord, Value};
use calcdeck::quiz::CATEGORY_BANDS;
use calcdeck::schema::{FieldKind, Limit, Range, Schema, ViolationKind};
use proptest::prelude::*;
use serde_json::json;

/// Schemas have at most this many fields
const MAX_FIELDS: usize = 8;

/// Point at fraction `t` (0..1) of a range; open ends get a 1e6 span
fn sample_in(range: &Range, t: f64) -> f64 {
    let lo = match (range.min, range.max) {
        (Limit::Inclusive(a) | Limit::Exclusive(a), _) => a,
        (Limit::Unbounded, Limit::Inclusive(b) | Limit::Exclusive(b)) => b - 1e6,
        (Limit::Unbounded, Limit::Unbounded) => 0.0,
    };
    let hi = match range.max {
        Limit::Inclusive(b) | Limit::Exclusive(b) => b,
        Limit::Unbounded => lo + 1e6,
    };
    lo + t * (hi - lo)
}

/// Raw input that satisfies every per-field constraint of `schema`.
/// Cross-field refinements may still reject it.
fn input_from_schema(schema: &Schema, fractions: &[f64]) -> RawInput {
    let mut raw = RawInput::new();
    for (i, field) in schema.fields.iter().enumerate() {
        let t = fractions[i % fractions.len()];
        let value = match &field.kind {
            FieldKind::Number { range } => json!(sample_in(range, t)),
            FieldKind::Integer { range } => {
                let lo = sample_in(range, 0.0);
                let hi = sample_in(range, 1.0);
                let n = (lo + (t * (hi - lo + 1.0)).floor()).min(hi);
                json!(n as i64)
            }
            FieldKind::Choice { options } => {
                json!(options[((t * options.len() as f64) as usize).min(options.len() - 1)])
            }
            FieldKind::Flag => json!(t >= 0.5),
            FieldKind::List {
                min_len,
                max_len,
                range,
            } => {
                let span = (max_len - min_len + 1) as f64;
                let len = (min_len + (t * span) as usize).min(*max_len);
                let items: Vec<f64> = (0..len)
                    .map(|k| sample_in(range, (t + k as f64 * 0.37).fract().clamp(0.001, 0.999)))
                    .collect();
                json!(items)
            }
        };
        raw.insert(field.name, value);
    }
    raw
}

/// Bit-exact view of a result, so NaN compares equal to itself
fn fingerprint(result: &ResultRecord) -> Vec<String> {
    let mut out: Vec<String> = result
        .outputs
        .iter()
        .map(|o| match &o.value {
            Value::Number(v) => format!("{}={:x}", o.key, v.to_bits()),
            other => format!("{}={}", o.key, other),
        })
        .collect();
    for table in &result.tables {
        for row in &table.rows {
            let bits: Vec<String> = row.iter().map(|v| format!("{:x}", v.to_bits())).collect();
            out.push(format!("{}:{}", table.name, bits.join(",")));
        }
    }
    out
}

fn all_band_sets() -> Vec<BandSet> {
    let mut sets: Vec<BandSet> = Registry::builtin().iter().flat_map(|c| c.bands()).collect();
    sets.push(CATEGORY_BANDS);
    sets
}

/// Number of bands whose half-open interval [min, previous min) holds `value`
fn matching_bands(bands: &BandSet, value: f64) -> usize {
    let mut upper = f64::INFINITY;
    let mut count = 0;
    for band in bands.bands {
        if value >= band.min && value < upper {
            count += 1;
        }
        upper = band.min;
    }
    count
}

const ASSET_FIELDS: [(&str, f64); 3] = [
    ("cost", 100000.0),
    ("salvage_value", 10000.0),
    ("useful_life", 10.0),
];

proptest! {
    #[test]
    fn every_calculator_is_deterministic(
        fractions in prop::collection::vec(0.001f64..0.999, MAX_FIELDS),
    ) {
        let registry = Registry::builtin();
        for calculator in registry.iter() {
            let raw = input_from_schema(&calculator.schema(), &fractions);
            match (registry.run(calculator.id(), &raw), registry.run(calculator.id(), &raw)) {
                (Ok(first), Ok(second)) => {
                    prop_assert_eq!(
                        fingerprint(&first.result),
                        fingerprint(&second.result),
                        "{}", calculator.id()
                    );
                    prop_assert_eq!(first.interpretations, second.interpretations);
                }
                (Err(RunError::Invalid(first)), Err(RunError::Invalid(second))) => {
                    prop_assert!(
                        first.iter().all(|e| matches!(e.kind, ViolationKind::RefinementViolation { .. })),
                        "{}: {:?}", calculator.id(), first
                    );
                    prop_assert_eq!(first, second);
                }
                (a, b) => prop_assert!(false, "{}: {:?} vs {:?}", calculator.id(), a, b),
            }
        }
    }

    #[test]
    fn forward_rate_settlement_is_finite_or_rejected(
        market in -10.0f64..=100.0,
        agreed in -10.0f64..=100.0,
        from in 0u32..=120,
        to in 1u32..=120,
    ) {
        let raw = RawInput::new()
            .with("notional", 1_000_000)
            .with("agreed_rate", agreed)
            .with("market_rate", market)
            .with("months_from", from)
            .with("months_to", to);
        match Registry::builtin().run("forward-rate-agreement", &raw) {
            Ok(eval) => {
                let amount = eval.result.get_number("settlement_amount").unwrap();
                prop_assert!(amount.is_finite() && amount >= 0.0, "{}", amount);
                prop_assert!(1.0 + market / 100.0 * (to - from) as f64 / 12.0 > 0.0);
            }
            Err(RunError::Invalid(errors)) => {
                prop_assert!(errors.iter().all(|e| e.field == "months_to" || e.field == "market_rate"));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn every_missing_field_is_reported(mask in 0u8..8) {
        let mut raw = RawInput::new();
        let mut dropped = 0;
        for (i, (name, value)) in ASSET_FIELDS.iter().enumerate() {
            if mask & (1 << i) == 0 {
                raw.insert(*name, *value);
            } else {
                dropped += 1;
            }
        }
        match Registry::builtin().run("straight-line-depreciation", &raw) {
            Ok(_) => prop_assert_eq!(dropped, 0),
            Err(RunError::Invalid(errors)) => {
                prop_assert_eq!(errors.len(), dropped);
                prop_assert!(errors.iter().all(|e| e.kind == ViolationKind::MissingField));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn exactly_one_band_matches(value in -1e6f64..1e6) {
        for bands in all_band_sets() {
            prop_assert_eq!(matching_bands(&bands, value), 1, "metric {}", bands.metric);
            prop_assert!(bands.classify(value).is_some());
        }
    }

    #[test]
    fn conversions_round_trip(x in 1e-3f64..1e6) {
        for dimension in Dimension::ALL {
            for a in dimension.units() {
                for b in dimension.units() {
                    let there = convert(x, a, b).unwrap();
                    let back = convert(there, b, a).unwrap();
                    let tolerance = 1e-9 * x.abs().max(1.0);
                    prop_assert!(
                        (back - x).abs() < tolerance,
                        "{} {} -> {} -> {}", x, a.symbol, b.symbol, back
                    );
                }
            }
        }
    }
}

#[test]
fn schema_sampling_reaches_every_calculator() {
    let ascending: Vec<f64> = (1..=MAX_FIELDS).map(|i| i as f64 / 10.0).collect();
    let descending: Vec<f64> = ascending.iter().rev().copied().collect();
    let registry = Registry::builtin();
    for calculator in registry.iter() {
        let schema = calculator.schema();
        assert!(schema.fields.len() <= MAX_FIELDS, "{}", calculator.id());
        let evaluated = [&ascending, &descending].iter().any(|fractions| {
            registry
                .run(calculator.id(), &input_from_schema(&schema, fractions))
                .is_ok()
        });
        assert!(evaluated, "{} rejected every sampled input", calculator.id());
    }
}

#[test]
fn extreme_forward_rates() {
    let registry = Registry::builtin();
    let fra = |market: f64, from: u32, to: u32| {
        RawInput::new()
            .with("notional", 1_000_000)
            .with("agreed_rate", 4.5)
            .with("market_rate", market)
            .with("months_from", from)
            .with("months_to", to)
    };
    // 1 - 0.10 × 10 = 0
    assert!(matches!(
        registry.run("forward-rate-agreement", &fra(-10.0, 0, 120)),
        Err(RunError::Invalid(_))
    ));
    for (market, from, to) in [(-10.0, 0, 119), (-10.0, 6, 9), (100.0, 0, 120), (-0.01, 0, 1)] {
        let eval = registry
            .run("forward-rate-agreement", &fra(market, from, to))
            .unwrap();
        assert!(eval.result.get_number("settlement_amount").unwrap().is_finite());
    }
}

#[test]
fn every_calculator_reports_all_required_fields_when_empty() {
    let registry = Registry::builtin();
    for calculator in registry.iter() {
        let required = calculator.schema().required_fields().count();
        match registry.run(calculator.id(), &RawInput::new()) {
            Err(RunError::Invalid(errors)) => {
                assert_eq!(errors.len(), required, "{}", calculator.id());
                assert!(errors.iter().all(|e| e.is_missing()));
            }
            other => panic!("{}: expected missing fields, got {:?}", calculator.id(), other),
        }
    }
}

#[test]
fn units_table_has_every_dimension() {
    for dimension in Dimension::ALL {
        assert!(UNITS.iter().filter(|u| u.dimension == dimension).count() >= 2);
    }
}
