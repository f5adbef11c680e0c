//! Schema validation
//!
//! Per-field checks run first and collect every failure. Refinements run
//! afterwards, and only those whose inputs all passed.

use super::error::{ValidationError, ViolationKind};
use super::field::{FieldKind, FieldSpec, Range};
use super::Schema;
use crate::models::{InputRecord, RawInput, Value};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Validate a raw submission against a schema.
///
/// Returns every violated constraint, in field declaration order, followed
/// by unknown keys and failed refinements.
pub fn validate(raw: &RawInput, schema: &Schema) -> Result<InputRecord, Vec<ValidationError>> {
    let mut values: BTreeMap<String, Value> = BTreeMap::new();
    let mut errors = Vec::new();
    let mut failed: HashSet<&str> = HashSet::new();

    for spec in &schema.fields {
        match raw.get(spec.name).filter(|v| !is_blank(v)) {
            Some(value) => match coerce(spec, value) {
                Ok(v) => {
                    values.insert(spec.name.to_string(), v);
                }
                Err(kind) => {
                    failed.insert(spec.name);
                    errors.push(ValidationError::new(spec.name, kind));
                }
            },
            None => {
                if let Some(default) = &spec.default {
                    values.insert(spec.name.to_string(), default.clone());
                } else if spec.required {
                    failed.insert(spec.name);
                    errors.push(ValidationError::new(spec.name, ViolationKind::MissingField));
                }
            }
        }
    }

    for key in raw.keys() {
        if schema.get(key).is_none() {
            errors.push(ValidationError::new(key, ViolationKind::UnknownField));
        }
    }

    let record = InputRecord::from_values(values);

    for refinement in &schema.refinements {
        let ready = refinement
            .depends_on
            .iter()
            .all(|dep| record.contains(dep) && !failed.contains(dep));
        if !ready {
            debug!(
                "Skipping refinement on '{}': inputs incomplete",
                refinement.field
            );
            continue;
        }
        if !(refinement.check)(&record) {
            errors.push(ValidationError::new(
                refinement.field,
                ViolationKind::RefinementViolation {
                    message: refinement.message.to_string(),
                },
            ));
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        debug!("Validation failed with {} error(s)", errors.len());
        Err(errors)
    }
}

/// Null and empty strings count as "not submitted"
fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn coerce(spec: &FieldSpec, value: &serde_json::Value) -> Result<Value, ViolationKind> {
    match &spec.kind {
        FieldKind::Number { range } => {
            let v = read_number(value)?;
            check_range(v, range)?;
            Ok(Value::Number(v))
        }
        FieldKind::Integer { range } => {
            let v = read_number(value)?;
            if v.fract() != 0.0 {
                return Err(ViolationKind::NotInteger);
            }
            check_range(v, range)?;
            Ok(Value::Number(v))
        }
        FieldKind::Choice { options } => {
            let text = value.as_str().ok_or(ViolationKind::InvalidType {
                expected: "choice",
            })?;
            let wanted = normalize_choice(text);
            options
                .iter()
                .find(|o| **o == wanted)
                .map(|o| Value::Text(o.to_string()))
                .ok_or_else(|| ViolationKind::InvalidChoice {
                    options: options.iter().map(|o| o.to_string()).collect(),
                })
        }
        FieldKind::Flag => read_flag(value).map(Value::Bool),
        FieldKind::List {
            min_len,
            max_len,
            range,
        } => {
            let items = read_list(value)?;
            if items.len() < *min_len || items.len() > *max_len {
                return Err(ViolationKind::LengthViolation {
                    min: *min_len,
                    max: *max_len,
                });
            }
            if let Some(bad) = items.iter().find(|v| !range.contains(**v)) {
                return Err(ViolationKind::RangeViolation {
                    constraint: format!("{} (got {})", range.describe(), bad),
                });
            }
            Ok(Value::List(items))
        }
    }
}

fn check_range(v: f64, range: &Range) -> Result<(), ViolationKind> {
    if range.contains(v) {
        Ok(())
    } else {
        Err(ViolationKind::RangeViolation {
            constraint: range.describe(),
        })
    }
}

fn read_number(value: &serde_json::Value) -> Result<f64, ViolationKind> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_number(s),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or(ViolationKind::InvalidType { expected: "number" })
}

/// Accepts thousands separators and a trailing percent sign
fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();
    cleaned.trim().parse::<f64>().ok()
}

fn read_flag(value: &serde_json::Value) -> Result<bool, ViolationKind> {
    let err = ViolationKind::InvalidType { expected: "boolean" };
    match value {
        serde_json::Value::Bool(b) => Ok(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Ok(true),
            Some(v) if v == 0.0 => Ok(false),
            _ => Err(err),
        },
        serde_json::Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(err),
        },
        _ => Err(err),
    }
}

fn read_list(value: &serde_json::Value) -> Result<Vec<f64>, ViolationKind> {
    let err = || ViolationKind::InvalidType {
        expected: "list of numbers",
    };
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| read_number(item).map_err(|_| err()))
            .collect(),
        serde_json::Value::String(s) => s
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(err)
            })
            .collect(),
        serde_json::Value::Number(_) => read_number(value).map(|v| vec![v]),
        _ => Err(err()),
    }
}

/// "Very Active" and "very-active" both select `very_active`
fn normalize_choice(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Refinement;

    fn asset_schema() -> Schema {
        Schema::new()
            .field(FieldSpec::positive("cost"))
            .field(FieldSpec::non_negative("salvage_value"))
            .field(FieldSpec::integer("useful_life", 1, 100))
            .refine(Refinement {
                field: "salvage_value",
                depends_on: &["cost", "salvage_value"],
                message: "salvage value must be less than cost",
                check: |r| r.number("salvage_value").ok() < r.number("cost").ok(),
            })
    }

    #[test]
    fn test_valid_input_passes() {
        let raw = RawInput::new()
            .with("cost", "100000")
            .with("salvage_value", 10000)
            .with("useful_life", "10");
        let record = validate(&raw, &asset_schema()).unwrap();
        assert_eq!(record.number("cost").unwrap(), 100000.0);
        assert_eq!(record.integer("useful_life").unwrap(), 10);
    }

    #[test]
    fn test_reports_every_missing_field() {
        let errors = validate(&RawInput::new(), &asset_schema()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.is_missing()));
    }

    #[test]
    fn test_refinement_is_strict() {
        let raw = RawInput::new()
            .with("cost", 5000)
            .with("salvage_value", 5000)
            .with("useful_life", 5);
        let errors = validate(&raw, &asset_schema()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "salvage_value");
        assert!(matches!(
            errors[0].kind,
            ViolationKind::RefinementViolation { .. }
        ));
    }

    #[test]
    fn test_refinement_skipped_when_inputs_fail() {
        let raw = RawInput::new()
            .with("cost", "-1")
            .with("salvage_value", 5000)
            .with("useful_life", 5);
        let errors = validate(&raw, &asset_schema()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "cost");
    }

    #[test]
    fn test_integer_and_range_checks() {
        let raw = RawInput::new()
            .with("cost", "abc")
            .with("salvage_value", 0)
            .with("useful_life", "2.5");
        let errors = validate(&raw, &asset_schema()).unwrap_err();
        assert_eq!(
            errors[0].kind,
            ViolationKind::InvalidType { expected: "number" }
        );
        assert_eq!(errors[1].kind, ViolationKind::NotInteger);
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let raw = RawInput::new()
            .with("cost", "  ")
            .with("salvage_value", serde_json::Value::Null)
            .with("useful_life", 3);
        let errors = validate(&raw, &asset_schema()).unwrap_err();
        assert_eq!(errors.iter().filter(|e| e.is_missing()).count(), 2);
    }

    #[test]
    fn test_unknown_field_reported() {
        let raw = RawInput::new()
            .with("cost", 10)
            .with("salvage_value", 1)
            .with("useful_life", 3)
            .with("colour", "red");
        let errors = validate(&raw, &asset_schema()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::UnknownField);
    }

    #[test]
    fn test_defaults_and_choices() {
        let schema = Schema::new()
            .field(FieldSpec::choice("activity", &["sedentary", "very_active"]))
            .field(FieldSpec::bounded("multiplier", 1.0, 3.0).with_default(Value::Number(2.0)))
            .field(FieldSpec::flag("metric").optional());
        let raw = RawInput::new().with("activity", "Very Active");
        let record = validate(&raw, &schema).unwrap();
        assert_eq!(record.choice("activity").unwrap(), "very_active");
        assert_eq!(record.number("multiplier").unwrap(), 2.0);
        assert!(!record.contains("metric"));

        let raw = RawInput::new().with("activity", "couch").with("metric", "maybe");
        let errors = validate(&raw, &schema).unwrap_err();
        assert!(matches!(errors[0].kind, ViolationKind::InvalidChoice { .. }));
        assert_eq!(
            errors[1].kind,
            ViolationKind::InvalidType { expected: "boolean" }
        );
    }

    #[test]
    fn test_list_parsing() {
        let schema = Schema::new().field(FieldSpec::list("scores", 3, 5, Range::between(40.0, 200.0)));

        let raw = RawInput::new().with("scores", "85, 90,88");
        let record = validate(&raw, &schema).unwrap();
        assert_eq!(record.list("scores").unwrap(), &[85.0, 90.0, 88.0]);

        let raw = RawInput::new().with("scores", serde_json::json!([85, 90]));
        let errors = validate(&raw, &schema).unwrap_err();
        assert_eq!(
            errors[0].kind,
            ViolationKind::LengthViolation { min: 3, max: 5 }
        );

        let raw = RawInput::new().with("scores", "85,90,300");
        let errors = validate(&raw, &schema).unwrap_err();
        assert!(matches!(errors[0].kind, ViolationKind::RangeViolation { .. }));
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("1,000,000"), Some(1_000_000.0));
        assert_eq!(parse_number("4.5%"), Some(4.5));
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("twelve"), None);
    }
}
