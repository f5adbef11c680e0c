//! Validation error types

use serde::Serialize;
use thiserror::Error;

/// What went wrong with a field
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ViolationKind {
    #[error("is required")]
    MissingField,

    #[error("must be a {expected}")]
    InvalidType { expected: &'static str },

    #[error("must be a whole number")]
    NotInteger,

    #[error("must be {constraint}")]
    RangeViolation { constraint: String },

    #[error("must be one of: {}", .options.join(", "))]
    InvalidChoice { options: Vec<String> },

    #[error("must have between {min} and {max} entries")]
    LengthViolation { min: usize, max: usize },

    #[error("is not an input of this calculator")]
    UnknownField,

    #[error("{message}")]
    RefinementViolation { message: String },
}

/// A violated constraint, attached to the field a form should highlight
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{field} {kind}")]
pub struct ValidationError {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ViolationKind::MissingField)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::new("years", ViolationKind::MissingField);
        assert_eq!(err.to_string(), "years is required");

        let err = ValidationError::new(
            "sex",
            ViolationKind::InvalidChoice {
                options: vec!["male".into(), "female".into()],
            },
        );
        assert_eq!(err.to_string(), "sex must be one of: male, female");
    }

    #[test]
    fn test_error_serializes_flat() {
        let err = ValidationError::new(
            "years",
            ViolationKind::RangeViolation {
                constraint: "between 1 and 200".into(),
            },
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "years");
        assert_eq!(json["kind"], "range_violation");
        assert_eq!(json["constraint"], "between 1 and 200");
    }
}
