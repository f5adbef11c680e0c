//! Field declarations and cross-field refinements

use crate::models::{InputRecord, Value};
use serde::Serialize;

/// One end of a numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Limit {
    Inclusive(f64),
    Exclusive(f64),
    Unbounded,
}

impl Limit {
    fn allows_above(&self, v: f64) -> bool {
        match self {
            Limit::Inclusive(min) => v >= *min,
            Limit::Exclusive(min) => v > *min,
            Limit::Unbounded => true,
        }
    }

    fn allows_below(&self, v: f64) -> bool {
        match self {
            Limit::Inclusive(max) => v <= *max,
            Limit::Exclusive(max) => v < *max,
            Limit::Unbounded => true,
        }
    }
}

/// Numeric range with independently open or closed ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: Limit,
    pub max: Limit,
}

impl Range {
    pub const ANY: Range = Range {
        min: Limit::Unbounded,
        max: Limit::Unbounded,
    };

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Limit::Inclusive(min),
            max: Limit::Inclusive(max),
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min.allows_above(v) && self.max.allows_below(v)
    }

    /// Human-readable constraint, e.g. "greater than 0"
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Limit::Inclusive(a), Limit::Inclusive(b)) => format!("between {} and {}", a, b),
            (Limit::Exclusive(a), Limit::Inclusive(b)) => {
                format!("greater than {} and at most {}", a, b)
            }
            (Limit::Inclusive(a), Limit::Exclusive(b)) => {
                format!("at least {} and less than {}", a, b)
            }
            (Limit::Exclusive(a), Limit::Exclusive(b)) => {
                format!("greater than {} and less than {}", a, b)
            }
            (Limit::Inclusive(a), Limit::Unbounded) => format!("at least {}", a),
            (Limit::Exclusive(a), Limit::Unbounded) => format!("greater than {}", a),
            (Limit::Unbounded, Limit::Inclusive(b)) => format!("at most {}", b),
            (Limit::Unbounded, Limit::Exclusive(b)) => format!("less than {}", b),
            (Limit::Unbounded, Limit::Unbounded) => "a number".to_string(),
        }
    }
}

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FieldKind {
    Number { range: Range },
    Integer { range: Range },
    Choice { options: &'static [&'static str] },
    Flag,
    List {
        min_len: usize,
        max_len: usize,
        range: Range,
    },
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Number { .. } => "number",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Choice { .. } => "choice",
            FieldKind::Flag => "boolean",
            FieldKind::List { .. } => "list of numbers",
        }
    }

    /// Accepted values, for help output
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Number { range } | FieldKind::Integer { range } => range.describe(),
            FieldKind::Choice { options } => options.join(" | "),
            FieldKind::Flag => "true | false".to_string(),
            FieldKind::List {
                min_len,
                max_len,
                range,
            } => format!("{} to {} values, each {}", min_len, max_len, range.describe()),
        }
    }
}

/// Declaration of one input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub help: &'static str,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            help: "",
        }
    }

    /// Any number within `range`
    pub fn number(name: &'static str, range: Range) -> Self {
        Self::new(name, FieldKind::Number { range })
    }

    /// Strictly greater than zero
    pub fn positive(name: &'static str) -> Self {
        Self::number(
            name,
            Range {
                min: Limit::Exclusive(0.0),
                max: Limit::Unbounded,
            },
        )
    }

    /// Zero or more
    pub fn non_negative(name: &'static str) -> Self {
        Self::number(
            name,
            Range {
                min: Limit::Inclusive(0.0),
                max: Limit::Unbounded,
            },
        )
    }

    /// Closed interval `[min, max]`
    pub fn bounded(name: &'static str, min: f64, max: f64) -> Self {
        Self::number(name, Range::between(min, max))
    }

    /// Whole number in `[min, max]`
    pub fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self::new(
            name,
            FieldKind::Integer {
                range: Range::between(min as f64, max as f64),
            },
        )
    }

    pub fn choice(name: &'static str, options: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::Choice { options })
    }

    pub fn flag(name: &'static str) -> Self {
        Self::new(name, FieldKind::Flag)
    }

    /// Comma-separated list of numbers, each in `range`
    pub fn list(name: &'static str, min_len: usize, max_len: usize, range: Range) -> Self {
        Self::new(
            name,
            FieldKind::List {
                min_len,
                max_len,
                range,
            },
        )
    }

    /// Field may be omitted
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Field may be omitted and takes `value` when it is
    pub fn with_default(mut self, value: Value) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }
}

/// Cross-field rule.
///
/// `check` only runs once every field in `depends_on` passed its own
/// checks; a failure is reported against `field`.
#[derive(Clone)]
pub struct Refinement {
    pub field: &'static str,
    pub depends_on: &'static [&'static str],
    pub message: &'static str,
    pub check: fn(&InputRecord) -> bool,
}

impl std::fmt::Debug for Refinement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refinement")
            .field("field", &self.field)
            .field("depends_on", &self.depends_on)
            .field("message", &self.message)
            .finish()
    }
}
