//! Input schemas and validation
//!
//! Every calculator declares a [`Schema`]: its fields (type, range,
//! required/default) plus cross-field [`Refinement`]s. [`validate`] turns a
//! [`RawInput`](crate::models::RawInput) into an
//! [`InputRecord`](crate::models::InputRecord) or returns every violation
//! at once so a form can highlight all of them.
//!
//! # Example
//!
//! ```
//! use calcdeck::models::RawInput;
//! use calcdeck::schema::{validate, FieldSpec, Schema};
//!
//! let schema = Schema::new()
//!     .field(FieldSpec::positive("cost"))
//!     .field(FieldSpec::integer("useful_life", 1, 100));
//!
//! let raw = RawInput::new().with("cost", "100000").with("useful_life", "0");
//! let errors = validate(&raw, &schema).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].field, "useful_life");
//! ```

mod error;
mod field;
mod validate;

pub use error::{ValidationError, ViolationKind};
pub use field::{FieldKind, FieldSpec, Limit, Range, Refinement};
pub use validate::validate;

use serde::Serialize;

/// Field and refinement declarations for one calculator
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
    #[serde(skip)]
    pub refinements: Vec<Refinement>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Refinement messages, for describing a calculator
    pub fn rules(&self) -> Vec<&'static str> {
        self.refinements.iter().map(|r| r.message).collect()
    }
}
