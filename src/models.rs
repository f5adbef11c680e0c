//! Core data models for calcdeck
//!
//! These models are used throughout the codebase for representing
//! calculator inputs (raw and validated) and evaluation results.

use crate::calculators::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single typed value held by an input or result record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
    List(Vec<f64>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Value::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::List(v) => {
                let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

/// Unvalidated submission, exactly as it came from the form or CLI.
///
/// Values are kept as JSON so both `key=value` pairs (strings) and JSON
/// objects (typed) can be fed to the same validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput(BTreeMap<String, serde_json::Value>);

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse `key=value` pairs. Values stay strings; the validator coerces them.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("'{}' is not in key=value form", pair))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(format!("'{}' has an empty key", pair));
            }
            raw.insert(key, value.trim());
        }
        Ok(raw)
    }

    /// Parse a JSON object
    pub fn from_json(text: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| format!("invalid JSON input: {}", e))?;
        match value {
            serde_json::Value::Object(map) => Ok(Self(map.into_iter().collect())),
            _ => Err("JSON input must be an object".to_string()),
        }
    }

    /// Merge another input into this one (other takes priority)
    pub fn merge(&mut self, other: RawInput) {
        self.0.extend(other.0);
    }
}

/// Validated input set for one calculator.
///
/// Only the validator builds these, so every declared field that is
/// required or defaulted is present and in range.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputRecord(BTreeMap<String, Value>);

impl InputRecord {
    pub(crate) fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        read: impl Fn(&'a Value) -> Option<T>,
    ) -> CalcResult<T> {
        let value = self.0.get(key).ok_or_else(|| CalcError::MissingInput {
            field: key.to_string(),
        })?;
        read(value).ok_or_else(|| CalcError::WrongType {
            field: key.to_string(),
            expected,
        })
    }

    pub fn number(&self, key: &str) -> CalcResult<f64> {
        self.typed(key, "number", Value::as_f64)
    }

    /// Whole number field. The validator has already rejected fractions.
    pub fn integer(&self, key: &str) -> CalcResult<u32> {
        let v = self.number(key)?;
        if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
            return Err(CalcError::WrongType {
                field: key.to_string(),
                expected: "non-negative integer",
            });
        }
        Ok(v as u32)
    }

    pub fn choice(&self, key: &str) -> CalcResult<&str> {
        self.typed(key, "choice", Value::as_str)
    }

    pub fn flag(&self, key: &str) -> CalcResult<bool> {
        self.typed(key, "boolean", Value::as_bool)
    }

    pub fn list(&self, key: &str) -> CalcResult<&[f64]> {
        self.typed(key, "list of numbers", Value::as_list)
    }
}

/// How an output should be rounded and labelled by a presenter.
///
/// The core never rounds; this only tells the presentation layer how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OutputKind {
    /// Money, 2 decimals
    Currency,
    /// Dimensionless ratio, 1 decimal
    Ratio,
    /// Percentage, 2 decimals
    Percent,
    /// Physical quantity with a unit
    Measure { decimals: u8, unit: &'static str },
    /// Whole count
    Count,
    /// Free text (categories, directions)
    Label,
}

impl OutputKind {
    pub fn decimals(&self) -> usize {
        match self {
            OutputKind::Currency | OutputKind::Percent => 2,
            OutputKind::Ratio => 1,
            OutputKind::Measure { decimals, .. } => *decimals as usize,
            OutputKind::Count | OutputKind::Label => 0,
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            OutputKind::Percent => Some("%"),
            OutputKind::Measure { unit, .. } if !unit.is_empty() => Some(*unit),
            _ => None,
        }
    }
}

/// One named output of an evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub key: String,
    pub value: Value,
    pub kind: OutputKind,
}

/// A column of a result table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub key: String,
    pub kind: OutputKind,
}

/// Tabular output (schedules, zones, sweeps)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[(&str, OutputKind)]) -> Self {
        Self {
            name: name.into(),
            columns: columns
                .iter()
                .map(|(key, kind)| Column {
                    key: key.to_string(),
                    kind: *kind,
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Values of one column, top to bottom
    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c.key == key)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }
}

/// Outputs of one evaluation, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultRecord {
    pub outputs: Vec<Output>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, key: &str, value: f64, kind: OutputKind) -> Self {
        self.outputs.push(Output {
            key: key.to_string(),
            value: Value::Number(value),
            kind,
        });
        self
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.outputs.push(Output {
            key: key.to_string(),
            value: Value::Text(value.into()),
            kind: OutputKind::Label,
        });
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.outputs.iter().find(|o| o.key == key).map(|o| &o.value)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_input_from_pairs() {
        let raw = RawInput::from_pairs(["cost=100000", " life = 10 "]).unwrap();
        assert_eq!(raw.get("cost"), Some(&serde_json::json!("100000")));
        assert_eq!(raw.get("life"), Some(&serde_json::json!("10")));
        assert!(RawInput::from_pairs(["oops"]).is_err());
        assert!(RawInput::from_pairs(["=5"]).is_err());
    }

    #[test]
    fn test_raw_input_from_json() {
        let raw = RawInput::from_json(r#"{"cost": 5, "sex": "male"}"#).unwrap();
        assert_eq!(raw.len(), 2);
        assert!(RawInput::from_json("[1, 2]").is_err());
        assert!(RawInput::from_json("{").is_err());
    }

    #[test]
    fn test_input_record_accessors() {
        let mut values = BTreeMap::new();
        values.insert("years".to_string(), Value::Number(5.0));
        values.insert("sex".to_string(), Value::Text("male".into()));
        let record = InputRecord::from_values(values);

        assert_eq!(record.integer("years").unwrap(), 5);
        assert_eq!(record.choice("sex").unwrap(), "male");
        assert!(matches!(
            record.number("missing"),
            Err(CalcError::MissingInput { .. })
        ));
        assert!(matches!(
            record.number("sex"),
            Err(CalcError::WrongType { .. })
        ));
    }

    #[test]
    fn test_output_kind_decimals() {
        assert_eq!(OutputKind::Currency.decimals(), 2);
        assert_eq!(OutputKind::Ratio.decimals(), 1);
        assert_eq!(
            OutputKind::Measure {
                decimals: 3,
                unit: "g"
            }
            .decimals(),
            3
        );
        assert_eq!(OutputKind::Percent.unit(), Some("%"));
    }

    #[test]
    fn test_result_record_lookup() {
        let mut table = Table::new("schedule", &[("year", OutputKind::Count)]);
        table.push_row(vec![1.0]);
        table.push_row(vec![2.0]);
        let result = ResultRecord::new()
            .number("ev", 550000.0, OutputKind::Currency)
            .text("direction", "from long to short")
            .table(table);

        assert_eq!(result.get_number("ev"), Some(550000.0));
        assert_eq!(result.get_text("direction"), Some("from long to short"));
        assert_eq!(
            result.get_table("schedule").unwrap().column("year"),
            Some(vec![1.0, 2.0])
        );
        assert!(result.get("missing").is_none());
    }
}
