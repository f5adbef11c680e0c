//! Presentation rounding and labels
//!
//! The only place numbers are rounded. Each [`OutputKind`] fixes the number
//! of decimals: currency 2, ratio 1, percent 2, measures as declared.

use crate::models::{OutputKind, Value};

/// Format a number for display according to its kind
pub fn format_number(value: f64, kind: OutputKind) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let fixed = fixed(value, kind.decimals());
    let fixed = match kind {
        OutputKind::Currency => group_thousands(&fixed),
        _ => fixed,
    };
    match kind.unit() {
        Some("%") => format!("{}%", fixed),
        Some(unit) => format!("{} {}", fixed, unit),
        None => fixed,
    }
}

/// Format any output value
pub fn format_value(value: &Value, kind: OutputKind) -> String {
    match value {
        Value::Number(v) => format_number(*v, kind),
        other => other.to_string(),
    }
}

/// Fixed decimals without a "-0.00"
fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// `annual_depreciation` -> `Annual depreciation`
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
