//! JSON reporter
//!
//! Machine-readable output for piping to jq or further processing. Numbers
//! are emitted unrounded next to their rounded `display` string.

use super::format::format_value;
use super::Document;
use crate::calculators::{Calculator, Evaluation};
use anyhow::Result;
use serde_json::{json, Value as Json};

/// Render a document as pretty-printed JSON
pub fn render(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json(doc))?)
}

fn to_json(doc: &Document) -> Json {
    match doc {
        Document::Evaluation {
            calculator,
            evaluation,
        } => evaluation_json(*calculator, evaluation),
        Document::Invalid { calculator, errors } => json!({
            "calculator": calculator.id(),
            "valid": false,
            "errors": errors,
        }),
        Document::Catalog { calculators } => Json::Array(
            calculators
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id(),
                        "name": c.name(),
                        "category": c.category(),
                        "description": c.description(),
                    })
                })
                .collect(),
        ),
        Document::Describe { calculator } => {
            let schema = calculator.schema();
            json!({
                "id": calculator.id(),
                "name": calculator.name(),
                "category": calculator.category(),
                "description": calculator.description(),
                "fields": schema.fields,
                "rules": schema.rules(),
                "bands": calculator.bands(),
            })
        }
        Document::Conversion {
            value,
            from,
            to,
            converted,
        } => json!({
            "value": value,
            "from": from,
            "to": to,
            "converted": converted,
            "display": format!("{:.3}", converted),
        }),
        Document::Quiz { outcome, report } => json!({
            "outcome": outcome,
            "report": report,
        }),
    }
}

fn evaluation_json(calculator: &dyn Calculator, evaluation: &Evaluation) -> Json {
    let outputs: Vec<Json> = evaluation
        .result
        .outputs
        .iter()
        .map(|o| {
            json!({
                "key": o.key,
                "value": o.value,
                "display": format_value(&o.value, o.kind),
                "kind": o.kind,
            })
        })
        .collect();

    json!({
        "calculator": calculator.id(),
        "name": calculator.name(),
        "valid": true,
        "inputs": evaluation.input,
        "outputs": outputs,
        "tables": evaluation.result.tables,
        "interpretations": evaluation.interpretations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{Registry, RunError};
    use crate::models::RawInput;

    #[test]
    fn test_evaluation_json_keeps_raw_and_display() {
        let registry = Registry::builtin();
        let calculator = registry.get("sum-of-years-digits-depreciation").unwrap();
        let raw = RawInput::new()
            .with("cost", 100000)
            .with("salvage_value", 10000)
            .with("useful_life", 5);
        let evaluation = registry.run("sum-of-years-digits-depreciation", &raw).unwrap();
        let out = render(&Document::Evaluation {
            calculator: calculator.as_ref(),
            evaluation: &evaluation,
        })
        .unwrap();
        let parsed: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["calculator"], "sum-of-years-digits-depreciation");
        assert_eq!(parsed["valid"], true);
        let first = parsed["outputs"]
            .as_array()
            .unwrap()
            .iter()
            .find(|o| o["key"] == "first_year_depreciation")
            .unwrap();
        assert_eq!(first["value"], 30000.0);
        assert_eq!(first["display"], "30,000.00");
        assert_eq!(parsed["tables"][0]["rows"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_invalid_json() {
        let registry = Registry::builtin();
        let calculator = registry.get("inflation").unwrap();
        let raw = RawInput::new()
            .with("amount", 100)
            .with("annual_rate", 3)
            .with("years", 0);
        let Err(RunError::Invalid(errors)) = registry.run("inflation", &raw) else {
            panic!("years = 0 must be rejected");
        };
        let out = render(&Document::Invalid {
            calculator: calculator.as_ref(),
            errors: &errors,
        })
        .unwrap();
        let parsed: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["errors"][0]["field"], "years");
        assert_eq!(parsed["errors"][0]["kind"], "range_violation");
    }

    #[test]
    fn test_catalog_json() {
        let registry = Registry::builtin();
        let calculators: Vec<&dyn Calculator> = registry.iter().map(|c| c.as_ref()).collect();
        let out = render(&Document::Catalog { calculators }).unwrap();
        let parsed: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), registry.len());
    }
}
