//! Threshold bands and result interpretation
//!
//! A [`BandSet`] maps one numeric output to a label plus static advice.
//! Bands are ordered highest threshold first and each band covers
//! `[min, previous band's min)`. The last band's `min` is `-inf`, so a
//! well-formed set partitions the whole number line.
//!
//! ```text
//!   +inf ─┐
//!         │  Band 0   value >= 26.0
//!   26.0 ─┤
//!         │  Band 1   value >= 23.0
//!   23.0 ─┤
//!         │  ...
//!   -inf ─┘  Band n   floor
//! ```

use crate::models::ResultRecord;
use serde::Serialize;

/// Label returned when no band matches (NaN or missing metric)
pub const UNDETERMINED: &str = "Undetermined";

/// One threshold band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    /// Inclusive lower bound
    pub min: f64,
    pub label: &'static str,
    pub recommendations: &'static [&'static str],
}

impl Band {
    pub const fn new(
        min: f64,
        label: &'static str,
        recommendations: &'static [&'static str],
    ) -> Self {
        Self {
            min,
            label,
            recommendations,
        }
    }

    /// Catch-all bottom band
    pub const fn floor(label: &'static str, recommendations: &'static [&'static str]) -> Self {
        Self::new(f64::NEG_INFINITY, label, recommendations)
    }
}

/// Ordered bands over one output of a result record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandSet {
    pub metric: &'static str,
    pub bands: &'static [Band],
}

impl BandSet {
    pub const fn new(metric: &'static str, bands: &'static [Band]) -> Self {
        Self { metric, bands }
    }

    /// True when thresholds strictly descend and the last band is a floor
    pub fn is_partition(&self) -> bool {
        let descending = self.bands.windows(2).all(|w| w[0].min > w[1].min);
        let floored = self
            .bands
            .last()
            .is_some_and(|b| b.min == f64::NEG_INFINITY);
        descending && floored
    }

    /// First band whose lower bound admits `value`
    pub fn classify(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|b| value >= b.min)
    }
}

/// Outcome of interpreting one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub metric: String,
    pub label: String,
    pub recommendations: Vec<String>,
    pub determined: bool,
}

impl Interpretation {
    pub fn undetermined(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            label: UNDETERMINED.to_string(),
            recommendations: Vec::new(),
            determined: false,
        }
    }

    fn from_band(metric: &str, band: &Band) -> Self {
        Self {
            metric: metric.to_string(),
            label: band.label.to_string(),
            recommendations: band.recommendations.iter().map(|r| r.to_string()).collect(),
            determined: true,
        }
    }
}

/// Interpret a raw value directly
pub fn interpret_value(value: f64, bands: &BandSet) -> Interpretation {
    match bands.classify(value) {
        Some(band) => Interpretation::from_band(bands.metric, band),
        None => Interpretation::undetermined(bands.metric),
    }
}

/// Interpret the band set's metric as found in `result`
pub fn interpret(result: &ResultRecord, bands: &BandSet) -> Interpretation {
    match result.get_number(bands.metric) {
        Some(value) => interpret_value(value, bands),
        None => Interpretation::undetermined(bands.metric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputKind;

    const RISK: BandSet = BandSet::new(
        "score",
        &[
            Band::new(70.0, "High risk", &["Take leave"]),
            Band::new(40.0, "Moderate risk", &[]),
            Band::floor("Low risk", &[]),
        ],
    );

    #[test]
    fn test_boundary_resolves_to_higher_band() {
        assert_eq!(RISK.classify(70.0).unwrap().label, "High risk");
        assert_eq!(RISK.classify(69.999).unwrap().label, "Moderate risk");
        assert_eq!(RISK.classify(40.0).unwrap().label, "Moderate risk");
        assert_eq!(RISK.classify(-5.0).unwrap().label, "Low risk");
    }

    #[test]
    fn test_partition_check() {
        assert!(RISK.is_partition());
        const GAPPY: BandSet = BandSet::new("x", &[Band::new(1.0, "a", &[]), Band::new(2.0, "b", &[])]);
        assert!(!GAPPY.is_partition());
        const EMPTY: BandSet = BandSet::new("x", &[]);
        assert!(!EMPTY.is_partition());
    }

    #[test]
    fn test_interpret_reads_metric() {
        let result = ResultRecord::new().number("score", 75.0, OutputKind::Ratio);
        let interpretation = interpret(&result, &RISK);
        assert!(interpretation.determined);
        assert_eq!(interpretation.label, "High risk");
        assert_eq!(interpretation.recommendations, vec!["Take leave"]);
    }

    #[test]
    fn test_undetermined_fallbacks() {
        let missing = interpret(&ResultRecord::new(), &RISK);
        assert_eq!(missing.label, UNDETERMINED);
        assert!(!missing.determined);

        let nan = interpret_value(f64::NAN, &RISK);
        assert_eq!(nan.label, UNDETERMINED);
    }
}
