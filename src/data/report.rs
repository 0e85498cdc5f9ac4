use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

use super::force::{ForcePlot, PlotError};
use super::model::{Feature, Observation};
use super::predict::ResultBundle;

// ---------------------------------------------------------------------------
// Report – everything the results panel draws, as plain data
// ---------------------------------------------------------------------------

/// Render description for one triggered prediction.
#[derive(Debug)]
pub struct Report {
    /// `Prediction: 123.45`
    pub prediction_text: String,
    /// Comma-joined keys of the raw observation.
    pub input_keys: String,
    pub input_json: String,
    /// Comma-joined keys of the features the model used.
    pub selected_keys: String,
    pub selected_json: String,
    pub plot: Result<ForcePlot, PlotError>,
    /// `KEY: score` per selected feature.
    pub detail_lines: Vec<String>,
}

impl Report {
    pub fn compose(observation: &Observation, bundle: &ResultBundle) -> Result<Self> {
        let raw = observation.entries();
        let selected_row = observation.select(&bundle.features);

        let input_json = serde_json::to_string_pretty(observation)
            .context("serializing model input")?;
        let selected_json = serde_json::to_string_pretty(&OrderedRow(&selected_row))
            .context("serializing selected features")?;

        let plot = ForcePlot::new(bundle.base_value, &bundle.attributions, &selected_row);
        if let Err(e) = &plot {
            log::error!("Cannot build force plot: {e}");
        }

        let detail_lines = bundle
            .pairs()
            .map(|(feature, score)| format!("{}: {}", feature.key(), score))
            .collect();

        Ok(Report {
            prediction_text: format!("Prediction: {:?}", round2(bundle.prediction)),
            input_keys: join_keys(raw.iter().map(|(f, _)| *f)),
            input_json,
            selected_keys: join_keys(bundle.features.iter().copied()),
            selected_json,
            plot,
            detail_lines,
        })
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn join_keys(features: impl Iterator<Item = Feature>) -> String {
    features.map(Feature::key).collect::<Vec<_>>().join(", ")
}

/// Serializes `(feature, value)` pairs as a JSON object, keeping their order.
struct OrderedRow<'a>(&'a [(Feature, f64)]);

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(f, v)| (f, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::predict::{Predictor, StubPredictor};

    fn stub_report() -> Report {
        let obs = Observation::default();
        let bundle = StubPredictor.predict(&obs);
        Report::compose(&obs, &bundle).unwrap()
    }

    #[test]
    fn prediction_is_rounded_to_two_decimals() {
        assert_eq!(stub_report().prediction_text, "Prediction: 123.45");
        assert_eq!(round2(1.23456), 1.23);
    }

    #[test]
    fn detail_pairs_each_feature_with_its_score() {
        assert_eq!(
            stub_report().detail_lines,
            ["AT: 0.1", "V: -0.2", "AP: 0.05", "RH: 0.1"]
        );
    }

    #[test]
    fn input_listing_keeps_column_order() {
        let report = stub_report();
        assert_eq!(report.input_keys, "AT, V, AP, RH");
        let parsed: serde_json::Value = serde_json::from_str(&report.input_json).unwrap();
        assert_eq!(parsed["AP"], 1013.0);
        let first = report.input_json.find("\"AT\"").unwrap();
        let last = report.input_json.find("\"RH\"").unwrap();
        assert!(first < last);
    }

    #[test]
    fn selected_features_are_ordered_subset_of_inputs() {
        let report = stub_report();
        let raw: Vec<&str> = report.input_keys.split(", ").collect();
        let selected: Vec<&str> = report.selected_keys.split(", ").collect();
        let mut cursor = raw.iter();
        for key in &selected {
            assert!(cursor.any(|k| k == key), "{key} out of order or missing");
        }
    }

    #[test]
    fn partial_selection_only_lists_chosen_features() {
        let obs = Observation::default();
        let bundle = ResultBundle {
            prediction: 450.0,
            base_value: 454.0,
            features: vec![Feature::AmbientTemperature, Feature::RelativeHumidity],
            attributions: vec![-5.0, 1.0],
        };
        let report = Report::compose(&obs, &bundle).unwrap();
        assert_eq!(report.selected_keys, "AT, RH");
        assert_eq!(report.selected_json, "{\n  \"AT\": 25.0,\n  \"RH\": 75.0\n}");
        assert_eq!(report.prediction_text, "Prediction: 450.0");
        assert!(report.plot.is_ok());
    }

    #[test]
    fn mismatched_bundle_still_reports_but_plot_fails() {
        let obs = Observation::default();
        let bundle = ResultBundle {
            prediction: 1.0,
            base_value: 0.0,
            features: Feature::ALL.to_vec(),
            attributions: vec![0.1],
        };
        let report = Report::compose(&obs, &bundle).unwrap();
        assert!(matches!(report.plot, Err(PlotError::ShapeMismatch { .. })));
        assert_eq!(report.detail_lines, ["AT: 0.1"]);
    }
}
