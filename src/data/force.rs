use thiserror::Error;

use super::model::Feature;

/// Failures while building or drawing an attribution plot.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("{attributions} attribution scores for {features} features")]
    ShapeMismatch { attributions: usize, features: usize },

    #[error("rendering plot image")]
    Render(#[from] image::ImageError),
}

// ---------------------------------------------------------------------------
// Force plot layout
// ---------------------------------------------------------------------------

/// One feature's push on the output, drawn as an interval on the output axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSegment {
    pub feature: Feature,
    /// The feature's input value (shown in the label).
    pub value: f64,
    /// Signed attribution score.
    pub score: f64,
    pub start: f64,
    pub end: f64,
}

impl ForceSegment {
    /// Positive scores push the output up.
    pub fn is_positive(&self) -> bool {
        self.score >= 0.0
    }

    pub fn label(&self) -> String {
        format!("{} = {}", self.feature.key(), format_value(self.value))
    }
}

/// Attribution scores laid out around the model output, SHAP force-plot style.
///
/// Positive segments stack below `output` and end exactly on it; negative
/// segments start at `output` and stack upward. Within each side the largest
/// magnitude sits next to `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcePlot {
    pub base_value: f64,
    /// `base_value` plus the sum of all scores.
    pub output: f64,
    pub segments: Vec<ForceSegment>,
}

impl ForcePlot {
    /// Lay out `scores` against the feature row they explain.
    pub fn new(
        base_value: f64,
        scores: &[f64],
        row: &[(Feature, f64)],
    ) -> Result<Self, PlotError> {
        if scores.len() != row.len() {
            return Err(PlotError::ShapeMismatch {
                attributions: scores.len(),
                features: row.len(),
            });
        }

        let output = base_value + scores.iter().sum::<f64>();

        let mut positive: Vec<(Feature, f64, f64)> = Vec::new();
        let mut negative: Vec<(Feature, f64, f64)> = Vec::new();
        for (&(feature, value), &score) in row.iter().zip(scores) {
            if score >= 0.0 {
                positive.push((feature, value, score));
            } else {
                negative.push((feature, value, score));
            }
        }
        let by_magnitude = |a: &(Feature, f64, f64), b: &(Feature, f64, f64)| {
            b.2.abs().total_cmp(&a.2.abs())
        };
        positive.sort_by(by_magnitude);
        negative.sort_by(by_magnitude);

        let mut segments = Vec::with_capacity(row.len());

        let mut cursor = output;
        for (feature, value, score) in positive {
            segments.push(ForceSegment {
                feature,
                value,
                score,
                start: cursor - score,
                end: cursor,
            });
            cursor -= score;
        }

        let mut cursor = output;
        for (feature, value, score) in negative {
            segments.push(ForceSegment {
                feature,
                value,
                score,
                start: cursor,
                end: cursor - score,
            });
            cursor -= score;
        }

        Ok(ForcePlot {
            base_value,
            output,
            segments,
        })
    }

    /// Largest absolute score, for colour scaling.
    pub fn max_abs_score(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.score.abs())
            .fold(0.0, f64::max)
    }

    /// Smallest interval containing the base value, the output and every segment.
    pub fn extent(&self) -> (f64, f64) {
        let mut lo = self.base_value.min(self.output);
        let mut hi = self.base_value.max(self.output);
        for seg in &self.segments {
            lo = lo.min(seg.start);
            hi = hi.max(seg.end);
        }
        (lo, hi)
    }
}

/// Feature values with at most two decimals and no trailing zeros.
fn format_value(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    const EPS: f64 = 1e-9;

    fn default_row() -> Vec<(Feature, f64)> {
        Observation::default().entries().to_vec()
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = ForcePlot::new(0.5, &[0.1, 0.2], &default_row()).unwrap_err();
        match err {
            PlotError::ShapeMismatch {
                attributions,
                features,
            } => {
                assert_eq!(attributions, 2);
                assert_eq!(features, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn output_is_base_plus_scores() {
        let plot = ForcePlot::new(0.5, &[0.1, -0.2, 0.05, 0.1], &default_row()).unwrap();
        assert!((plot.output - 0.55).abs() < EPS);
        assert_eq!(plot.segments.len(), 4);
    }

    #[test]
    fn positive_segments_end_at_output_largest_first() {
        let plot = ForcePlot::new(0.5, &[0.1, -0.2, 0.05, 0.1], &default_row()).unwrap();
        let pos: Vec<&ForceSegment> = plot.segments.iter().filter(|s| s.is_positive()).collect();
        let keys: Vec<&str> = pos.iter().map(|s| s.feature.key()).collect();
        // Ties keep column order.
        assert_eq!(keys, ["AT", "RH", "AP"]);
        assert!((pos[0].end - plot.output).abs() < EPS);
        assert!((pos[0].start - pos[1].end).abs() < EPS);
        assert!((pos[2].start - 0.30).abs() < EPS);
    }

    #[test]
    fn negative_segments_start_at_output() {
        let plot = ForcePlot::new(0.5, &[0.1, -0.2, 0.05, 0.1], &default_row()).unwrap();
        let neg: Vec<&ForceSegment> = plot.segments.iter().filter(|s| !s.is_positive()).collect();
        assert_eq!(neg.len(), 1);
        assert_eq!(neg[0].feature, Feature::ExhaustVacuum);
        assert!((neg[0].start - plot.output).abs() < EPS);
        assert!((neg[0].end - 0.75).abs() < EPS);

        let (lo, hi) = plot.extent();
        assert!((lo - 0.30).abs() < EPS);
        assert!((hi - 0.75).abs() < EPS);
        assert!((plot.max_abs_score() - 0.2).abs() < EPS);
    }

    #[test]
    fn labels_show_feature_value() {
        let plot = ForcePlot::new(0.5, &[0.1, -0.2, 0.05, 0.1], &default_row()).unwrap();
        let labels: Vec<String> = plot.segments.iter().map(ForceSegment::label).collect();
        assert!(labels.contains(&"AT = 25".to_string()));
        assert!(labels.contains(&"AP = 1013".to_string()));
        assert_eq!(format_value(24.567), "24.57");
        assert_eq!(format_value(-0.001), "0");
    }
}
