use super::model::{Feature, Observation};

// ---------------------------------------------------------------------------
// ResultBundle – prediction plus per-feature attributions
// ---------------------------------------------------------------------------

/// Output of one prediction run.
///
/// `attributions[i]` belongs to `features[i]`; the force plot checks that
/// both have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBundle {
    /// Predicted net electrical output, MW.
    pub prediction: f64,
    /// Expected model output the attributions are measured against.
    pub base_value: f64,
    /// Features the model consumed, in model column order.
    pub features: Vec<Feature>,
    /// Signed contribution of each feature.
    pub attributions: Vec<f64>,
}

impl ResultBundle {
    /// `(feature, attribution)` pairs in column order.
    pub fn pairs(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.features
            .iter()
            .copied()
            .zip(self.attributions.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Predictor
// ---------------------------------------------------------------------------

/// Anything that turns an observation into a prediction with attributions.
pub trait Predictor {
    fn predict(&self, observation: &Observation) -> ResultBundle;
}

/// Fixed-output predictor used until a trained model is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPredictor;

impl StubPredictor {
    pub const PREDICTION: f64 = 123.45;
    pub const BASE_VALUE: f64 = 0.5;
    pub const ATTRIBUTIONS: [f64; 4] = [0.1, -0.2, 0.05, 0.1];
}

impl Predictor for StubPredictor {
    fn predict(&self, _observation: &Observation) -> ResultBundle {
        ResultBundle {
            prediction: Self::PREDICTION,
            base_value: Self::BASE_VALUE,
            features: Feature::ALL.to_vec(),
            attributions: Self::ATTRIBUTIONS.to_vec(),
        }
    }
}
