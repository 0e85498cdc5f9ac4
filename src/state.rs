use crate::data::model::{Feature, Observation};
use crate::data::predict::{Predictor, StubPredictor};
use crate::data::report::Report;

// ---------------------------------------------------------------------------
// Interactions and view state
// ---------------------------------------------------------------------------

/// A single user action coming from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// A slider moved.
    SetFeature(Feature, f64),
    /// "Get predictions" was pressed.
    Submit,
}

/// What the central panel shows.
#[derive(Debug, Default)]
pub enum View {
    #[default]
    AwaitingTrigger,
    ResultsShown(Report),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Current slider values.
    pub observation: Observation,

    /// Results of the last trigger, cleared by any later input change.
    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    predictor: Box<dyn Predictor>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_predictor(Box::new(StubPredictor))
    }
}

impl AppState {
    pub fn with_predictor(predictor: Box<dyn Predictor>) -> Self {
        Self {
            observation: Observation::default(),
            view: View::AwaitingTrigger,
            status_message: None,
            predictor,
        }
    }

    /// Apply one interaction, moving between the two views.
    pub fn apply(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::SetFeature(feature, value) => {
                self.observation.set(feature, value);
                self.status_message = None;
                if matches!(self.view, View::ResultsShown(_)) {
                    log::debug!("{feature} changed, hiding results");
                }
                self.view = View::AwaitingTrigger;
            }
            Interaction::Submit => self.submit(),
        }
    }

    fn submit(&mut self) {
        let bundle = self.predictor.predict(&self.observation);
        match Report::compose(&self.observation, &bundle) {
            Ok(report) => {
                log::info!(
                    "Predicted {} for {:?}",
                    bundle.prediction,
                    self.observation.entries()
                );
                self.status_message = None;
                self.view = View::ResultsShown(report);
            }
            Err(e) => {
                log::error!("Failed to build report: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.view = View::AwaitingTrigger;
            }
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.view {
            View::ResultsShown(report) => Some(report),
            View::AwaitingTrigger => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::predict::ResultBundle;

    #[test]
    fn starts_without_results() {
        let state = AppState::default();
        assert!(state.report().is_none());
        assert_eq!(state.observation, Observation::default());
    }

    #[test]
    fn slider_changes_alone_never_show_results() {
        let mut state = AppState::default();
        for feature in Feature::ALL {
            state.apply(Interaction::SetFeature(feature, *feature.range().end()));
            assert!(state.report().is_none());
        }
        assert_eq!(state.observation.get(Feature::AmbientPressure), 1030.0);
    }

    #[test]
    fn submit_shows_stub_results() {
        let mut state = AppState::default();
        state.apply(Interaction::Submit);
        let report = state.report().expect("results after submit");
        assert_eq!(report.prediction_text, "Prediction: 123.45");
        assert_eq!(report.detail_lines.len(), 4);
    }

    #[test]
    fn change_after_submit_hides_results() {
        let mut state = AppState::default();
        state.apply(Interaction::Submit);
        state.apply(Interaction::SetFeature(Feature::ExhaustVacuum, 40.0));
        assert!(state.report().is_none());

        state.apply(Interaction::Submit);
        let json = &state.report().unwrap().input_json;
        assert!(json.contains("\"V\": 40.0"));
    }

    #[test]
    fn slider_change_clears_stale_status() {
        let mut state = AppState::default();
        state.status_message = Some("Error: writing plot.png".to_string());
        state.apply(Interaction::SetFeature(Feature::RelativeHumidity, 50.0));
        assert!(state.status_message.is_none());
    }

    struct Echo;

    impl Predictor for Echo {
        fn predict(&self, observation: &Observation) -> ResultBundle {
            ResultBundle {
                prediction: observation.get(Feature::AmbientTemperature),
                base_value: 0.0,
                features: vec![Feature::AmbientTemperature],
                attributions: vec![observation.get(Feature::AmbientTemperature)],
            }
        }
    }

    #[test]
    fn predictor_sees_current_observation() {
        let mut state = AppState::with_predictor(Box::new(Echo));
        state.apply(Interaction::SetFeature(Feature::AmbientTemperature, 12.5));
        state.apply(Interaction::Submit);
        let report = state.report().unwrap();
        assert_eq!(report.prediction_text, "Prediction: 12.5");
        assert_eq!(report.selected_keys, "AT");
    }
}
