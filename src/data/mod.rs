/// Data layer: readings, prediction, attribution layout and the results report.
///
/// Architecture:
/// ```text
///   sidebar sliders
///        │
///        ▼
///   ┌─────────────┐
///   │ Observation  │  four clamped readings (AT, V, AP, RH)
///   └─────────────┘
///        │  "Get predictions"
///        ▼
///   ┌───────────┐
///   │ Predictor  │  → ResultBundle (prediction, base value, attributions)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Report   │  texts, JSON listings, ForcePlot layout
///   └──────────┘
/// ```

pub mod force;
pub mod model;
pub mod predict;
pub mod report;
