mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use app::PredictorApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CCPP Power Output Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(PredictorApp::default()))),
    )
}
