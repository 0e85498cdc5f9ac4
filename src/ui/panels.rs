use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Feature;
use crate::export;
use crate::state::{AppState, Interaction};

// ---------------------------------------------------------------------------
// Left side panel – input sliders
// ---------------------------------------------------------------------------

/// Render the sidebar: one slider per reading and the trigger button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("User Menu");
    ui.separator();

    for feature in Feature::ALL {
        let mut value = state.observation.get(feature);
        ui.label(feature.label());
        let slider = egui::Slider::new(&mut value, feature.range())
            .step_by(0.01)
            .max_decimals(2);
        if ui.add(slider).changed() {
            state.apply(Interaction::SetFeature(feature, value));
        }
        ui.add_space(6.0);
    }

    ui.separator();
    if ui.button("Get predictions").clicked() {
        state.apply(Interaction::Submit);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let has_plot = state.report().is_some_and(|r| r.plot.is_ok());
            if ui
                .add_enabled(has_plot, egui::Button::new("Save plot…"))
                .clicked()
            {
                save_plot_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();
        ui.strong("CCPP Power Output Predictor");

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_plot_dialog(state: &mut AppState) {
    let Some(Ok(plot)) = state.report().map(|r| &r.plot) else {
        return;
    };

    match export::save_plot_dialog(plot) {
        Ok(Some(_)) => state.status_message = None,
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to save plot: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
