use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::attribution_color;
use crate::data::force::ForcePlot;
use crate::data::report::Report;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Results (central panel)
// ---------------------------------------------------------------------------

/// Render the central panel: a hint until "Get predictions" is pressed, then
/// the prediction, model input, interpretation plot and attribution detail.
pub fn results_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("CCPP Power Output Predictor");
    ui.separator();

    let report = match state.report() {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Adjust the readings and press \"Get predictions\".");
            });
            return;
        }
    };

    let mut save_clicked = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("Results").size(18.0).strong());
            ui.label(&report.prediction_text);
            ui.add_space(8.0);

            ui.label(RichText::new("Input Features").size(18.0).strong());
            model_input(ui, report);
            ui.add_space(8.0);

            ui.label(RichText::new("Interpretation Plot").size(18.0).strong());
            match &report.plot {
                Ok(force) => {
                    plot::force_plot(ui, force);
                    segment_table(ui, force);
                    if ui.button("Save plot…").clicked() {
                        save_clicked = true;
                    }
                }
                Err(e) => {
                    ui.label(RichText::new(format!("Cannot draw plot: {e}")).color(Color32::RED));
                }
            }
            ui.add_space(8.0);

            egui::CollapsingHeader::new("Shap Detail")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for line in &report.detail_lines {
                        ui.monospace(line);
                    }
                });
        });

    if save_clicked {
        panels::save_plot_dialog(state);
    }
}

fn model_input(ui: &mut Ui, report: &Report) {
    egui::CollapsingHeader::new("Model Input")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("Input Features: ");
            ui.monospace(&report.input_keys);
            ui.code(&report.input_json);
            ui.label("Selected Features: ");
            ui.monospace(&report.selected_keys);
            ui.code(&report.selected_json);
        });
}

/// Per-feature breakdown of the bars above.
fn segment_table(ui: &mut Ui, force: &ForcePlot) {
    let max_abs = force.max_abs_score();
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Feature");
            });
            header.col(|ui| {
                ui.strong("Attribution");
            });
            header.col(|ui| {
                ui.strong("Interval");
            });
        })
        .body(|mut body| {
            for seg in &force.segments {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(seg.label());
                    });
                    row.col(|ui| {
                        let sign = if seg.is_positive() { "↑" } else { "↓" };
                        ui.label(
                            RichText::new(format!("{:+} {sign}", seg.score))
                                .color(attribution_color(seg.score, max_abs)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3} → {:.3}", seg.start, seg.end));
                    });
                });
            }
        });
}
