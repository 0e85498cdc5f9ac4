use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, VLine};

use crate::color::{attribution_color, marker_color};
use crate::data::force::ForcePlot;

// ---------------------------------------------------------------------------
// Force plot (central panel)
// ---------------------------------------------------------------------------

/// Render the attribution force plot: one horizontal bar per feature on the
/// model output axis, with the base value and output marked.
pub fn force_plot(ui: &mut Ui, plot: &ForcePlot) {
    let max_abs = plot.max_abs_score();

    Plot::new("force_plot")
        .height(180.0)
        .legend(Legend::default())
        .x_axis_label("Model output")
        .show_axes([true, false])
        .show_grid([true, false])
        .include_y(-1.0)
        .include_y(1.0)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for seg in &plot.segments {
                let color = attribution_color(seg.score, max_abs);
                let bar = Bar::new(0.0, seg.end - seg.start)
                    .base_offset(seg.start)
                    .width(0.8)
                    .name(format!("{:+}", seg.score));
                let chart = BarChart::new(vec![bar])
                    .horizontal()
                    .color(color)
                    .name(seg.label());
                plot_ui.bar_chart(chart);
            }

            plot_ui.vline(
                VLine::new(plot.base_value)
                    .color(marker_color())
                    .name(format!("base value {:.2}", plot.base_value)),
            );
            plot_ui.vline(
                VLine::new(plot.output)
                    .width(2.0)
                    .name(format!("f(x) {:.2}", plot.output)),
            );
        });
}
