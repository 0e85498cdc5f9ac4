use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::Color32;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::color::{attribution_color, marker_color};
use crate::data::force::{ForcePlot, PlotError};

pub const EXPORT_WIDTH: u32 = 800;
pub const EXPORT_HEIGHT: u32 = 200;

const MARGIN: u32 = 40;
const BAR_TOP: u32 = 70;
const BAR_BOTTOM: u32 = 120;
const AXIS_Y: u32 = 150;

// ---------------------------------------------------------------------------
// Rasteriser
// ---------------------------------------------------------------------------

/// Draw the force plot as a bitmap: one coloured block per segment on a
/// shared output axis, a grey tick at the base value and a dark bar at the
/// output value.
pub fn rasterize(plot: &ForcePlot, width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    if width <= 2 * MARGIN || height <= AXIS_Y {
        return img;
    }

    let (lo, hi) = plot.extent();
    let pad = ((hi - lo) * 0.05).max(1e-9);
    let (lo, hi) = (lo - pad, hi + pad);
    let span = (width - 2 * MARGIN) as f64;
    let to_px = |v: f64| MARGIN + (((v - lo) / (hi - lo)) * span).round().clamp(0.0, span) as u32;

    fill_rect(&mut img, MARGIN, width - MARGIN, AXIS_Y, AXIS_Y + 1, Color32::GRAY);

    let max_abs = plot.max_abs_score();
    for seg in &plot.segments {
        let (x0, x1) = (to_px(seg.start), to_px(seg.end));
        fill_rect(
            &mut img,
            x0,
            x1,
            BAR_TOP,
            BAR_BOTTOM,
            attribution_color(seg.score, max_abs),
        );
        // Thin gap so adjacent pushes stay distinguishable.
        fill_rect(&mut img, x0, x0 + 1, BAR_TOP, BAR_BOTTOM, Color32::WHITE);
    }

    let base_x = to_px(plot.base_value);
    fill_rect(&mut img, base_x, base_x + 1, BAR_TOP - 20, AXIS_Y + 8, marker_color());
    let out_x = to_px(plot.output);
    fill_rect(&mut img, out_x.saturating_sub(1), out_x + 2, BAR_TOP - 10, AXIS_Y + 8, Color32::BLACK);

    img
}

fn fill_rect(img: &mut RgbaImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Color32) {
    let px = Rgba([color.r(), color.g(), color.b(), 255]);
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, px);
        }
    }
}

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

/// Encode the plot as PNG bytes.
pub fn encode_png(plot: &ForcePlot) -> Result<Vec<u8>, PlotError> {
    let img = rasterize(plot, EXPORT_WIDTH, EXPORT_HEIGHT);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn save_png(plot: &ForcePlot, path: &Path) -> Result<()> {
    let bytes = encode_png(plot).context("encoding force plot")?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Ask for a destination and save the plot there. `Ok(None)` when cancelled.
pub fn save_plot_dialog(plot: &ForcePlot) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save interpretation plot")
        .set_file_name("force_plot.png")
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        return Ok(None);
    };

    save_png(plot, &path)?;
    log::info!("Saved force plot to {}", path.display());
    Ok(Some(path))
}
