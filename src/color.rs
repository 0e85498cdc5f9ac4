use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Attribution colours
// ---------------------------------------------------------------------------

/// Hue for scores pushing the prediction up.
const POSITIVE_HUE: f32 = 341.0;
/// Hue for scores pushing the prediction down.
const NEGATIVE_HUE: f32 = 207.0;

/// Colour for one attribution score.
///
/// Sign picks the hue; `|score| / max_abs` darkens it, so the strongest push
/// on either side gets the most saturated shade.
pub fn attribution_color(score: f64, max_abs: f64) -> Color32 {
    let hue = if score >= 0.0 {
        POSITIVE_HUE
    } else {
        NEGATIVE_HUE
    };
    let strength = if max_abs > 0.0 {
        (score.abs() / max_abs).clamp(0.0, 1.0) as f32
    } else {
        1.0
    };
    hsl_to_color32(hue, 1.0, 0.72 - 0.22 * strength)
}

/// Colour of the base value / output markers.
pub fn marker_color() -> Color32 {
    hsl_to_color32(0.0, 0.0, 0.35)
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_selects_hue() {
        let up = attribution_color(0.1, 0.2);
        let down = attribution_color(-0.1, 0.2);
        assert!(up.r() > up.b(), "positive should be red: {up:?}");
        assert!(down.b() > down.r(), "negative should be blue: {down:?}");
    }

    #[test]
    fn stronger_scores_are_darker() {
        let weak = attribution_color(0.05, 0.2);
        let strong = attribution_color(0.2, 0.2);
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(strong) < sum(weak));
    }

    #[test]
    fn zero_range_does_not_divide_by_zero() {
        assert_eq!(attribution_color(0.0, 0.0), attribution_color(1.0, 1.0));
    }
}
