use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Start at blue so the first two series read as blue / green-ish.
            let hue = 220.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    Color32::from_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Colour scale for the correlation heatmap
// ---------------------------------------------------------------------------

/// Viridis control points (sRGB), evenly spaced from 0 to 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Colour for a correlation coefficient.  `-1` maps to the dark end of
/// Viridis, `+1` to the yellow end; NaN is grey.
pub fn correlation_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::GRAY;
    }
    let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f32;

    let stop = |(red, green, blue): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(red, green, blue).into_format::<f32>().into_linear()
    };
    let mixed = stop(VIRIDIS[lo]).mix(stop(VIRIDIS[lo + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_on(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinct() {
        let colors = generate_palette(2);
        assert_eq!(colors.len(), 2);
        assert_ne!(colors[0], colors[1]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_correlation_scale_endpoints() {
        assert_eq!(correlation_color(-1.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(correlation_color(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(correlation_color(f64::NAN), Color32::GRAY);
        // Out-of-range input clamps.
        assert_eq!(correlation_color(3.0), correlation_color(1.0));
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(text_color_on(correlation_color(-1.0)), Color32::WHITE);
        assert_eq!(text_color_on(correlation_color(1.0)), Color32::BLACK);
    }
}
