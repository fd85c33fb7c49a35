use rand::Rng;

use super::sample_range;

/// Hue range in degrees.
const HUE_RANGE: [f32; 2] = [0.0, 360.0];
/// Saturation floor keeps colors from washing out toward gray.
const SATURATION_RANGE: [f32; 2] = [0.7, 1.0];
/// Value floor keeps colors from going muddy/dark.
const VALUE_RANGE: [f32; 2] = [0.8, 1.0];

/// Convert HSV (`hue` in degrees `[0, 360)`, `saturation` and `value` in
/// `[0, 1]`) to linear RGB in `[0, 1]`.
#[must_use]
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [f32; 3] {
    let hue = hue.rem_euclid(360.0);
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match hue {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Random saturated, bright RGBA color with alpha 1.
pub fn random_vivid_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let hue = sample_range(rng, HUE_RANGE);
    let saturation = sample_range(rng, SATURATION_RANGE);
    let value = sample_range(rng, VALUE_RANGE);
    let [r, g, b] = hsv_to_rgb(hue, saturation, value);
    [r, g, b, 1.0]
}
