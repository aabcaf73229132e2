//! Raster rendering: color-ramp index maps and composited overlays.
//!
//! Every renderer returns a fresh [`RasterImage`] and reads nothing but its
//! arguments, so independent maps can be rendered in parallel from the same
//! snapshot.

use rand::Rng;

use crate::api::{IndexStatistics, RasterImage, Rgb, Rgba, PLACEHOLDER_GRAY};
use crate::api::{
    HEALTHY_WASH, HIGH_RISK_WASH, LOW_RISK_WASH, MEDIUM_RISK_WASH, STRESSED_WASH,
};

/// Spatial frequency of the decorative base pattern.
const FIELD_FREQUENCY: f64 = 0.02;

fn lerp_channel(a: u8, b: u8, frac: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * frac).round() as u8
}

/// Interpolate a color ramp at `t` in `[0, 1]`.
///
/// With `N` stops, `t` selects segment `floor(t * (N - 1))` (capped at the
/// last segment) and blends linearly inside it, so `t = 0` and `t = 1` return
/// the first and last stops exactly.
pub fn ramp_color(stops: &[Rgb], t: f64) -> Rgb {
    match stops.len() {
        0 => return PLACEHOLDER_GRAY,
        1 => return stops[0],
        _ => {}
    }

    let t = t.max(0.0).min(1.0);
    let scaled = t * (stops.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - idx as f64;

    let (a, b) = (stops[idx], stops[idx + 1]);
    Rgb::new(
        lerp_channel(a.r, b.r, frac),
        lerp_channel(a.g, b.g, frac),
        lerp_channel(a.b, b.b, frac),
    )
}

/// Position of `value` inside the layer's observed range.
///
/// A zero-width range maps everything to the middle of the ramp.
pub fn normalize(value: f64, stats: &IndexStatistics) -> f64 {
    if stats.max > stats.min {
        ((value - stats.min) / (stats.max - stats.min)).max(0.0).min(1.0)
    } else {
        0.5
    }
}

/// Render a per-pixel layer through a color ramp.
///
/// Output pixel `(x, y)` samples `values[(y * width + x) % values.len()]`, so
/// the source need not match the output size. An empty layer yields a uniform
/// gray placeholder.
pub fn render_scalar_map(
    values: &[f64],
    stats: &IndexStatistics,
    width: usize,
    height: usize,
    stops: &[Rgb],
) -> RasterImage {
    if values.is_empty() {
        log::warn!("Rendering placeholder for empty layer");
        return RasterImage::filled(width, height, PLACEHOLDER_GRAY);
    }
    if stats.max <= stats.min {
        log::warn!("Layer range is empty; rendering at mid-ramp");
    }

    let mut pixels = Vec::with_capacity(width * height * 4);
    for i in 0..width * height {
        let color = ramp_color(stops, normalize(values[i % values.len()], stats));
        pixels.extend_from_slice(&[color.r, color.g, color.b, 255]);
    }

    RasterImage {
        width,
        height,
        pixels,
    }
}

fn clamp_byte(v: f64) -> u8 {
    v.max(0.0).min(255.0).round() as u8
}

/// Decorative green/brown field texture with per-pixel jitter.
///
/// Purely a backdrop; it is not derived from any dataset value.
pub fn render_base_field<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> RasterImage {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let pattern = (x as f64 * FIELD_FREQUENCY).sin() * (y as f64 * FIELD_FREQUENCY).cos();
            let noise = (rng.gen::<f64>() - 0.5) * 0.2;

            let green = 120.0 + pattern * 60.0 + noise * 50.0;
            let red = 80.0 + pattern * 40.0 + noise * 30.0;
            let brown = 60.0 + pattern * 30.0 + noise * 20.0;

            pixels.extend_from_slice(&[clamp_byte(red), clamp_byte(green), clamp_byte(brown), 255]);
        }
    }

    RasterImage {
        width,
        height,
        pixels,
    }
}

/// Source-over blend of a translucent wash onto an opaque pixel.
fn blend_over(dst: &mut [u8], wash: Rgba) {
    let alpha = wash.a as f64 / 255.0;
    for (channel, src) in dst.iter_mut().zip([wash.r, wash.g, wash.b]) {
        *channel = (src as f64 * alpha + *channel as f64 * (1.0 - alpha)).round() as u8;
    }
    dst[3] = 255;
}

fn composite<R, F>(width: usize, height: usize, rng: &mut R, mut pick: F) -> RasterImage
where
    R: Rng + ?Sized,
    F: FnMut(f64) -> Rgba,
{
    let mut image = render_base_field(width, height, rng);
    for pixel in image.pixels.chunks_exact_mut(4) {
        let wash = pick(rng.gen::<f64>());
        blend_over(pixel, wash);
    }
    image
}

/// Crop-stress wash over the base field.
///
/// Each pixel independently draws a uniform value and is washed red when it
/// falls below `stress_ratio`; placement matches the ratio only in
/// expectation and carries no spatial meaning.
pub fn render_stress_overlay<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    stress_ratio: f64,
    rng: &mut R,
) -> RasterImage {
    composite(width, height, rng, |draw| {
        if draw < stress_ratio {
            STRESSED_WASH
        } else {
            HEALTHY_WASH
        }
    })
}

/// Three-tier pest-risk wash over the base field.
///
/// `low_ratio` and `medium_cumulative_ratio` split one uniform draw per pixel
/// into low / medium / high bands.
pub fn render_risk_overlay<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    low_ratio: f64,
    medium_cumulative_ratio: f64,
    rng: &mut R,
) -> RasterImage {
    composite(width, height, rng, |draw| {
        if draw < low_ratio {
            LOW_RISK_WASH
        } else if draw < medium_cumulative_ratio {
            MEDIUM_RISK_WASH
        } else {
            HIGH_RISK_WASH
        }
    })
}

#[cfg(test)]
#[path = "raster_tests.rs"]
mod raster_tests;
