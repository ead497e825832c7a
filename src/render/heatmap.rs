//! Confidence-weighted detection density heatmap.

use image::{ImageBuffer, Luma, Rgb, RgbImage};

use super::HeatmapSettings;
use super::colormap::JetColormap;
use crate::detection::Detection;

/// Per-pixel detection density before colorization.
pub type HeatAccumulator = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Sum each detection's confidence over its clamped box.
///
/// Overlapping boxes add up. Detections without a usable box
/// contribute nothing.
pub fn accumulate_heat(width: u32, height: u32, detections: &[Detection]) -> HeatAccumulator {
    let mut heat = HeatAccumulator::new(width, height);

    for detection in detections {
        let Some(bbox) = detection.clamped_bbox(width, height) else {
            continue;
        };
        for y in bbox.y1..bbox.y2 {
            for x in bbox.x1..bbox.x2 {
                heat.get_pixel_mut(x, y).0[0] += detection.confidence;
            }
        }
    }

    heat
}

/// Scale the accumulator so its maximum becomes 1.0.
///
/// An all-zero accumulator is left unchanged.
pub fn normalize_heat(heat: &mut HeatAccumulator) {
    let max = heat.pixels().map(|p| p.0[0]).fold(0.0f32, f32::max);
    if max > 0.0 {
        for p in heat.pixels_mut() {
            p.0[0] /= max;
        }
    }
}

/// Quantize a normalized density to a colormap index (truncating).
fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// `weight * a + (1 - weight) * b`, rounded and saturated.
fn blend_channel(a: u8, b: u8, weight: f32) -> u8 {
    let v = weight.mul_add(f32::from(a), (1.0 - weight) * f32::from(b));
    v.round().clamp(0.0, 255.0) as u8
}

/// Blend a jet-colored density map over a copy of `image`.
///
/// With no detections the heat layer is uniformly the ramp's zero color,
/// so the result is a faint uniform tint of the original.
pub fn composite_heatmap(
    image: &RgbImage,
    detections: &[Detection],
    settings: &HeatmapSettings,
) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut heat = accumulate_heat(width, height, detections);
    normalize_heat(&mut heat);

    let colormap = JetColormap::new();
    let weight = settings.original_weight;

    let mut output = image.clone();
    for (pixel, density) in output.pixels_mut().zip(heat.pixels()) {
        let Rgb(color) = colormap.color(quantize(density.0[0]));
        for (channel, heat_channel) in pixel.0.iter_mut().zip(color) {
            *channel = blend_channel(*channel, heat_channel, weight);
        }
    }

    output
}
