//! Visualization of detections: annotated boxes and density heatmaps.
//!
//! Both renderers take the source image by reference and return a new
//! buffer of the same size.

mod annotate;
mod colormap;
mod font;
mod heatmap;

pub use annotate::{ConfidenceTier, label_text, render_annotations};
pub use colormap::{JetColormap, jet};
pub use font::{draw_text_mut, text_size};
pub use heatmap::{HeatAccumulator, accumulate_heat, composite_heatmap, normalize_heat};

use crate::config::{HeatmapConfig, RenderConfig};
use crate::constants::{heatmap as heatmap_consts, tiers};

/// Annotation renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Confidence strictly above this is drawn in the high tier.
    pub high_threshold: f32,
    /// Confidence strictly above this is drawn in the medium tier.
    pub medium_threshold: f32,
    /// Outline width in pixels.
    pub line_width: u32,
    /// Glyph scale for labels.
    pub label_scale: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            high_threshold: tiers::HIGH_THRESHOLD,
            medium_threshold: tiers::MEDIUM_THRESHOLD,
            line_width: tiers::LINE_WIDTH,
            label_scale: tiers::LABEL_SCALE,
        }
    }
}

impl From<&RenderConfig> for RenderSettings {
    fn from(config: &RenderConfig) -> Self {
        Self {
            high_threshold: config.high_threshold,
            medium_threshold: config.medium_threshold,
            line_width: config.line_width,
            label_scale: config.label_scale,
        }
    }
}

/// Heatmap compositor settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSettings {
    /// Weight of the original image; the heat layer gets the remainder.
    pub original_weight: f32,
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self {
            original_weight: heatmap_consts::ORIGINAL_WEIGHT,
        }
    }
}

impl From<&HeatmapConfig> for HeatmapSettings {
    fn from(config: &HeatmapConfig) -> Self {
        Self {
            original_weight: config.original_weight,
        }
    }
}
