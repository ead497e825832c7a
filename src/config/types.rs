//! Configuration type definitions.

use crate::constants::{codec, geocoder, heatmap, location, tiers};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reverse geocoding settings.
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Annotation settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Heatmap settings.
    #[serde(default)]
    pub heatmap: HeatmapConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Reverse geocoding service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Whether to contact the geocoding service at all.
    pub enabled: bool,

    /// Reverse geocoding endpoint (Nominatim-compatible).
    pub endpoint: String,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Preferred response language (`accept-language`).
    pub language: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: geocoder::DEFAULT_ENDPOINT.to_string(),
            user_agent: geocoder::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: geocoder::DEFAULT_TIMEOUT_SECS,
            language: None,
        }
    }
}

/// Annotation renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Confidence strictly above this uses the high tier color.
    pub high_threshold: f32,

    /// Confidence strictly above this uses the medium tier color.
    pub medium_threshold: f32,

    /// Box outline width in pixels.
    pub line_width: u32,

    /// Label glyph scale factor.
    pub label_scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            high_threshold: tiers::HIGH_THRESHOLD,
            medium_threshold: tiers::MEDIUM_THRESHOLD,
            line_width: tiers::LINE_WIDTH,
            label_scale: tiers::LABEL_SCALE,
        }
    }
}

/// Heatmap compositor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Weight of the original image in the blend (heat gets the rest).
    pub original_weight: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            original_weight: heatmap::ORIGINAL_WEIGHT,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality for encoded artifacts (1-100).
    pub jpeg_quality: u8,

    /// Zoom level used in map links.
    pub maps_zoom: u8,

    /// Also write the annotated and heatmap images as JPEG files.
    pub write_images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: codec::JPEG_QUALITY,
            maps_zoom: location::DEFAULT_MAPS_ZOOM,
            write_images: false,
        }
    }
}
