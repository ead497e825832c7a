//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "geolens";

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "GEOLENS_CONFIG";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Report file suffix appended to the input file stem.
pub const REPORT_EXTENSION: &str = ".geolens.json";

/// Annotated image file suffix (written when `output.write_images` is set).
pub const ANNOTATED_EXTENSION: &str = ".annotated.jpg";

/// Heatmap image file suffix (written when `output.write_images` is set).
pub const HEATMAP_EXTENSION: &str = ".heatmap.jpg";

/// Sibling detection file suffixes, tried in order.
pub const DETECTION_SUFFIXES: &[&str] = &[".detections.json", ".detections.csv"];

/// Supported input image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

/// Input limits.
pub mod limits {
    /// Maximum accepted image payload (16 MiB).
    pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;
}

/// Confidence display tiers used by the annotation renderer.
///
/// Boundaries are exclusive: a confidence of exactly `HIGH_THRESHOLD`
/// falls into the medium tier.
pub mod tiers {
    /// Confidence strictly above this is drawn in the high tier.
    pub const HIGH_THRESHOLD: f32 = 0.7;
    /// Confidence strictly above this (and not high) is drawn in the medium tier.
    pub const MEDIUM_THRESHOLD: f32 = 0.4;
    /// High tier color (green).
    pub const HIGH_COLOR: [u8; 3] = [0, 255, 0];
    /// Medium tier color (cyan).
    pub const MEDIUM_COLOR: [u8; 3] = [0, 255, 255];
    /// Low tier color (orange).
    pub const LOW_COLOR: [u8; 3] = [255, 165, 0];
    /// Label text color (white).
    pub const TEXT_COLOR: [u8; 3] = [255, 255, 255];
    /// Bounding box outline width in pixels.
    pub const LINE_WIDTH: u32 = 2;
    /// Integer scale applied to the 8x8 label glyphs.
    pub const LABEL_SCALE: u32 = 2;
    /// Vertical padding added to the label band above the text.
    pub const LABEL_PADDING: u32 = 10;
    /// Gap between the label baseline and the box top edge.
    pub const LABEL_BASELINE_GAP: u32 = 5;
}

/// Heatmap compositing constants.
pub mod heatmap {
    /// Weight of the original image in the final blend.
    pub const ORIGINAL_WEIGHT: f32 = 0.7;
}

/// Image codec constants.
pub mod codec {
    /// JPEG quality used for transport artifacts.
    pub const JPEG_QUALITY: u8 = 85;
    /// Data-URI prefix for JPEG payloads.
    pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";
}

/// Reverse geocoding constants.
pub mod geocoder {
    /// Default reverse geocoding endpoint (Nominatim).
    pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
    /// Default user agent sent to the geocoding service.
    pub const DEFAULT_USER_AGENT: &str = "image_detection_app";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Decimal places used in the fallback location name.
    pub const FALLBACK_PRECISION: usize = 4;
}

/// Location result constants.
pub mod location {
    /// Name reported when no coordinate could be resolved.
    pub const UNKNOWN_NAME: &str = "Unknown Location";
    /// Confidence reported when GPS metadata was found.
    pub const GPS_CONFIDENCE: f32 = 0.9;
    /// Confidence reported when no GPS metadata was found.
    pub const UNKNOWN_CONFIDENCE: f32 = 0.5;
    /// Default map zoom level.
    pub const DEFAULT_MAPS_ZOOM: u8 = 15;
    /// Maximum zoom level accepted by the map link.
    pub const MAX_MAPS_ZOOM: u8 = 21;
}

/// Scene description constants.
pub mod describe {
    /// Maximum number of object kinds listed in a description.
    pub const MAX_LISTED_OBJECTS: usize = 5;
    /// Maximum number of object tags.
    pub const MAX_OBJECT_TAGS: usize = 10;
    /// Maximum number of tags in total.
    pub const MAX_TAGS: usize = 15;
}
