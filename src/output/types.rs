//! Report type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::describe::SceneClass;
use crate::detection::Detection;
use crate::location::LocationInfo;

/// Encoded visualization artifacts.
///
/// Each field is a JPEG data URI, or empty if that image could not be
/// encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImages {
    /// The source image.
    pub original: String,
    /// Source image with detection boxes and labels.
    pub annotated: String,
    /// Source image blended with the detection density heatmap.
    pub heatmap: String,
}

/// Pixel dimensions of the analyzed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Complete result of analyzing one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source image file name, when analyzed from disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Image size.
    pub dimensions: Dimensions,
    /// Detections the visualizations were built from.
    pub objects: Vec<Detection>,
    /// Scene classification.
    pub classification: SceneClass,
    /// Resolved location.
    pub location: LocationInfo,
    /// Map link, present only when the image carried a coordinate.
    pub maps_url: Option<String>,
    /// Human-readable summary.
    pub description: String,
    /// Search tags.
    pub tags: Vec<String>,
    /// Encoded images.
    pub images: EncodedImages,
}
