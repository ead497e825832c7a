//! Detection type definitions.

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle `(x1, y1, x2, y2)` as produced by the detector.
///
/// Serialized as a four-element array. Fractional coordinates are
/// truncated toward zero on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge (exclusive).
    pub x2: i32,
    /// Bottom edge (exclusive).
    pub y2: i32,
}

impl BoundingBox {
    /// Create a bounding box from corner coordinates.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Clamp the box to an image of `width` x `height` pixels.
    ///
    /// Returns `None` when the clamped box has zero area, which covers
    /// inverted boxes and boxes lying entirely outside the image.
    pub fn clamp(&self, width: u32, height: u32) -> Option<ClampedBox> {
        let clamp_axis = |v: i32, max: u32| -> u32 {
            if v <= 0 {
                0
            } else {
                (v as u32).min(max)
            }
        };

        let x1 = clamp_axis(self.x1, width);
        let x2 = clamp_axis(self.x2, width);
        let y1 = clamp_axis(self.y1, height);
        let y2 = clamp_axis(self.y2, height);

        (x1 < x2 && y1 < y2).then_some(ClampedBox { x1, y1, x2, y2 })
    }
}

#[allow(clippy::cast_possible_truncation)]
impl From<[f64; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1 as i32, y1 as i32, x2 as i32, y2 as i32)
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A bounding box already clamped to image bounds with non-zero area.
///
/// Covers columns `x1..x2` and rows `y1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedBox {
    /// Left edge (inclusive).
    pub x1: u32,
    /// Top edge (inclusive).
    pub y1: u32,
    /// Right edge (exclusive).
    pub x2: u32,
    /// Bottom edge (exclusive).
    pub y2: u32,
}

impl ClampedBox {
    /// Width in pixels (always at least 1).
    pub const fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    /// Height in pixels (always at least 1).
    pub const fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// A single detector output: class label, confidence and bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Numeric class identifier.
    #[serde(rename = "class_id", alias = "class", default)]
    pub class_id: i64,
    /// Human-readable class label.
    #[serde(default = "default_class_name")]
    pub class_name: String,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Bounding box, absent when the detector produced none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

fn default_class_name() -> String {
    "Unknown".to_string()
}

impl Detection {
    /// Create a detection with a bounding box.
    pub fn new(class_id: i64, class_name: &str, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            class_id,
            class_name: class_name.to_string(),
            confidence,
            bbox: Some(bbox),
        }
    }

    /// Check the confidence invariant.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence must be between 0.0 and 1.0, got {}",
                self.confidence
            ));
        }
        Ok(())
    }

    /// Bounding box clamped to the image, if usable.
    pub fn clamped_bbox(&self, width: u32, height: u32) -> Option<ClampedBox> {
        self.bbox.and_then(|b| b.clamp(width, height))
    }
}
