//! Detector output consumed by the visualization pipeline.

mod parser;
mod types;

pub use parser::{
    filter_by_confidence, find_sibling_detection_file, load_detections_for, parse_detection_file,
};
pub use types::{BoundingBox, ClampedBox, Detection};
