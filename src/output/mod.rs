//! Analysis reports and their writers.

mod json;
pub mod progress;
mod types;

pub use json::{write_artifact_images, write_report, write_report_to};
pub use types::{AnalysisReport, Dimensions, EncodedImages};
