//! Detection file parsing.
//!
//! The detector runs outside this tool; its output is read from disk
//! either as JSON (the detector's native list of objects) or as CSV with
//! the columns `class_id,class_name,confidence,x1,y1,x2,y2`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::constants::DETECTION_SUFFIXES;
use crate::detection::{BoundingBox, Detection};
use crate::error::{Error, Result};

/// Top-level JSON shapes accepted for detection files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetectionDocument {
    /// A bare array of detections.
    List(Vec<Detection>),
    /// An object wrapping the list (e.g. a previous API response).
    Wrapped {
        #[serde(alias = "objects")]
        detections: Vec<Detection>,
    },
}

/// Internal record for CSV deserialization.
#[derive(Debug, Deserialize)]
struct DetectionRecord {
    class_id: i64,
    class_name: String,
    confidence: f32,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl From<DetectionRecord> for Detection {
    fn from(r: DetectionRecord) -> Self {
        Self {
            class_id: r.class_id,
            class_name: r.class_name,
            confidence: r.confidence,
            bbox: Some(BoundingBox::from([r.x1, r.y1, r.x2, r.y2])),
        }
    }
}

/// Parse a detection file, dispatching on its extension.
///
/// Returns `Ok(vec![])` for a file with no detections.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown
/// extension, or contains a record that violates the detection
/// invariants.
pub fn parse_detection_file(path: &Path) -> Result<Vec<Detection>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    let detections = match extension.as_deref() {
        Some("json") => parse_json(path)?,
        Some("csv") => parse_csv(path)?,
        _ => {
            return Err(Error::UnsupportedDetectionFormat {
                path: path.to_path_buf(),
            });
        }
    };

    for (index, detection) in detections.iter().enumerate() {
        detection
            .validate()
            .map_err(|message| Error::InvalidDetection {
                path: path.to_path_buf(),
                message: format!("detection {index}: {message}"),
            })?;
    }

    debug!(
        "Loaded {} detection(s) from {}",
        detections.len(),
        path.display()
    );
    Ok(detections)
}

fn parse_json(path: &Path) -> Result<Vec<Detection>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::DetectionRead {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let document: DetectionDocument =
        serde_json::from_str(&contents).map_err(|e| Error::DetectionRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    Ok(match document {
        DetectionDocument::List(detections) | DetectionDocument::Wrapped { detections } => {
            detections
        }
    })
}

fn parse_csv(path: &Path) -> Result<Vec<Detection>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::DetectionRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut detections = Vec::new();
    for (line_num, result) in reader.deserialize::<DetectionRecord>().enumerate() {
        let record = result.map_err(|e| Error::InvalidDetection {
            path: path.to_path_buf(),
            message: format!("line {}: {e}", line_num + 2),
        })?;
        detections.push(Detection::from(record));
    }

    Ok(detections)
}

/// Find a detection file stored next to an image.
///
/// Looks for `<stem>.detections.json`, then `<stem>.detections.csv`.
pub fn find_sibling_detection_file(image_path: &Path) -> Option<PathBuf> {
    let stem = image_path.file_stem()?.to_string_lossy();
    let dir = image_path.parent().unwrap_or_else(|| Path::new(""));

    DETECTION_SUFFIXES
        .iter()
        .map(|suffix| dir.join(format!("{stem}{suffix}")))
        .find(|candidate| candidate.is_file())
}

/// Load the detections for an image.
///
/// An explicit file takes precedence over a sibling file. When neither
/// exists the image simply has no detections.
pub fn load_detections_for(image_path: &Path, explicit: Option<&Path>) -> Result<Vec<Detection>> {
    let source = explicit
        .map(Path::to_path_buf)
        .or_else(|| find_sibling_detection_file(image_path));

    match source {
        Some(path) => parse_detection_file(&path),
        None => {
            debug!("No detection file for {}", image_path.display());
            Ok(Vec::new())
        }
    }
}

/// Drop detections below `min_confidence`.
pub fn filter_by_confidence(detections: Vec<Detection>, min_confidence: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| d.confidence >= min_confidence)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_list() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            r#"[{{"class": 0, "class_name": "person", "confidence": 0.91, "bbox": [10, 10, 50, 80]}},
                {{"class": 2, "class_name": "car", "confidence": 0.45, "bbox": [60, 20, 90, 40]}}]"#
        )
        .unwrap();

        let detections = parse_detection_file(file.path()).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].class_name, "person");
        assert_eq!(detections[1].bbox, Some(BoundingBox::new(60, 20, 90, 40)));
    }

    #[test]
    fn test_parse_json_wrapped_objects() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            r#"{{"objects": [{{"class": 16, "class_name": "dog", "confidence": 0.7, "bbox": [1, 1, 5, 5]}}]}}"#
        )
        .unwrap();

        let detections = parse_detection_file(file.path()).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class_id, 16);
    }

    #[test]
    fn test_parse_csv() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "class_id,class_name,confidence,x1,y1,x2,y2").unwrap();
        writeln!(file, "0, person, 0.85, 10, 10, 50, 50").unwrap();
        writeln!(file, "2,car,0.30,20.5,30,40,60").unwrap();
        file.flush().unwrap();

        let detections = parse_detection_file(file.path()).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].class_name, "person");
        assert_eq!(detections[1].bbox, Some(BoundingBox::new(20, 30, 40, 60)));
    }

    #[test]
    fn test_parse_csv_header_only_is_empty() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "class_id,class_name,confidence,x1,y1,x2,y2").unwrap();

        let detections = parse_detection_file(file.path()).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_invalid_confidence_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"[{{"class_name": "cat", "confidence": 1.5, "bbox": [0, 0, 2, 2]}}]"#)
            .unwrap();

        let result = parse_detection_file(file.path());
        assert!(matches!(result, Err(Error::InvalidDetection { .. })));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let file = NamedTempFile::with_suffix(".txt").unwrap();
        let result = parse_detection_file(file.path());
        assert!(matches!(
            result,
            Err(Error::UnsupportedDetectionFormat { .. })
        ));
    }

    #[test]
    fn test_sibling_detection_file_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("street.jpg");
        assert!(find_sibling_detection_file(&image).is_none());
        assert!(load_detections_for(&image, None).unwrap().is_empty());

        let sibling = dir.path().join("street.detections.csv");
        std::fs::write(&sibling, "class_id,class_name,confidence,x1,y1,x2,y2\n").unwrap();
        assert_eq!(find_sibling_detection_file(&image), Some(sibling));
    }

    #[test]
    fn test_filter_by_confidence() {
        let detections = vec![
            Detection::new(0, "a", 0.2, BoundingBox::new(0, 0, 1, 1)),
            Detection::new(0, "b", 0.6, BoundingBox::new(0, 0, 1, 1)),
        ];
        let kept = filter_by_confidence(detections, 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].class_name, "b");
    }
}
