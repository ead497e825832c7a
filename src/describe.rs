//! Scene classification, description text and tags.
//!
//! Plain heuristics over the detection list and the resolved location.

use serde::{Deserialize, Serialize};

use crate::constants::describe::{MAX_LISTED_OBJECTS, MAX_OBJECT_TAGS, MAX_TAGS};
use crate::constants::location::UNKNOWN_NAME;
use crate::detection::Detection;
use crate::location::LocationInfo;

const URBAN_OBJECTS: &[&str] = &[
    "car",
    "bus",
    "truck",
    "traffic light",
    "stop sign",
    "person",
    "building",
];
const VEHICLE_OBJECTS: &[&str] = &[
    "car",
    "bus",
    "truck",
    "motorcycle",
    "bicycle",
    "airplane",
    "train",
    "boat",
];
const ANIMAL_OBJECTS: &[&str] = &[
    "bird", "cat", "dog", "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe",
];
const INDOOR_OBJECTS: &[&str] = &[
    "chair",
    "couch",
    "bed",
    "dining table",
    "tv",
    "laptop",
    "refrigerator",
];

/// Coarse scene type inferred from the detected objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneClass {
    /// Scene label, e.g. "Urban Area".
    #[serde(rename = "class")]
    pub label: String,
    /// Heuristic confidence, rounded to two decimals.
    pub confidence: f32,
    /// Number of detections the label was derived from.
    pub object_count: usize,
}

impl SceneClass {
    fn new(label: &str, confidence: f32, object_count: usize) -> Self {
        Self {
            label: label.to_string(),
            confidence: (confidence * 100.0).round() / 100.0,
            object_count,
        }
    }
}

fn count_in(detections: &[Detection], category: &[&str]) -> usize {
    detections
        .iter()
        .filter(|d| category.contains(&d.class_name.as_str()))
        .count()
}

/// Classify the scene from its detections.
pub fn classify_scene(detections: &[Detection]) -> SceneClass {
    let n = detections.len();
    if n == 0 {
        return SceneClass::new("Unknown", 0.5, 0);
    }

    let urban = count_in(detections, URBAN_OBJECTS);
    let vehicles = count_in(detections, VEHICLE_OBJECTS);
    let animals = count_in(detections, ANIMAL_OBJECTS);
    let indoor = count_in(detections, INDOOR_OBJECTS);

    if urban > 2 {
        let confidence = 0.05f32.mul_add(urban as f32, 0.6).min(0.9);
        SceneClass::new("Urban Area", confidence, n)
    } else if vehicles > 1 {
        SceneClass::new("Transportation Scene", 0.75, n)
    } else if animals > 0 {
        SceneClass::new("Animal Scene", 0.8, n)
    } else if indoor > 2 {
        SceneClass::new("Indoor Scene", 0.75, n)
    } else {
        SceneClass::new("General Scene", 0.65, n)
    }
}

/// Class names with their counts, most frequent first, ties in first-seen order.
fn object_counts(detections: &[Detection]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for detection in detections {
        match counts.iter_mut().find(|(name, _)| *name == detection.class_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((detection.class_name.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn average_confidence(detections: &[Detection]) -> Option<f32> {
    if detections.is_empty() {
        return None;
    }
    let sum: f32 = detections.iter().map(|d| d.confidence).sum();
    Some(sum / detections.len() as f32)
}

/// Resolved place name, if it is more than the unknown sentinel.
fn known_place(location: &LocationInfo) -> Option<&str> {
    let name = location.name.as_str();
    (!name.is_empty() && name != UNKNOWN_NAME).then_some(name)
}

/// One-paragraph description of the image.
pub fn describe(detections: &[Detection], scene: &SceneClass, location: &LocationInfo) -> String {
    let mut text = format!("This image shows a {}", scene.label.to_lowercase());
    if let Some(place) = known_place(location) {
        text.push_str(&format!(" located in {place}"));
    }
    text.push_str(". ");

    if let Some(average) = average_confidence(detections) {
        let listed: Vec<String> = object_counts(detections)
            .into_iter()
            .take(MAX_LISTED_OBJECTS)
            .map(|(name, count)| {
                if count > 1 {
                    format!("{count} {name}s")
                } else {
                    format!("1 {name}")
                }
            })
            .collect();

        text.push_str(&format!(
            "The image contains {} detected object(s): {}. ",
            detections.len(),
            listed.join(", ")
        ));
        text.push_str(&format!(
            "Average detection confidence: {:.1}%. ",
            average * 100.0
        ));
    } else {
        text.push_str("No specific objects were detected in this image. ");
    }

    let percent = scene.confidence * 100.0;
    if scene.confidence > 0.7 {
        text.push_str(&format!(
            "The image classification has high confidence ({percent:.1}%)."
        ));
    } else if scene.confidence > 0.5 {
        text.push_str(&format!(
            "The image classification has moderate confidence ({percent:.1}%)."
        ));
    }

    text.trim_end().to_string()
}

/// Search tags: scene label, last two parts of the place name, object
/// names and a confidence tag. Duplicates are dropped.
pub fn tags(detections: &[Detection], scene: &SceneClass, location: &LocationInfo) -> Vec<String> {
    let mut candidates: Vec<String> = vec![scene.label.clone()];

    if let Some(place) = known_place(location) {
        let parts: Vec<&str> = place.split(", ").collect();
        let tail = parts.len().saturating_sub(2);
        candidates.extend(parts[tail..].iter().map(|p| (*p).to_string()));
    }

    let mut objects: Vec<&str> = Vec::new();
    for detection in detections {
        if !objects.contains(&detection.class_name.as_str()) {
            objects.push(detection.class_name.as_str());
        }
    }
    candidates.extend(
        objects
            .into_iter()
            .take(MAX_OBJECT_TAGS)
            .map(ToString::to_string),
    );

    if let Some(average) = average_confidence(detections) {
        if average > 0.7 {
            candidates.push("high-confidence".to_string());
        } else if average > 0.4 {
            candidates.push("medium-confidence".to_string());
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for tag in candidates {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique.truncate(MAX_TAGS);
    unique
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;
    use crate::location::GeoCoordinate;

    fn detections(names: &[(&str, f32)]) -> Vec<Detection> {
        names
            .iter()
            .map(|&(name, conf)| Detection::new(0, name, conf, BoundingBox::new(0, 0, 10, 10)))
            .collect()
    }

    #[test]
    fn test_empty_scene_is_unknown() {
        let scene = classify_scene(&[]);
        assert_eq!(scene.label, "Unknown");
        assert_eq!(scene.confidence, 0.5);
        assert_eq!(scene.object_count, 0);
    }

    #[test]
    fn test_urban_confidence_grows_and_caps() {
        let scene = classify_scene(&detections(&[("car", 0.9), ("person", 0.8), ("bus", 0.7)]));
        assert_eq!(scene.label, "Urban Area");
        assert_eq!(scene.confidence, 0.75);

        let many: Vec<(&str, f32)> = vec![("person", 0.9); 12];
        assert_eq!(classify_scene(&detections(&many)).confidence, 0.9);
    }

    #[test]
    fn test_category_precedence() {
        let scene = classify_scene(&detections(&[("car", 0.9), ("boat", 0.8)]));
        assert_eq!(scene.label, "Transportation Scene");

        let scene = classify_scene(&detections(&[("dog", 0.9), ("chair", 0.8)]));
        assert_eq!(scene.label, "Animal Scene");

        let scene = classify_scene(&detections(&[("chair", 0.9), ("tv", 0.8), ("bed", 0.6)]));
        assert_eq!(scene.label, "Indoor Scene");

        let scene = classify_scene(&detections(&[("kite", 0.9)]));
        assert_eq!(scene.label, "General Scene");
        assert_eq!(scene.confidence, 0.65);
    }

    #[test]
    fn test_description_with_location_and_objects() {
        let found = detections(&[("dog", 0.9), ("dog", 0.7), ("cat", 0.8)]);
        let scene = classify_scene(&found);
        let location = LocationInfo::geocoded(GeoCoordinate::new(1.0, 2.0), "Paris, France".into());

        let text = describe(&found, &scene, &location);
        assert!(text.starts_with("This image shows a animal scene located in Paris, France. "));
        assert!(text.contains("3 detected object(s): 2 dogs, 1 cat."));
        assert!(text.contains("Average detection confidence: 80.0%."));
        assert!(text.ends_with("high confidence (80.0%)."));
    }

    #[test]
    fn test_description_without_objects_or_location() {
        let scene = classify_scene(&[]);
        let text = describe(&[], &scene, &LocationInfo::unknown());
        assert_eq!(
            text,
            "This image shows a unknown. No specific objects were detected in this image."
        );
    }

    #[test]
    fn test_tags() {
        let found = detections(&[("car", 0.9), ("car", 0.8), ("truck", 0.85)]);
        let scene = classify_scene(&found);
        let location = LocationInfo::geocoded(
            GeoCoordinate::new(1.0, 2.0),
            "Main St, Springfield, Illinois, USA".into(),
        );

        let tags = tags(&found, &scene, &location);
        assert_eq!(
            tags,
            vec![
                "Urban Area",
                "Illinois",
                "USA",
                "car",
                "truck",
                "high-confidence"
            ]
        );
    }

    #[test]
    fn test_tags_are_capped() {
        let names: Vec<String> = (0..20).map(|i| format!("thing{i}")).collect();
        let found: Vec<Detection> = names
            .iter()
            .map(|n| Detection::new(0, n, 0.5, BoundingBox::new(0, 0, 1, 1)))
            .collect();
        let scene = classify_scene(&found);
        let location = LocationInfo::geocoded(GeoCoordinate::new(0.0, 0.0), "A, B, C".into());

        let tags = tags(&found, &scene, &location);
        assert!(tags.len() <= 15);
        assert_eq!(tags.iter().filter(|t| t.starts_with("thing")).count(), 10);
        assert!(tags.contains(&"medium-confidence".to_string()));
    }
}
