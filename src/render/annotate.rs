//! Confidence-tiered bounding box annotation.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use tracing::trace;

use super::RenderSettings;
use super::font::{draw_text_mut, text_size};
use crate::constants::tiers;
use crate::detection::{ClampedBox, Detection};

/// Display tier of a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// Confidence above the high threshold.
    High,
    /// Confidence above the medium threshold.
    Medium,
    /// Everything else.
    Low,
}

impl ConfidenceTier {
    /// Tier for a confidence value. Both boundaries are exclusive.
    pub fn classify(confidence: f32, settings: &RenderSettings) -> Self {
        if confidence > settings.high_threshold {
            Self::High
        } else if confidence > settings.medium_threshold {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Outline and label background color.
    pub const fn color(self) -> Rgb<u8> {
        match self {
            Self::High => Rgb(tiers::HIGH_COLOR),
            Self::Medium => Rgb(tiers::MEDIUM_COLOR),
            Self::Low => Rgb(tiers::LOW_COLOR),
        }
    }
}

/// Label drawn above a box.
pub fn label_text(detection: &Detection) -> String {
    format!("{}: {:.2}", detection.class_name, detection.confidence)
}

/// Draw every detection onto a copy of `image`.
///
/// Detections are drawn in input order, so later boxes cover earlier
/// ones. Detections without a usable box are skipped.
pub fn render_annotations(
    image: &RgbImage,
    detections: &[Detection],
    settings: &RenderSettings,
) -> RgbImage {
    let mut annotated = image.clone();
    let (width, height) = annotated.dimensions();

    for detection in detections {
        let Some(bbox) = detection.clamped_bbox(width, height) else {
            trace!("Skipping '{}': no usable box", detection.class_name);
            continue;
        };

        let color = ConfidenceTier::classify(detection.confidence, settings).color();
        draw_outline(&mut annotated, bbox, settings.line_width, color);
        draw_label(
            &mut annotated,
            &label_text(detection),
            bbox,
            settings.label_scale,
            color,
        );
    }

    annotated
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Outline `line_width` pixels thick, growing inward from the box edge.
fn draw_outline(image: &mut RgbImage, bbox: ClampedBox, line_width: u32, color: Rgb<u8>) {
    for inset in 0..line_width.max(1) {
        let width = bbox.width().saturating_sub(2 * inset);
        let height = bbox.height().saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at(to_i32(bbox.x1 + inset), to_i32(bbox.y1 + inset)).of_size(width, height);
        draw_hollow_rect_mut(image, rect, color);
    }
}

/// Filled band ending at the box's top edge with the label on top.
fn draw_label(image: &mut RgbImage, label: &str, bbox: ClampedBox, scale: u32, color: Rgb<u8>) {
    let (text_width, text_height) = text_size(label, scale);
    if text_width == 0 {
        return;
    }

    let x = to_i32(bbox.x1);
    let top = to_i32(bbox.y1);
    let band_height = text_height + tiers::LABEL_PADDING;
    let band = Rect::at(x, top - to_i32(band_height)).of_size(text_width, band_height);
    draw_filled_rect_mut(image, band, color);

    let text_top = top - to_i32(tiers::LABEL_BASELINE_GAP + text_height);
    draw_text_mut(image, label, x, text_top, scale, Rgb(tiers::TEXT_COLOR));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;

    const GRAY: Rgb<u8> = Rgb([40, 40, 40]);

    fn canvas() -> RgbImage {
        RgbImage::from_pixel(100, 100, GRAY)
    }

    fn settings() -> RenderSettings {
        RenderSettings::default()
    }

    #[test]
    fn test_tier_boundaries_are_exclusive() {
        let s = settings();
        assert_eq!(ConfidenceTier::classify(0.95, &s), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::classify(0.71, &s), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::classify(0.7, &s), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::classify(0.5, &s), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::classify(0.4, &s), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::classify(0.1, &s), ConfidenceTier::Low);
    }

    #[test]
    fn test_tier_colors_are_green_cyan_orange() {
        assert_eq!(ConfidenceTier::High.color(), Rgb([0, 255, 0]));
        assert_eq!(ConfidenceTier::Medium.color(), Rgb([0, 255, 255]));
        assert_eq!(ConfidenceTier::Low.color(), Rgb([255, 165, 0]));
    }

    #[test]
    fn test_label_format() {
        let detection = Detection::new(0, "person", 0.876, BoundingBox::new(0, 0, 1, 1));
        assert_eq!(label_text(&detection), "person: 0.88");
    }

    #[test]
    fn test_box_color_follows_tier() {
        for (confidence, tier) in [
            (0.95, ConfidenceTier::High),
            (0.5, ConfidenceTier::Medium),
            (0.1, ConfidenceTier::Low),
        ] {
            let detection = Detection::new(0, "dog", confidence, BoundingBox::new(20, 40, 70, 90));
            let annotated = render_annotations(&canvas(), &[detection], &settings());

            // Bottom-left corner lies on the outline, away from the label.
            assert_eq!(*annotated.get_pixel(20, 89), tier.color());
            assert_eq!(*annotated.get_pixel(21, 88), tier.color());
            // Interior untouched.
            assert_eq!(*annotated.get_pixel(45, 75), GRAY);
        }
    }

    #[test]
    fn test_label_band_above_box() {
        let detection = Detection::new(0, "car", 0.9, BoundingBox::new(10, 60, 90, 95));
        let annotated = render_annotations(&canvas(), &[detection], &settings());

        let band: Vec<Rgb<u8>> = (10..90)
            .flat_map(|x| (34..60).map(move |y| (x, y)))
            .map(|(x, y)| *annotated.get_pixel(x, y))
            .collect();
        assert!(band.contains(&ConfidenceTier::High.color()));
        assert!(band.contains(&Rgb(tiers::TEXT_COLOR)));
        assert_eq!(*annotated.get_pixel(5, 50), GRAY);
    }

    #[test]
    fn test_source_image_is_untouched() {
        let source = canvas();
        let detection = Detection::new(0, "cat", 0.8, BoundingBox::new(10, 10, 50, 50));
        let annotated = render_annotations(&source, &[detection], &settings());

        assert_eq!(annotated.dimensions(), source.dimensions());
        assert!(source.pixels().all(|p| *p == GRAY));
    }

    #[test]
    fn test_unusable_boxes_are_skipped() {
        let detections = vec![
            Detection::new(0, "ghost", 0.9, BoundingBox::new(200, 200, 300, 300)),
            Detection::new(0, "flat", 0.9, BoundingBox::new(10, 10, 10, 50)),
            Detection {
                bbox: None,
                ..Detection::new(0, "none", 0.9, BoundingBox::new(0, 0, 1, 1))
            },
            Detection::new(0, "real", 0.5, BoundingBox::new(20, 40, 70, 90)),
        ];
        let annotated = render_annotations(&canvas(), &detections, &settings());
        assert_eq!(*annotated.get_pixel(20, 89), ConfidenceTier::Medium.color());
    }

    #[test]
    fn test_boxes_touching_edges_do_not_panic() {
        let detections = vec![
            Detection::new(0, "edge", 0.9, BoundingBox::new(-10, -10, 120, 120)),
            Detection::new(0, "sliver", 0.2, BoundingBox::new(99, 0, 100, 1)),
        ];
        let annotated = render_annotations(&canvas(), &detections, &settings());
        assert_eq!(annotated.dimensions(), (100, 100));
        assert_eq!(*annotated.get_pixel(0, 50), ConfidenceTier::High.color());
    }

    #[test]
    fn test_later_detection_draws_on_top() {
        let detections = vec![
            Detection::new(0, "first", 0.9, BoundingBox::new(20, 40, 70, 90)),
            Detection::new(0, "second", 0.1, BoundingBox::new(20, 40, 70, 90)),
        ];
        let annotated = render_annotations(&canvas(), &detections, &settings());
        assert_eq!(*annotated.get_pixel(20, 89), ConfidenceTier::Low.color());
    }
}
