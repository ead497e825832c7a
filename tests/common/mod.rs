//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Solid-color test image.
pub fn solid_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([80, 110, 140]))
}

/// Write a PNG without any metadata.
pub fn write_png(path: &Path, width: u32, height: u32) {
    solid_image(width, height).save(path).unwrap();
}

fn rationals(values: [(u32, u32); 3]) -> Value {
    Value::Rational(
        values
            .iter()
            .map(|&(num, denom)| exif::Rational { num, denom })
            .collect(),
    )
}

fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

/// TIFF-encoded EXIF block placing the photo in San Francisco
/// (37°46'29.64"N, 122°25'9.84"W).
fn san_francisco_exif() -> Vec<u8> {
    let fields = [
        (Tag::GPSLatitudeRef, ascii("N")),
        (Tag::GPSLatitude, rationals([(37, 1), (46, 1), (2964, 100)])),
        (Tag::GPSLongitudeRef, ascii("W")),
        (Tag::GPSLongitude, rationals([(122, 1), (25, 1), (984, 100)])),
    ]
    .map(|(tag, value)| Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    });

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

/// JPEG carrying San Francisco GPS coordinates in an APP1 segment.
pub fn gps_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 90)
        .encode_image(&solid_image(width, height))
        .unwrap();

    let tiff = san_francisco_exif();
    let length = u16::try_from(2 + 6 + tiff.len()).unwrap();

    // APP1 goes straight after SOI
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Detection list in the detector's JSON shape.
pub const DETECTIONS_JSON: &str = r#"[
  {"class": 0, "class_name": "person", "confidence": 0.91, "bbox": [4, 4, 30, 40]},
  {"class": 2, "class_name": "car", "confidence": 0.55, "bbox": [20, 10, 60, 30]},
  {"class": 9, "class_name": "traffic light", "confidence": 0.12, "bbox": [50, 2, 56, 12]}
]"#;
