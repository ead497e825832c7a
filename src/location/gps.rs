//! GPS metadata extraction from embedded EXIF data.

use std::io::Cursor;

use exif::{Exif, Field, In, Reader, Tag, Value};

use super::convert::{Dms, LatitudeRef, LongitudeRef, Rational, RawGps};

/// Outcome of looking for GPS metadata in an image.
///
/// Neither `Absent` nor `Failed` is an error for the caller; both mean
/// "no coordinate". They are kept apart so the reason can be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpsLookup {
    /// Latitude and longitude were found.
    Found(RawGps),
    /// The image has no GPS block, or the block lacks a coordinate.
    Absent,
    /// The metadata could not be parsed.
    Failed(String),
}

/// Extract raw GPS values from an encoded image (JPEG, PNG, TIFF, WebP, HEIF).
pub fn extract_gps(bytes: &[u8]) -> GpsLookup {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => gps_from_exif(&exif),
        Err(exif::Error::NotFound(_)) => GpsLookup::Absent,
        Err(e) => GpsLookup::Failed(e.to_string()),
    }
}

/// Pull the GPS fields out of parsed EXIF data.
pub fn gps_from_exif(exif: &Exif) -> GpsLookup {
    let (Some(lat_field), Some(lon_field)) = (
        exif.get_field(Tag::GPSLatitude, In::PRIMARY),
        exif.get_field(Tag::GPSLongitude, In::PRIMARY),
    ) else {
        return GpsLookup::Absent;
    };

    let (Some(latitude), Some(longitude)) = (field_dms(lat_field), field_dms(lon_field)) else {
        return GpsLookup::Failed("GPS latitude/longitude are not rational triples".to_string());
    };

    let lat_ref = reference_letter(exif, Tag::GPSLatitudeRef)
        .map(LatitudeRef::from_letter)
        .unwrap_or_default();
    let lon_ref = reference_letter(exif, Tag::GPSLongitudeRef)
        .map(LongitudeRef::from_letter)
        .unwrap_or_default();

    GpsLookup::Found(RawGps {
        latitude,
        longitude,
        lat_ref,
        lon_ref,
    })
}

fn field_dms(field: &Field) -> Option<Dms> {
    match &field.value {
        Value::Rational(values) if values.len() >= 3 => Some([
            Rational::from(&values[0]),
            Rational::from(&values[1]),
            Rational::from(&values[2]),
        ]),
        _ => None,
    }
}

fn reference_letter(exif: &Exif, tag: Tag) -> Option<u8> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(strings) => strings.first()?.first().copied(),
        _ => None,
    }
}
