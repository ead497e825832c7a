//! Geolocation from embedded image metadata.
//!
//! Extraction, conversion and reverse geocoding run in that order to
//! produce a [`LocationInfo`]. None of the steps can fail the caller:
//! missing or broken metadata yields the unknown location, and a failed
//! lookup yields the coordinate fallback name.

mod convert;
mod geocoder;
mod gps;

pub use convert::{
    Dms, GeoCoordinate, LatitudeRef, LongitudeRef, Rational, RawGps, decimal_degrees,
};
pub use geocoder::{
    ConfiguredGeocoder, DisabledGeocoder, GeocodeOutcome, NominatimClient, ReverseGeocoder,
    fallback_name, resolve_name,
};
pub use gps::{GpsLookup, extract_gps, gps_from_exif};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::location::{GPS_CONFIDENCE, UNKNOWN_CONFIDENCE, UNKNOWN_NAME};

/// Resolved location of an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Coordinate from GPS metadata, absent when none was found.
    #[serde(flatten)]
    pub coordinate: Option<GeoCoordinate>,
    /// Place name, fallback string, or `"Unknown Location"`.
    pub name: String,
    /// Fixed heuristic: 0.9 with GPS metadata, 0.5 without.
    pub confidence: f32,
}

impl LocationInfo {
    /// Location for an image without usable GPS metadata.
    pub fn unknown() -> Self {
        Self {
            coordinate: None,
            name: UNKNOWN_NAME.to_string(),
            confidence: UNKNOWN_CONFIDENCE,
        }
    }

    /// Location for a coordinate read from metadata.
    pub fn geocoded(coordinate: GeoCoordinate, name: String) -> Self {
        Self {
            coordinate: Some(coordinate),
            name,
            confidence: GPS_CONFIDENCE,
        }
    }

    /// Map link for this location, if it has a coordinate.
    pub fn maps_url(&self, zoom: u8) -> Option<String> {
        self.coordinate.map(|c| maps_url(c, zoom))
    }
}

impl Default for LocationInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Google Maps link centred on a coordinate.
pub fn maps_url(coordinate: GeoCoordinate, zoom: u8) -> String {
    format!(
        "https://www.google.com/maps?q={},{}&z={zoom}",
        coordinate.latitude, coordinate.longitude
    )
}

/// Read the coordinate embedded in an image, if any.
///
/// Parse failures are logged and treated as absence.
pub fn read_coordinate(bytes: &[u8]) -> Option<GeoCoordinate> {
    match extract_gps(bytes) {
        GpsLookup::Found(raw) => {
            let coordinate = raw.to_coordinate();
            if !coordinate.is_valid() {
                warn!(
                    "GPS metadata out of range ({}, {}); keeping as-is",
                    coordinate.latitude, coordinate.longitude
                );
            }
            Some(coordinate)
        }
        GpsLookup::Absent => {
            debug!("No GPS metadata");
            None
        }
        GpsLookup::Failed(reason) => {
            debug!("Could not read image metadata: {reason}");
            None
        }
    }
}

/// Resolve the location of an encoded image.
///
/// The geocoder is only contacted when a coordinate was found.
pub async fn resolve_location<G: ReverseGeocoder>(bytes: &[u8], geocoder: &G) -> LocationInfo {
    match read_coordinate(bytes) {
        Some(coordinate) => {
            let name = resolve_name(geocoder, coordinate).await;
            LocationInfo::geocoded(coordinate, name)
        }
        None => LocationInfo::unknown(),
    }
}
