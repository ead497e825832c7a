//! Sexagesimal to decimal degree conversion.

use serde::{Deserialize, Serialize};

/// Unsigned rational number as stored in GPS metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub denom: u32,
}

impl Rational {
    /// Create a rational number.
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Value as `f64`; a zero denominator yields `0.0`.
    pub fn to_f64(self) -> f64 {
        if self.denom == 0 {
            0.0
        } else {
            f64::from(self.num) / f64::from(self.denom)
        }
    }
}

impl From<(u32, u32)> for Rational {
    fn from((num, denom): (u32, u32)) -> Self {
        Self::new(num, denom)
    }
}

impl From<&exif::Rational> for Rational {
    fn from(r: &exif::Rational) -> Self {
        Self::new(r.num, r.denom)
    }
}

/// Degrees, minutes and seconds.
pub type Dms = [Rational; 3];

/// Latitude hemisphere reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatitudeRef {
    /// Northern hemisphere.
    #[default]
    North,
    /// Southern hemisphere.
    South,
}

/// Longitude hemisphere reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongitudeRef {
    /// Eastern hemisphere.
    #[default]
    East,
    /// Western hemisphere.
    West,
}

impl LatitudeRef {
    /// Parse a reference letter; anything but `S` means north.
    pub fn from_letter(letter: u8) -> Self {
        if letter.eq_ignore_ascii_case(&b'S') {
            Self::South
        } else {
            Self::North
        }
    }
}

impl LongitudeRef {
    /// Parse a reference letter; anything but `W` means east.
    pub fn from_letter(letter: u8) -> Self {
        if letter.eq_ignore_ascii_case(&b'W') {
            Self::West
        } else {
            Self::East
        }
    }
}

/// Raw GPS values as found in image metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGps {
    /// Latitude as degrees, minutes, seconds.
    pub latitude: Dms,
    /// Longitude as degrees, minutes, seconds.
    pub longitude: Dms,
    /// Latitude hemisphere.
    pub lat_ref: LatitudeRef,
    /// Longitude hemisphere.
    pub lon_ref: LongitudeRef,
}

impl RawGps {
    /// Convert to signed decimal degrees.
    ///
    /// Values are not clamped: malformed metadata can produce a
    /// coordinate outside the valid range (see [`GeoCoordinate::is_valid`]).
    pub fn to_coordinate(&self) -> GeoCoordinate {
        let mut latitude = decimal_degrees(&self.latitude);
        let mut longitude = decimal_degrees(&self.longitude);

        if self.lat_ref == LatitudeRef::South {
            latitude = -latitude;
        }
        if self.lon_ref == LongitudeRef::West {
            longitude = -longitude;
        }

        GeoCoordinate {
            latitude,
            longitude,
        }
    }
}

/// Geographic coordinate in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude (-90.0 to 90.0 when valid).
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0 when valid).
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components lie inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// `d + m/60 + s/3600`, each component taken as `num/denom`.
pub fn decimal_degrees(dms: &Dms) -> f64 {
    let [d, m, s] = *dms;
    d.to_f64() + m.to_f64() / 60.0 + s.to_f64() / 3600.0
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn dms(d: (u32, u32), m: (u32, u32), s: (u32, u32)) -> Dms {
        [d.into(), m.into(), s.into()]
    }

    #[test]
    fn test_whole_degrees() {
        for d in [0, 1, 45, 90, 179] {
            assert_eq!(decimal_degrees(&dms((d, 1), (0, 1), (0, 1))), f64::from(d));
        }
    }

    #[test]
    fn test_minutes_contribute_sixtieths() {
        assert_eq!(decimal_degrees(&dms((1, 1), (30, 1), (0, 1))), 1.5);
    }

    #[test]
    fn test_seconds_and_fractional_rationals() {
        let value = decimal_degrees(&dms((37, 1), (46, 1), (2964, 100)));
        assert!((value - 37.774_9).abs() < 1e-4);
    }

    #[test]
    fn test_zero_denominator_is_zero() {
        assert_eq!(Rational::new(5, 0).to_f64(), 0.0);
        assert_eq!(decimal_degrees(&dms((10, 1), (30, 0), (0, 0))), 10.0);
        assert_eq!(decimal_degrees(&dms((10, 0), (30, 1), (0, 0))), 0.5);
    }

    #[test]
    fn test_sign_correction() {
        let raw = RawGps {
            latitude: dms((10, 1), (0, 1), (0, 1)),
            longitude: dms((20, 1), (0, 1), (0, 1)),
            lat_ref: LatitudeRef::North,
            lon_ref: LongitudeRef::East,
        };
        assert_eq!(raw.to_coordinate(), GeoCoordinate::new(10.0, 20.0));

        let south_west = RawGps {
            lat_ref: LatitudeRef::South,
            lon_ref: LongitudeRef::West,
            ..raw
        };
        assert_eq!(south_west.to_coordinate(), GeoCoordinate::new(-10.0, -20.0));
    }

    #[test]
    fn test_reference_letters() {
        assert_eq!(LatitudeRef::from_letter(b'S'), LatitudeRef::South);
        assert_eq!(LatitudeRef::from_letter(b'N'), LatitudeRef::North);
        assert_eq!(LongitudeRef::from_letter(b'w'), LongitudeRef::West);
        assert_eq!(LongitudeRef::from_letter(b'E'), LongitudeRef::East);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let raw = RawGps {
            latitude: dms((95, 1), (0, 1), (0, 1)),
            longitude: dms((200, 1), (0, 1), (0, 1)),
            lat_ref: LatitudeRef::North,
            lon_ref: LongitudeRef::West,
        };
        let coordinate = raw.to_coordinate();
        assert_eq!(coordinate.latitude, 95.0);
        assert_eq!(coordinate.longitude, -200.0);
        assert!(!coordinate.is_valid());
    }
}
