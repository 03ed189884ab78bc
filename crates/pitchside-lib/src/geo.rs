//! Geographic coordinates and great-circle distance.
//!
//! Distances use the Haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. The spherical model is off by up to ~0.5% compared
//! with an ellipsoid, which is fine for "what is near me" queries at city
//! scale (1–50 km) but not for navigation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude, rounded down so bounding boxes err wide.
const KM_PER_DEGREE: f64 = 111.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate without range checks.
    ///
    /// Values coming from stored rows go through here so malformed data keeps
    /// flowing; the ranking step rejects the resulting NaN distances.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Returns true when both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parse `"LAT,LON"`, tolerating surrounding whitespace.
    fn from_str(input: &str) -> Result<Self> {
        let parse_error = || Error::CoordinateParse {
            input: input.to_string(),
        };

        let (lat, lon) = input.split_once(',').ok_or_else(parse_error)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| parse_error())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| parse_error())?;

        Self::try_new(latitude, longitude)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Uses the `atan2` form of the Haversine formula so identical and antipodal
/// points stay well defined. The haversine term is clamped to `[0, 1]` before
/// the square roots; NaN inputs still propagate to a NaN result.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Latitude/longitude rectangle that encloses every point within a radius.
///
/// Used to narrow SQL scans before the exact distance check. The box is never
/// tighter than the circle: it widens to the full longitude range when it
/// would touch a pole or cross the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Box around `center` covering `radius_km`.
    ///
    /// Returns `None` for a non-positive or non-finite radius, or an invalid
    /// center, since no meaningful prefilter exists in those cases.
    pub fn around(center: Coordinate, radius_km: f64) -> Option<Self> {
        if !center.is_valid() || !radius_km.is_finite() || radius_km <= 0.0 {
            return None;
        }

        let lat_delta = radius_km / KM_PER_DEGREE;
        let min_latitude = (center.latitude - lat_delta).max(-90.0);
        let max_latitude = (center.latitude + lat_delta).min(90.0);

        let full_longitude = (-180.0, 180.0);
        let (min_longitude, max_longitude) = if min_latitude <= -90.0 || max_latitude >= 90.0 {
            full_longitude
        } else {
            // Longitude degrees shrink towards the poles; size the span at the
            // box edge closest to a pole.
            let widest = min_latitude.abs().max(max_latitude.abs());
            let lon_delta = lat_delta / widest.to_radians().cos();
            let min = center.longitude - lon_delta;
            let max = center.longitude + lon_delta;
            if lon_delta >= 180.0 || min < -180.0 || max > 180.0 {
                full_longitude
            } else {
                (min, max)
            }
        };

        Some(Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        })
    }

    /// Returns true if the coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
    }
}
