//! Distance and bounding-box maths on a spherical earth
//!
//! Distances use the haversine formula from `geo` and are expressed in
//! miles. Bounding boxes are conservative supersets of the search disk so
//! they can be used as an index-friendly SQL prefilter.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::errors::{CitiesError, Result};

/// Mean earth radius used by [`geo::Haversine`]
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;
pub const METERS_PER_MILE: f64 = 1_609.344;

/// Slack added to every bounding box edge, in degrees
const BBOX_EPSILON_DEG: f64 = 1e-9;

/// A WGS84 latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject out-of-range or non-finite coordinates
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CitiesError::validation(format!(
                "latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CitiesError::validation(format!(
                "longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// `geo` points are (x = longitude, y = latitude)
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point<f64>> for Coordinates {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// Great-circle distance in miles
pub fn distance_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b) / METERS_PER_MILE
}

/// Half the earth's circumference: every point lies within this distance
pub fn max_distance_miles() -> f64 {
    std::f64::consts::PI * EARTH_RADIUS_METERS / METERS_PER_MILE
}

pub fn covers_globe(miles: f64) -> bool {
    miles >= max_distance_miles()
}

/// A radius must be a finite, non-negative number of miles
pub fn validate_radius(miles: f64) -> Result<()> {
    if !miles.is_finite() || miles < 0.0 {
        return Err(CitiesError::validation(format!(
            "range_in_miles must be a finite, non-negative number, got {}",
            miles
        )));
    }
    Ok(())
}

/// Longitude extent of a bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LongitudeSpan {
    /// No longitude restriction (polar caps, huge radii)
    All,
    Range { min: f64, max: f64 },
    /// The box straddles the antimeridian
    Split { west: (f64, f64), east: (f64, f64) },
}

impl LongitudeSpan {
    pub fn contains(&self, longitude: f64) -> bool {
        match *self {
            LongitudeSpan::All => true,
            LongitudeSpan::Range { min, max } => (min..=max).contains(&longitude),
            LongitudeSpan::Split { west, east } => {
                (west.0..=west.1).contains(&longitude) || (east.0..=east.1).contains(&longitude)
            }
        }
    }
}

/// Latitude/longitude box enclosing every point within a radius of a center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub longitude: LongitudeSpan,
}

impl BoundingBox {
    pub fn around(center: Point<f64>, miles: f64) -> Self {
        let lat = center.y();
        let lon = center.x();
        let angular = miles * METERS_PER_MILE / EARTH_RADIUS_METERS;
        let dlat = angular.to_degrees();

        let min_lat = lat - dlat - BBOX_EPSILON_DEG;
        let max_lat = lat + dlat + BBOX_EPSILON_DEG;

        // A pole inside the disk means every meridian is reachable
        if min_lat <= -90.0 || max_lat >= 90.0 {
            return Self {
                min_lat: min_lat.max(-90.0),
                max_lat: max_lat.min(90.0),
                longitude: LongitudeSpan::All,
            };
        }

        // Widest longitude offset of a spherical cap
        let ratio = angular.sin() / lat.to_radians().cos();
        if ratio >= 1.0 {
            return Self {
                min_lat,
                max_lat,
                longitude: LongitudeSpan::All,
            };
        }
        let dlon = ratio.asin().to_degrees() + BBOX_EPSILON_DEG;
        if dlon >= 180.0 {
            return Self {
                min_lat,
                max_lat,
                longitude: LongitudeSpan::All,
            };
        }

        let west = lon - dlon;
        let east = lon + dlon;
        let longitude = if west < -180.0 {
            LongitudeSpan::Split {
                west: (-180.0, east),
                east: (west + 360.0, 180.0),
            }
        } else if east > 180.0 {
            LongitudeSpan::Split {
                west: (-180.0, east - 360.0),
                east: (west, 180.0),
            }
        } else {
            LongitudeSpan::Range {
                min: west,
                max: east,
            }
        };

        Self {
            min_lat,
            max_lat,
            longitude,
        }
    }

    pub fn contains(&self, point: Point<f64>) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.y()) && self.longitude.contains(point.x())
    }
}
