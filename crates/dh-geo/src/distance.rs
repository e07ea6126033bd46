//! Distance models used to measure how far a vertex is from a building.

use geo::line_measures::Distance;
use geo::{Coord, Euclidean, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Mean metres per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Smallest cosine used when widening longitude extents near the poles.
const MIN_COS_LAT: f64 = 1e-6;

/// How distances between two coordinates are measured.
///
/// Geographic models read `x` as longitude and `y` as latitude in degrees and
/// return metres; `Euclidean` works in the units of projected coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Geodesic distance on the WGS84 reference ellipsoid.
    #[default]
    Geodesic,
    /// Great-circle distance on a mean-radius sphere.
    Haversine,
    /// Planar distance for projected coordinate systems.
    Euclidean,
}

impl DistanceModel {
    pub fn distance(self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        let (a, b) = (Point::from(a), Point::from(b));
        match self {
            DistanceModel::Geodesic => Geodesic.distance(a, b),
            DistanceModel::Haversine => Haversine.distance(a, b),
            DistanceModel::Euclidean => Euclidean.distance(a, b),
        }
    }

    /// Half-widths (dx, dy) in coordinate units of a box around `at` that
    /// contains every point closer than `tolerance` under this model.
    pub fn search_extent(self, at: Coord<f64>, tolerance: f64) -> (f64, f64) {
        match self {
            DistanceModel::Euclidean => (tolerance, tolerance),
            DistanceModel::Geodesic | DistanceModel::Haversine => {
                // Doubled to stay clear of the ellipsoid's flattening.
                let dy = 2.0 * tolerance / METERS_PER_DEGREE;
                let cos_lat = at.y.to_radians().cos().abs().max(MIN_COS_LAT);
                (dy / cos_lat, dy)
            }
        }
    }
}
