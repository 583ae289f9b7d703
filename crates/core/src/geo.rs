//! Great-circle geometry for arc rendering.
//!
//! Provides the angular distance between two coordinates and the derived
//! visual-flattening helpers a rendering layer feeds into its altitude
//! channel. All functions are total: no input produces NaN.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Calculates the great-circle angle between two points, in radians.
///
/// Uses the spherical law of cosines. The cosine argument is clamped to
/// `[-1, 1]` before `acos` so floating-point overshoot at identical or
/// antipodal points cannot produce NaN.
///
/// # Formula
/// ```text
/// angle = acos(sin(lat1)·sin(lat2) + cos(lat1)·cos(lat2)·cos(lng1 - lng2))
/// ```
///
/// # Examples
/// ```
/// use trade_sim_core::geo::{angular_distance, GeoPoint};
///
/// let origin = GeoPoint::new(0.0, 0.0);
/// let quarter = GeoPoint::new(0.0, 90.0);
/// let angle = angular_distance(origin, quarter);
/// assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[must_use]
pub fn angular_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (from.lng - to.lng).to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lng.cos();
    cos_angle.clamp(-1.0, 1.0).acos()
}

/// Calculates the visual flattening factor for an arc of the given angular
/// length.
///
/// Distances are normalized against a quarter circle and capped at 1, then
/// cubed so short arcs stay close to the surface while long-haul arcs rise
/// sharply.
///
/// # Formula
/// ```text
/// effect = min(angle / (π/2), 1)³ × 0.6
/// ```
///
/// # Examples
/// ```
/// use trade_sim_core::geo::distance_effect;
///
/// assert!((distance_effect(0.0) - 0.0).abs() < f64::EPSILON);
/// assert!((distance_effect(std::f64::consts::FRAC_PI_2) - 0.6).abs() < 1e-12);
/// ```
#[must_use]
pub fn distance_effect(angle_radians: f64) -> f64 {
    let normalized = (angle_radians / std::f64::consts::FRAC_PI_2).min(1.0);
    normalized.powi(3) * 0.6
}

/// Calculates the altitude channel for one rendered arc.
///
/// Combines a fixed base lift, the distance effect of the arc's length, and
/// a contribution from the arc's normalized trade value.
///
/// # Formula
/// ```text
/// altitude = 0.02 + effect + 0.1 × normalized_value
/// ```
#[must_use]
pub fn arc_altitude(normalized_value: f64, dist_effect: f64) -> f64 {
    0.02 + dist_effect + normalized_value * 0.1
}
