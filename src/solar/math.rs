//! Angle helpers shared by the position model and the event search.
//!
//! All trigonometry in the crate goes through this single degrees/radians pair.

use std::f64::consts::PI;

#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Wrap any angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap any angle into `[-180, 180)`.
#[inline]
pub fn normalize_signed_degrees(degrees: f64) -> f64 {
    normalize_degrees(degrees + 180.0) - 180.0
}

/// Bring an `atan2(..) + 180` azimuth into `[0, 360)`.
///
/// The raw value is at most one period out of range, so two branches suffice.
#[inline]
pub fn wrap_azimuth(azimuth: f64) -> f64 {
    if azimuth < 0.0 {
        azimuth + 360.0
    } else if azimuth >= 360.0 {
        azimuth - 360.0
    } else {
        azimuth
    }
}
