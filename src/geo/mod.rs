//! Validated geographic coordinates.
//!
//! Every public computation in the crate takes a [`GeoCoordinate`]. The only way
//! to build one is [`GeoCoordinate::new`], so a coordinate that reaches the
//! position model is always finite and in range. Components still re-check at
//! their own entry points with [`GeoCoordinate::validate`], since a value may
//! have come in through deserialization.

use serde::{Deserialize, Serialize};

use crate::constants::TIMEZONE_CACHE_PRECISION;
use crate::error::{SolarError, SolarResult};


/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = SolarError;

    fn try_from(raw: RawCoordinate) -> SolarResult<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting NaN, infinities and out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> SolarResult<Self> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Re-check the invariant at a component boundary.
    pub fn validate(&self) -> SolarResult<()> {
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }

    /// Cache key: both axes rounded to two decimal places, scaled to integers.
    pub fn bucket_key(&self) -> (i32, i32) {
        (
            (self.latitude * TIMEZONE_CACHE_PRECISION).round() as i32,
            (self.longitude * TIMEZONE_CACHE_PRECISION).round() as i32,
        )
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{ns}, {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

fn validate_latitude(latitude: f64) -> SolarResult<()> {
    if !latitude.is_finite() {
        return Err(SolarError::Coordinate(format!(
            "latitude must be a finite number (got {latitude})"
        )));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(SolarError::Coordinate(format!(
            "latitude must be between -90 and 90 degrees (got {latitude})"
        )));
    }
    Ok(())
}

fn validate_longitude(longitude: f64) -> SolarResult<()> {
    if !longitude.is_finite() {
        return Err(SolarError::Coordinate(format!(
            "longitude must be a finite number (got {longitude})"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(SolarError::Coordinate(format!(
            "longitude must be between -180 and 180 degrees (got {longitude})"
        )));
    }
    Ok(())
}
