//! Low-precision solar position model.
//!
//! A single-pass, closed-form model accurate to roughly a hundredth of a degree
//! over the supported calendar range: mean longitude and anomaly since J2000.0,
//! one perturbation term for the ecliptic longitude and a fixed mean obliquity.
//! Nutation, precession and refraction are not modelled.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

use super::math::{
    normalize_degrees, normalize_signed_degrees, to_degrees, to_radians, wrap_azimuth,
};
use crate::constants::{J2000_JULIAN_DAY, MEAN_OBLIQUITY};
use crate::error::SolarResult;
use crate::geo::GeoCoordinate;
use crate::time::{utc_minutes_of_day, validate_instant};

/// Horizontal position of the sun for an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    /// Compass bearing in degrees, clockwise from north, in `[0, 360)`.
    pub azimuth: f64,
    /// Degrees above the horizon, in `(-90, 90)`.
    pub elevation: f64,
    /// Earth-Sun distance in astronomical units.
    pub distance_au: f64,
}

/// Observer-independent quantities for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarCoordinates {
    /// Degrees north of the celestial equator.
    pub declination: f64,
    /// Apparent minus mean solar time, in minutes.
    pub equation_of_time: f64,
    /// Mean anomaly in degrees.
    pub mean_anomaly: f64,
}

/// Julian day for a UTC instant (Gregorian calendar, noon epoch).
pub fn julian_day(instant: &DateTime<Utc>) -> f64 {
    let year = instant.year() as i64;
    let month = instant.month() as i64;
    let day = instant.day() as i64;

    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    let day_number = day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;

    let day_fraction = (instant.hour() as f64 - 12.0) / 24.0
        + instant.minute() as f64 / 1440.0
        + (instant.second() as f64 + instant.timestamp_subsec_millis() as f64 / 1000.0)
            / 86_400.0;

    day_number as f64 + day_fraction
}

/// Declination, equation of time and mean anomaly for a Julian day.
pub fn solar_coordinates(julian_day: f64) -> SolarCoordinates {
    let n = julian_day - J2000_JULIAN_DAY;
    let mean_longitude = normalize_degrees(280.460 + 0.985_647_4 * n);
    let mean_anomaly = normalize_degrees(357.528 + 0.985_600_3 * n);
    let g = to_radians(mean_anomaly);

    let ecliptic_longitude =
        to_radians(mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin());
    let obliquity = to_radians(MEAN_OBLIQUITY);

    let declination = (obliquity.sin() * ecliptic_longitude.sin()).asin();
    let right_ascension = to_degrees(
        (obliquity.cos() * ecliptic_longitude.sin()).atan2(ecliptic_longitude.cos()),
    );

    // L and alpha live on different branches; the difference is small
    let equation_of_time = 4.0 * normalize_signed_degrees(mean_longitude - right_ascension);

    SolarCoordinates {
        declination: to_degrees(declination),
        equation_of_time,
        mean_anomaly,
    }
}

/// Solar declination in degrees at `instant`.
pub fn solar_declination(instant: &DateTime<Utc>) -> SolarResult<f64> {
    validate_instant(instant)?;
    Ok(solar_coordinates(julian_day(instant)).declination)
}

/// Equation of time in minutes at `instant`. Positive when the sundial is ahead
/// of the clock.
pub fn equation_of_time(instant: &DateTime<Utc>) -> SolarResult<f64> {
    validate_instant(instant)?;
    Ok(solar_coordinates(julian_day(instant)).equation_of_time)
}

/// Sun position seen from `coordinate` at `instant`.
///
/// Both inputs are validated before any trigonometry. The function is pure:
/// identical arguments always give bit-identical output.
pub fn compute_sun_position(
    coordinate: &GeoCoordinate,
    instant: &DateTime<Utc>,
) -> SolarResult<SolarPosition> {
    coordinate.validate()?;
    validate_instant(instant)?;
    Ok(sun_position_unchecked(coordinate, instant))
}

pub(crate) fn sun_position_unchecked(
    coordinate: &GeoCoordinate,
    instant: &DateTime<Utc>,
) -> SolarPosition {
    let solar = solar_coordinates(julian_day(instant));

    let true_solar_time =
        utc_minutes_of_day(instant) + solar.equation_of_time + 4.0 * coordinate.longitude();
    let hour_angle = to_radians(normalize_signed_degrees(true_solar_time / 4.0 - 180.0));

    let phi = to_radians(coordinate.latitude());
    let delta = to_radians(solar.declination);

    let sin_elevation = delta.sin() * phi.sin() + delta.cos() * phi.cos() * hour_angle.cos();
    let elevation = to_degrees(sin_elevation.clamp(-1.0, 1.0).asin());

    let azimuth = to_degrees(
        hour_angle
            .sin()
            .atan2(hour_angle.cos() * phi.sin() - delta.tan() * phi.cos()),
    );

    let g = to_radians(solar.mean_anomaly);
    let distance_au = 1.000_14 - 0.016_71 * g.cos() - 0.000_14 * (2.0 * g).cos();

    SolarPosition {
        azimuth: wrap_azimuth(azimuth + 180.0),
        elevation,
        distance_au,
    }
}
