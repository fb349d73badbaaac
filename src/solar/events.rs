//! Elevation crossing search.
//!
//! Two strategies, picked by threshold:
//!
//! - **Closed form** for sunrise/sunset (-0.833°) and solar noon. The hour angle
//!   at which the sun reaches the threshold is solved directly from the
//!   declination and equation of time at 12:00 UTC of the date.
//! - **Bisection** for every other threshold. The morning half of the UTC day
//!   (`[00:00, 12:00)`) is searched for rising crossings and the afternoon half
//!   (`[12:00, 24:00)`) for falling ones.
//!
//! ## Precondition
//!
//! Bisection assumes the solar elevation is monotonic inside each half-day
//! window. That is not checked. When it does not hold (high latitudes near the
//! equinoxes, longitudes far from Greenwich where local noon sits close to a
//! window edge) the result is best-effort: either an approximate crossing or
//! `None`. A threshold the sun never reaches that day is reported as `None`
//! through the final 1° acceptance check, which is how polar day and night show
//! up for the twilight bands.
//!
//! ## Range edges
//!
//! Closed-form crossings are offsets from 00:00 UTC of the date and are not
//! clamped to it. Far from Greenwich they can land on the neighbouring UTC day,
//! so sunrise on 1000-01-01 in the far east falls on 0999-12-31 and sunset on
//! 3000-12-31 in the far west on 3001-01-01. Those instants are outside the
//! supported year range: [`compute_sun_position`](super::compute_sun_position)
//! rejects them, and callers at the edges should check the date first.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::math::{to_degrees, to_radians};
use super::position::{julian_day, solar_coordinates, sun_position_unchecked};
use crate::constants::{
    BISECTION_ACCEPTANCE_DEGREES, BISECTION_MAX_ITERATIONS, BISECTION_MIN_INTERVAL_MS,
    BISECTION_TOLERANCE_DEGREES, SUNRISE_ELEVATION,
};
use crate::error::SolarResult;
use crate::geo::GeoCoordinate;
use crate::time::{at_minutes_after_midnight, utc_midnight, validate_date};

const HALF_DAY_MS: i64 = 12 * 60 * 60 * 1000;

/// Which way the sun passes through the target elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Morning, elevation increasing.
    Rising,
    /// Evening, elevation decreasing.
    Falling,
}

/// Instant on `date` at which the sun crosses `target_elevation` in `direction`.
///
/// `Ok(None)` means the threshold is not crossed that day. The sunrise/sunset
/// threshold uses the closed form; any other target uses bisection (see the
/// module docs for its precondition). Targets outside `[-90, 90]` or NaN can
/// never be crossed and also give `Ok(None)`.
pub fn find_elevation_crossing(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    target_elevation: f64,
    direction: Direction,
) -> SolarResult<Option<DateTime<Utc>>> {
    coordinate.validate()?;
    validate_date(date)?;

    if !(-90.0..=90.0).contains(&target_elevation) {
        return Ok(None);
    }

    if target_elevation == SUNRISE_ELEVATION {
        return Ok(closed_form_crossing(
            coordinate,
            date,
            target_elevation,
            direction,
        ));
    }

    Ok(bisect_crossing(coordinate, date, target_elevation, direction))
}

/// Sunrise on `date`, or `None` during polar day or polar night.
///
/// May fall on the previous UTC day (see the module docs on range edges).
pub fn calculate_sunrise(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
) -> SolarResult<Option<DateTime<Utc>>> {
    coordinate.validate()?;
    validate_date(date)?;
    Ok(closed_form_crossing(
        coordinate,
        date,
        SUNRISE_ELEVATION,
        Direction::Rising,
    ))
}

/// Sunset on `date`, or `None` during polar day or polar night.
///
/// May fall on the next UTC day (see the module docs on range edges).
pub fn calculate_sunset(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
) -> SolarResult<Option<DateTime<Utc>>> {
    coordinate.validate()?;
    validate_date(date)?;
    Ok(closed_form_crossing(
        coordinate,
        date,
        SUNRISE_ELEVATION,
        Direction::Falling,
    ))
}

/// Solar noon (upper transit) on `date`. Always defined.
pub fn calculate_solar_noon(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
) -> SolarResult<DateTime<Utc>> {
    coordinate.validate()?;
    validate_date(date)?;
    Ok(at_minutes_after_midnight(
        date,
        solar_noon_minutes(coordinate, date),
    ))
}

fn noon_julian_day(date: NaiveDate) -> f64 {
    julian_day(&(utc_midnight(date) + Duration::hours(12)))
}

/// Minutes after 00:00 UTC of the upper transit.
fn solar_noon_minutes(coordinate: &GeoCoordinate, date: NaiveDate) -> f64 {
    let solar = solar_coordinates(noon_julian_day(date));
    720.0 - 4.0 * coordinate.longitude() - solar.equation_of_time
}

/// Half the diurnal arc above `threshold`, in degrees of hour angle.
///
/// `None` when `cos H` falls outside `[-1, 1]`: above 1 the sun never climbs to
/// the threshold (polar night), below -1 it never drops to it (polar day).
fn threshold_hour_angle(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    threshold: f64,
) -> Option<f64> {
    let solar = solar_coordinates(noon_julian_day(date));
    let phi = to_radians(coordinate.latitude());
    let delta = to_radians(solar.declination);

    let cos_hour_angle = (to_radians(threshold).sin() - phi.sin() * delta.sin())
        / (phi.cos() * delta.cos());

    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return None;
    }
    Some(to_degrees(cos_hour_angle.acos()))
}

fn closed_form_crossing(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    threshold: f64,
    direction: Direction,
) -> Option<DateTime<Utc>> {
    let hour_angle = threshold_hour_angle(coordinate, date, threshold)?;
    let noon = solar_noon_minutes(coordinate, date);
    let minutes = match direction {
        Direction::Rising => noon - 4.0 * hour_angle,
        Direction::Falling => noon + 4.0 * hour_angle,
    };
    Some(at_minutes_after_midnight(date, minutes))
}

fn elevation_at(coordinate: &GeoCoordinate, millis: i64) -> Option<f64> {
    let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(sun_position_unchecked(coordinate, &instant).elevation)
}

fn bisect_crossing(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    target: f64,
    direction: Direction,
) -> Option<DateTime<Utc>> {
    let midnight = utc_midnight(date).timestamp_millis();
    let (mut low, mut high) = match direction {
        Direction::Rising => (midnight, midnight + HALF_DAY_MS),
        Direction::Falling => (midnight + HALF_DAY_MS, midnight + 2 * HALF_DAY_MS),
    };

    for _ in 0..BISECTION_MAX_ITERATIONS {
        if high - low < BISECTION_MIN_INTERVAL_MS {
            break;
        }

        let mid = low + (high - low) / 2;
        let elevation = elevation_at(coordinate, mid)?;

        if (elevation - target).abs() < BISECTION_TOLERANCE_DEGREES {
            return DateTime::from_timestamp_millis(mid);
        }

        let below = elevation < target;
        match (direction, below) {
            (Direction::Rising, true) | (Direction::Falling, false) => low = mid,
            (Direction::Rising, false) | (Direction::Falling, true) => high = mid,
        }
    }

    let mid = low + (high - low) / 2;
    let elevation = elevation_at(coordinate, mid)?;
    if (elevation - target).abs() <= BISECTION_ACCEPTANCE_DEGREES {
        DateTime::from_timestamp_millis(mid)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::position::compute_sun_position;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_polar_night_and_day_have_no_sunrise() {
        let arctic = GeoCoordinate::new(85.0, 0.0).unwrap();
        assert_eq!(calculate_sunrise(&arctic, date(2024, 12, 21)).unwrap(), None);
        assert_eq!(calculate_sunrise(&arctic, date(2024, 6, 21)).unwrap(), None);
        assert_eq!(calculate_sunset(&arctic, date(2024, 6, 21)).unwrap(), None);
    }

    #[test]
    fn test_london_midsummer_sunrise_and_sunset() {
        let london = GeoCoordinate::new(51.5074, -0.1278).unwrap();
        let day = date(2024, 6, 21);

        // Published: 03:43 and 20:21 UTC
        let sunrise = calculate_sunrise(&london, day).unwrap().unwrap();
        let sunset = calculate_sunset(&london, day).unwrap().unwrap();
        assert_eq!(sunrise.hour(), 3);
        assert!((40..=46).contains(&sunrise.minute()), "{sunrise}");
        assert_eq!(sunset.hour(), 20);
        assert!((18..=24).contains(&sunset.minute()), "{sunset}");
    }

    #[test]
    fn test_sunrise_elevation_matches_threshold() {
        let nyc = GeoCoordinate::new(40.7128, -74.0060).unwrap();
        let sunrise = calculate_sunrise(&nyc, date(2024, 3, 21)).unwrap().unwrap();
        let position = compute_sun_position(&nyc, &sunrise).unwrap();
        assert!((position.elevation - SUNRISE_ELEVATION).abs() < 0.1);
        // Rising sun in March is due east
        assert!((80.0..100.0).contains(&position.azimuth));
    }

    #[test]
    fn test_solar_noon_is_highest_and_due_south() {
        let paris = GeoCoordinate::new(48.8566, 2.3522).unwrap();
        let noon = calculate_solar_noon(&paris, date(2024, 8, 2)).unwrap();
        let at_noon = compute_sun_position(&paris, &noon).unwrap();
        let before = compute_sun_position(&paris, &(noon - Duration::minutes(20))).unwrap();
        let after = compute_sun_position(&paris, &(noon + Duration::minutes(20))).unwrap();

        assert!(at_noon.elevation > before.elevation);
        assert!(at_noon.elevation > after.elevation);
        assert!((at_noon.azimuth - 180.0).abs() < 0.5, "{}", at_noon.azimuth);
    }

    #[test]
    fn test_sunrise_threshold_dispatches_to_closed_form() {
        let nyc = GeoCoordinate::new(40.7128, -74.0060).unwrap();
        let day = date(2024, 6, 21);
        assert_eq!(
            find_elevation_crossing(&nyc, day, SUNRISE_ELEVATION, Direction::Rising).unwrap(),
            calculate_sunrise(&nyc, day).unwrap()
        );
        assert_eq!(
            find_elevation_crossing(&nyc, day, SUNRISE_ELEVATION, Direction::Falling).unwrap(),
            calculate_sunset(&nyc, day).unwrap()
        );
    }

    #[test]
    fn test_bisection_finds_civil_dawn_and_dusk() {
        let london = GeoCoordinate::new(51.5074, -0.1278).unwrap();
        let day = date(2024, 3, 20);

        let dawn = find_elevation_crossing(&london, day, -6.0, Direction::Rising)
            .unwrap()
            .unwrap();
        let dusk = find_elevation_crossing(&london, day, -6.0, Direction::Falling)
            .unwrap()
            .unwrap();

        for instant in [dawn, dusk] {
            let elevation = compute_sun_position(&london, &instant).unwrap().elevation;
            assert!((elevation + 6.0).abs() < 0.1, "elevation = {elevation}");
        }

        let sunrise = calculate_sunrise(&london, day).unwrap().unwrap();
        let sunset = calculate_sunset(&london, day).unwrap().unwrap();
        assert!(dawn < sunrise);
        assert!(dusk > sunset);
        // Civil twilight at London's latitude in March lasts about half an hour
        assert!((sunrise - dawn).num_minutes() > 25 && (sunrise - dawn).num_minutes() < 45);
    }

    #[test]
    fn test_unreachable_threshold_is_none() {
        // Midsummer London never gets darker than about -15°
        let london = GeoCoordinate::new(51.5074, -0.1278).unwrap();
        let day = date(2024, 6, 21);
        assert_eq!(
            find_elevation_crossing(&london, day, -18.0, Direction::Falling).unwrap(),
            None
        );
        assert_eq!(
            find_elevation_crossing(&london, day, -18.0, Direction::Rising).unwrap(),
            None
        );
        // Out-of-range targets are never crossed
        assert_eq!(
            find_elevation_crossing(&london, day, 95.0, Direction::Rising).unwrap(),
            None
        );
        assert_eq!(
            find_elevation_crossing(&london, day, f64::NAN, Direction::Rising).unwrap(),
            None
        );
    }

    #[test]
    fn test_crossings_at_range_edges_leave_the_supported_years() {
        let far_east = GeoCoordinate::new(0.0, 179.0).unwrap();
        let sunrise = calculate_sunrise(&far_east, date(1000, 1, 1))
            .unwrap()
            .unwrap();
        assert_eq!(sunrise.date_naive(), date(999, 12, 31));
        assert!(compute_sun_position(&far_east, &sunrise).is_err());

        let far_west = GeoCoordinate::new(0.0, -179.0).unwrap();
        let sunset = calculate_sunset(&far_west, date(3000, 12, 31))
            .unwrap()
            .unwrap();
        assert_eq!(sunset.date_naive(), date(3001, 1, 1));
        assert!(compute_sun_position(&far_west, &sunset).is_err());
    }

    #[test]
    fn test_invalid_inputs_are_errors() {
        let london = GeoCoordinate::new(51.5074, -0.1278).unwrap();
        assert!(calculate_sunrise(&london, date(3001, 1, 1)).is_err());
        assert!(
            find_elevation_crossing(&london, date(999, 1, 1), -6.0, Direction::Rising).is_err()
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let cape_town = GeoCoordinate::new(-33.9249, 18.4241).unwrap();
        let day = date(2024, 1, 15);
        let first = find_elevation_crossing(&cape_town, day, -12.0, Direction::Falling).unwrap();
        let second = find_elevation_crossing(&cape_town, day, -12.0, Direction::Falling).unwrap();
        assert_eq!(first, second);
    }
}
