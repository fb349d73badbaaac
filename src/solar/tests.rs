use super::*;
use crate::error::SolarError;
use crate::geo::GeoCoordinate;
use crate::timezone::TimezoneResolver;
use chrono::{Duration, NaiveDate, TimeZone, Timelike, Utc};

fn coord(latitude: f64, longitude: f64) -> GeoCoordinate {
    GeoCoordinate::new(latitude, longitude).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn london() -> GeoCoordinate {
    coord(51.5074, -0.1278)
}

fn nyc() -> GeoCoordinate {
    coord(40.7128, -74.0060)
}

#[test]
fn test_equinox_profile_windows_nest() {
    let profile = calculate_sun_times(&london(), date(2024, 3, 20)).unwrap();

    let sunrise = profile.sunrise.unwrap();
    let sunset = profile.sunset.unwrap();
    let civil = &profile.civil_twilight;
    let nautical = &profile.nautical_twilight;
    let astronomical = &profile.astronomical_twilight;

    assert!(civil.morning.is_complete() && civil.evening.is_complete());
    assert!(nautical.morning.is_complete() && nautical.evening.is_complete());
    assert!(astronomical.morning.is_complete() && astronomical.evening.is_complete());

    // Morning: astronomical -> nautical -> civil -> sunrise
    assert_eq!(civil.morning.end, Some(sunrise));
    assert_eq!(nautical.morning.end, civil.morning.start);
    assert_eq!(astronomical.morning.end, nautical.morning.start);
    assert!(astronomical.morning.start < nautical.morning.start);
    assert!(nautical.morning.start < civil.morning.start);
    assert!(civil.morning.start < Some(sunrise));

    // Evening mirrors it
    assert_eq!(civil.evening.start, Some(sunset));
    assert_eq!(nautical.evening.start, civil.evening.end);
    assert_eq!(astronomical.evening.start, nautical.evening.end);
    assert!(civil.evening.end < nautical.evening.end);
    assert!(nautical.evening.end < astronomical.evening.end);

    assert!(sunrise < profile.solar_noon && profile.solar_noon < sunset);
}

#[test]
fn test_golden_and_blue_hours_share_boundaries() {
    let profile = calculate_sun_times(&london(), date(2024, 3, 20)).unwrap();
    let golden = &profile.golden_hour;
    let blue = &profile.blue_hour;

    assert!(golden.morning.end.unwrap() <= golden.evening.start.unwrap());
    assert_eq!(blue.morning.end, golden.morning.start);
    assert_eq!(blue.evening.start, golden.evening.end);
    // The -6° crossing is also the civil twilight edge
    assert_eq!(golden.morning.start, profile.civil_twilight.morning.start);

    // The golden hour straddles sunrise
    let sunrise = profile.sunrise.unwrap();
    assert!(golden.morning.contains(&sunrise));
    let duration = golden.morning.duration().unwrap();
    assert!(duration > Duration::minutes(60) && duration < Duration::minutes(100));
}

#[test]
fn test_day_length_matches_sunrise_and_sunset() {
    let profile = calculate_sun_times(&london(), date(2024, 3, 20)).unwrap();
    let day_length = profile.day_length.unwrap();
    assert!((12.0..12.4).contains(&day_length), "{day_length}");

    let expected = (profile.sunset.unwrap() - profile.sunrise.unwrap()).num_milliseconds() as f64
        / 3_600_000.0;
    assert!((day_length - expected).abs() < 1e-9);

    let midsummer = calculate_sun_times(&london(), date(2024, 6, 21)).unwrap();
    assert!(midsummer.day_length.unwrap() > 16.0);
    assert!(midsummer.day_length.unwrap() < 24.0);
}

#[test]
fn test_white_night_has_no_astronomical_twilight() {
    let profile = calculate_sun_times(&london(), date(2024, 6, 21)).unwrap();

    assert!(profile.civil_twilight.morning.is_complete());
    assert!(profile.nautical_twilight.morning.start.is_some());
    assert_eq!(profile.astronomical_twilight.morning.start, None);
    assert_eq!(profile.astronomical_twilight.evening.end, None);
    assert!(!profile.astronomical_twilight.morning.is_complete());
    assert_eq!(profile.astronomical_twilight.morning.duration(), None);
    assert!(!profile.is_polar_day());
    assert!(!profile.is_polar_night());
}

#[test]
fn test_polar_profiles() {
    let arctic = coord(85.0, 0.0);
    let winter = calculate_sun_times(&arctic, date(2024, 12, 21)).unwrap();
    assert_eq!(winter.sunrise, None);
    assert_eq!(winter.sunset, None);
    assert_eq!(winter.day_length, None);
    assert!(winter.is_polar_night());
    assert!(!winter.is_polar_day());

    let summer = calculate_sun_times(&arctic, date(2024, 6, 21)).unwrap();
    assert_eq!(summer.sunrise, None);
    assert!(summer.is_polar_day());
    assert!(summer.noon_elevation > 0.0);

    // Svalbard in December still has a noon twilight glow
    let svalbard = calculate_sun_times(&coord(78.22, 15.65), date(2024, 12, 21)).unwrap();
    assert!(svalbard.is_polar_night());
    assert!(svalbard.noon_elevation > -18.0);
}

#[test]
fn test_profile_rejects_invalid_input() {
    assert!(matches!(
        calculate_sun_times(&london(), date(3001, 1, 1)),
        Err(SolarError::InvalidInstant(_))
    ));
}

#[test]
fn test_profile_in_local_time() {
    let resolver = TimezoneResolver::default();

    // Before the clocks change
    let march = calculate_sun_times(&london(), date(2024, 3, 20))
        .unwrap()
        .to_local(&resolver)
        .unwrap();
    assert_eq!(march.timezone.zone_id, "Europe/London");
    assert!(!march.timezone.is_dst);
    let sunrise = march.sunrise.unwrap();
    assert_eq!(sunrise.offset_minutes, 0);
    assert_eq!((sunrise.wall_clock.hour(), sunrise.wall_clock.minute()), (6, 1));

    let june = calculate_sun_times(&london(), date(2024, 6, 21))
        .unwrap()
        .to_local(&resolver)
        .unwrap();
    assert!(june.timezone.is_dst);
    assert_eq!(june.timezone.offset_minutes, 60);
    let sunrise = june.sunrise.unwrap();
    assert_eq!((sunrise.wall_clock.hour(), sunrise.wall_clock.minute()), (4, 43));
    assert_eq!(june.astronomical_twilight.morning.start, None);
    assert!(june.golden_hour.evening.is_complete());
}

#[test]
fn test_profile_serializes_to_json() {
    let profile = calculate_sun_times(&london(), date(2024, 6, 21)).unwrap();
    let json = serde_json::to_value(&profile).unwrap();

    assert_eq!(json["date"], "2024-06-21");
    assert_eq!(json["coordinate"]["latitude"], 51.5074);
    assert!(json["sunrise"].as_str().unwrap().starts_with("2024-06-21T03:43"));
    assert!(json["golden_hour"]["morning"]["start"].is_string());
    assert!(json["astronomical_twilight"]["morning"]["start"].is_null());
}

#[test]
fn test_hourly_sun_path() {
    let day = date(2024, 6, 21);
    let path = generate_sun_path(&nyc(), day, 60).unwrap();
    assert_eq!(path.len(), 24);
    assert_eq!(path.interval_minutes(), 60);

    let points: Vec<_> = path.collect();
    assert_eq!(points.len(), 24);
    assert_eq!(points[0].time, Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap());
    for pair in points.windows(2) {
        assert_eq!((pair[1].time - pair[0].time).num_milliseconds(), 3_600_000);
    }
    assert!(points.iter().all(|point| point.time.date_naive() == day));

    // Each sample is the position model at that instant
    let noon = &points[17];
    assert_eq!(noon.position, compute_sun_position(&nyc(), &noon.time).unwrap());
}

#[test]
fn test_sun_path_can_be_walked_again() {
    let mut path = generate_sun_path(&london(), date(2024, 3, 20), 120).unwrap();
    let copy = path.clone();

    let first: Vec<_> = path.by_ref().collect();
    assert_eq!(path.len(), 0);
    assert_eq!(path.next(), None);

    path.restart();
    let again: Vec<_> = path.collect();
    assert_eq!(first, again);
    assert_eq!(copy.collect::<Vec<_>>(), first);
}

#[test]
fn test_sun_path_lengths() {
    let day = date(2024, 6, 21);
    assert_eq!(generate_default_sun_path(&nyc(), day).unwrap().len(), 96);
    assert_eq!(generate_sun_path(&nyc(), day, 1).unwrap().len(), 1440);
    assert_eq!(generate_sun_path(&nyc(), day, 1440).unwrap().len(), 1);
    // 7 does not divide a day: the last sample is at 23:55
    let odd: Vec<_> = generate_sun_path(&nyc(), day, 7).unwrap().collect();
    assert_eq!(odd.len(), 206);
    assert_eq!(odd.last().unwrap().time.time().hour(), 23);
}

#[test]
fn test_sun_path_interval_bounds() {
    let day = date(2024, 6, 21);
    assert_eq!(
        generate_sun_path(&nyc(), day, 0).unwrap_err(),
        SolarError::IntervalRange(0)
    );
    assert_eq!(
        generate_sun_path(&nyc(), day, 1441).unwrap_err(),
        SolarError::IntervalRange(1441)
    );
}

#[test]
fn test_position_at_time_of_day() {
    let day = date(2024, 3, 21);
    let point = get_sun_position_at_time(&nyc(), day, 17, 0).unwrap();
    assert_eq!(point.time, Utc.with_ymd_and_hms(2024, 3, 21, 17, 0, 0).unwrap());
    assert!((45.0..55.0).contains(&point.position.elevation));

    assert!(matches!(
        get_sun_position_at_time(&nyc(), day, 24, 0),
        Err(SolarError::InvalidInstant(_))
    ));
    assert!(get_sun_position_at_time(&nyc(), day, 12, 60).is_err());
}

#[test]
fn test_day_night_status_in_nautical_twilight() {
    // About -10° over New York after midsummer sunset
    let instant = Utc.with_ymd_and_hms(2024, 6, 22, 1, 32, 0).unwrap();
    let status = get_day_night_status(&nyc(), &instant).unwrap();

    assert!((-11.0..-9.0).contains(&status.position.elevation));
    assert_eq!(status.status, LightStatus::NauticalTwilight);
    assert_eq!(status.status.to_string(), "nautical_twilight");
    assert!(!status.is_visible);
}

#[test]
fn test_day_night_status_day_and_night() {
    let noon = calculate_solar_noon(&london(), date(2024, 6, 21)).unwrap();
    let day = get_day_night_status(&london(), &noon).unwrap();
    assert_eq!(day.status, LightStatus::Day);
    assert!(day.is_visible);

    let midnight = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
    let night = get_day_night_status(&london(), &midnight).unwrap();
    assert_eq!(night.status, LightStatus::Night);
    assert!(!night.is_visible);
}

#[test]
fn test_light_status_boundaries() {
    assert_eq!(LightStatus::from_elevation(0.1), LightStatus::Day);
    assert_eq!(LightStatus::from_elevation(0.0), LightStatus::CivilTwilight);
    assert_eq!(LightStatus::from_elevation(-6.0), LightStatus::NauticalTwilight);
    assert_eq!(LightStatus::from_elevation(-12.0), LightStatus::AstronomicalTwilight);
    assert_eq!(LightStatus::from_elevation(-17.9), LightStatus::AstronomicalTwilight);
    assert_eq!(LightStatus::from_elevation(-18.0), LightStatus::Night);
    assert_eq!(
        serde_json::to_value(LightStatus::AstronomicalTwilight).unwrap(),
        "astronomical_twilight"
    );
}
