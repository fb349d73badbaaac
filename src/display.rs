//! Human-readable solar report.
//!
//! Renders a [`DayLightProfile`] in the coordinate's local time through the
//! logger macros, and offers a JSON snapshot for tools that want the raw data.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::geo::GeoCoordinate;
use crate::solar::{DayLightProfile, LocalDayLightProfile, calculate_sun_times};
use crate::timezone::{LocalInstant, TimezoneProvider, TimezoneResolver};

const TIME_FORMAT: &str = "%H:%M:%S";
const MISSING_TIME: &str = "--:--:--";

/// Log the full lighting profile for `coordinate` on `date`.
///
/// Times are shown on the coordinate's wall clock, followed by UTC in brackets
/// when the zone is not on UTC that day. Thresholds that are never crossed show
/// as `--:--:--`.
pub fn log_solar_debug_info<P: TimezoneProvider>(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    resolver: &TimezoneResolver<P>,
) -> Result<()> {
    let profile = calculate_sun_times(coordinate, date)
        .with_context(|| format!("Failed to calculate sun times for {coordinate} on {date}"))?;
    let local = profile
        .to_local(resolver)
        .with_context(|| format!("Failed to resolve the timezone for {coordinate}"))?;

    log_version!();

    if profile.is_polar_day() {
        log_pipe!();
        log_warning!("Polar day: the sun does not set on {date}");
    } else if profile.is_polar_night() {
        log_pipe!();
        log_warning!("Polar night: the sun does not rise on {date}");
    }

    log_block_start!("Solar calculation details:");
    log_indented!("            Coordinates: {coordinate}");
    log_indented!("                   Date: {date}");
    log_indented!("    Coordinate Timezone: {}", local.timezone.display_name);
    log_indented!(
        "   Solar noon elevation: {:.2}°",
        profile.noon_elevation
    );

    log_decorated!("Sunrise (ascending):");
    log_morning(&local);

    log_decorated!("Sunset (descending):");
    log_evening(&local);

    log_indented!(
        "           Day duration: {}",
        format_day_length(profile.day_length)
    );
    log_end!();

    Ok(())
}

fn log_morning(local: &LocalDayLightProfile) {
    let rows = [
        ("Astronomical dawn (-18°)", &local.astronomical_twilight.morning.start),
        ("    Nautical dawn (-12°)", &local.nautical_twilight.morning.start),
        ("        Civil dawn (-6°)", &local.civil_twilight.morning.start),
        ("       Sunrise (-0.833°)", &local.sunrise),
        ("   Golden hour end (+6°)", &local.golden_hour.morning.end),
    ];
    for (label, time) in rows {
        log_indented!("{label}: {}", format_local(time.as_ref()));
    }
}

fn log_evening(local: &LocalDayLightProfile) {
    let rows = [
        (" Golden hour start (+6°)", &local.golden_hour.evening.start),
        ("        Sunset (-0.833°)", &local.sunset),
        ("        Civil dusk (-6°)", &local.civil_twilight.evening.end),
        ("    Nautical dusk (-12°)", &local.nautical_twilight.evening.end),
        ("Astronomical dusk (-18°)", &local.astronomical_twilight.evening.end),
    ];
    for (label, time) in rows {
        log_indented!("{label}: {}", format_local(time.as_ref()));
    }
}

/// `HH:MM:SS` on the local clock, with the UTC time in brackets when they differ.
pub fn format_local(instant: Option<&LocalInstant>) -> String {
    let Some(instant) = instant else {
        return MISSING_TIME.to_string();
    };

    let local = instant.wall_clock.format(TIME_FORMAT);
    if instant.offset_minutes == 0 {
        return local.to_string();
    }

    match instant.to_utc() {
        Ok(utc) => format!("{local} [{} UTC]", utc.format(TIME_FORMAT)),
        Err(_) => local.to_string(),
    }
}

/// `16 hours 38 minutes`, or a dash during polar day and night.
pub fn format_day_length(hours: Option<f64>) -> String {
    match hours {
        Some(hours) => {
            let total_minutes = (hours * 60.0).round() as i64;
            format!("{} hours {} minutes", total_minutes / 60, total_minutes % 60)
        }
        None => "-".to_string(),
    }
}

/// Pretty-printed JSON for a profile.
pub fn profile_json(profile: &DayLightProfile) -> Result<String> {
    serde_json::to_string_pretty(profile).context("Failed to serialize the day profile")
}
