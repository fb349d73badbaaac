//! Settings validation.

use anyhow::Result;

use super::Settings;
use crate::constants::{MAXIMUM_SUN_PATH_INTERVAL, MINIMUM_SUN_PATH_INTERVAL};
use crate::timezone::parse_zone;

/// Reject settings that would fail later at a call site.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if let Some(lat) = settings.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = settings.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if settings.latitude.is_some() != settings.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be set together");
    }

    if let Some(interval) = settings.sun_path_interval
        && !(MINIMUM_SUN_PATH_INTERVAL..=MAXIMUM_SUN_PATH_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "sun_path_interval ({} minutes) must be between {} and {} minutes",
            interval,
            MINIMUM_SUN_PATH_INTERVAL,
            MAXIMUM_SUN_PATH_INTERVAL
        );
    }

    if let Some(zone_id) = &settings.fallback_timezone
        && parse_zone(zone_id).is_err()
    {
        anyhow::bail!("fallback_timezone '{}' is not a known IANA timezone", zone_id);
    }

    Ok(())
}
