//! Settings for embedding applications.
//!
//! The crate itself needs no configuration: every computation takes its inputs
//! as arguments. Settings hold the defaults an application usually wants to
//! keep between runs, loaded from `sunwise.toml`:
//!
//! ```toml
//! latitude = 51.5074            # Default location (-90 to 90)
//! longitude = -0.1278           # Default location (-180 to 180)
//! sun_path_interval = 15        # Sun path spacing in minutes (1-1440)
//! fallback_timezone = "UTC"     # Zone for coordinates outside every region
//! logging = true                # Box-drawing log output on stderr
//! debug = false                 # Also emit log_debug! lines
//! ```
//!
//! All keys are optional. A missing file is the same as an empty one.

pub mod loading;
pub mod validation;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SUN_PATH_INTERVAL;
use crate::geo::GeoCoordinate;
use crate::logger::Log;
use crate::timezone::{TimezoneResolver, parse_zone};

pub use loading::{get_config_path, load, load_from_path, write_default_settings};
pub use validation::validate_settings;

/// Values read from `sunwise.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default latitude in degrees; only meaningful together with `longitude`.
    pub latitude: Option<f64>,
    /// Default longitude in degrees; only meaningful together with `latitude`.
    pub longitude: Option<f64>,
    /// Minutes between sun path samples.
    pub sun_path_interval: Option<u32>,
    /// IANA zone used when the region table has no match.
    pub fallback_timezone: Option<String>,
    pub logging: Option<bool>,
    /// Turns on `log_debug!` output, such as timezone fallbacks.
    pub debug: Option<bool>,
}

impl Settings {
    /// The configured default location, if both halves are set.
    pub fn coordinate(&self) -> Result<Option<GeoCoordinate>> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Some(GeoCoordinate::new(latitude, longitude)?)),
            (None, None) => Ok(None),
            _ => bail!("latitude and longitude must be set together"),
        }
    }

    pub fn sun_path_interval(&self) -> u32 {
        self.sun_path_interval.unwrap_or(DEFAULT_SUN_PATH_INTERVAL)
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging.unwrap_or(true)
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    /// A resolver with a fresh cache that honors `fallback_timezone`.
    pub fn resolver(&self) -> Result<TimezoneResolver> {
        let resolver = TimezoneResolver::default();
        match &self.fallback_timezone {
            Some(zone_id) => Ok(resolver.with_fallback(parse_zone(zone_id)?)),
            None => Ok(resolver),
        }
    }

    /// Switch the process-wide logger to match `logging` and `debug`.
    pub fn apply_logging(&self) {
        Log::set_enabled(self.logging_enabled());
        Log::set_debug(self.debug_enabled());
    }
}
