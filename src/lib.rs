//! # Sunwise
//!
//! Solar position and daylight calculations for a geographic coordinate:
//! where the sun is, when it crosses the sunrise, golden hour, blue hour and
//! twilight thresholds, and how those instants read on the local wall clock.
//!
//! ## Architecture
//!
//! - **Position model**: `solar::position`, the sun's azimuth, elevation and
//!   distance for a coordinate and instant
//! - **Event search**: `solar::events`, the instant a given elevation is crossed
//!   (closed form for sunrise/sunset/noon, bisection otherwise)
//! - **Day profiles**: `solar::profile`, every lighting period of a day, sun
//!   paths and day/night classification
//! - **Timezones**: `timezone`, coordinate to zone resolution behind a
//!   pluggable provider, DST inference and local/UTC conversion
//! - **Infrastructure**: settings, logging and a human-readable report
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use sunwise::{GeoCoordinate, TimezoneResolver, calculate_sun_times};
//!
//! let london = GeoCoordinate::new(51.5074, -0.1278)?;
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//! let profile = calculate_sun_times(&london, date)?;
//! let local = profile.to_local(&TimezoneResolver::default())?;
//! println!("sunrise: {:?}", local.sunrise.map(|t| t.to_string()));
//! # Ok::<(), sunwise::SolarError>(())
//! ```

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod geo;
pub mod solar;
pub mod time;
pub mod timezone;

pub use config::Settings;
pub use error::{SolarError, SolarResult};
pub use geo::GeoCoordinate;
pub use solar::{
    DayLightProfile, DayNightStatus, Direction, EventWindow, LightStatus, LocalDayLightProfile,
    SolarPosition, SunPath, SunPathPoint, WindowPair, calculate_solar_noon, calculate_sun_times,
    calculate_sunrise, calculate_sunset, compute_sun_position, find_elevation_crossing,
    generate_default_sun_path, generate_sun_path, get_day_night_status, get_sun_position_at_time,
};
pub use time::instant_from_millis;
pub use timezone::{
    LocalInstant, TimezoneCache, TimezoneInfo, TimezoneProvider, TimezoneResolver,
    RegionTableProvider, to_local, to_utc,
};
