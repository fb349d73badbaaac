//! Application-wide constants.
//!
//! Elevation thresholds are in degrees above the geometric horizon. Limits and
//! defaults for the settings file live here as well so validation and the
//! generated defaults never drift apart.

// # Elevation Thresholds

/// Sunrise/sunset: upper limb on the horizon with standard refraction.
pub const SUNRISE_ELEVATION: f64 = -0.833;
/// Upper boundary of golden hour.
pub const GOLDEN_HOUR_HIGH: f64 = 6.0;
/// Lower boundary of golden hour, upper boundary of blue hour, civil twilight.
pub const GOLDEN_HOUR_LOW: f64 = -6.0;
pub const CIVIL_TWILIGHT: f64 = -6.0;
/// Lower boundary of blue hour, nautical twilight.
pub const BLUE_HOUR_LOW: f64 = -12.0;
pub const NAUTICAL_TWILIGHT: f64 = -12.0;
pub const ASTRONOMICAL_TWILIGHT: f64 = -18.0;

// # Position Model

/// Julian day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JULIAN_DAY: f64 = 2_451_545.0;
/// Mean obliquity of the ecliptic, without nutation or precession.
pub const MEAN_OBLIQUITY: f64 = 23.439;

/// Calendar years accepted by the Julian day formula.
pub const MINIMUM_YEAR: i32 = 1000;
pub const MAXIMUM_YEAR: i32 = 3000;

// # Event Search

pub const BISECTION_MAX_ITERATIONS: u32 = 50;
/// Stop bisecting once the bracket is narrower than this.
pub const BISECTION_MIN_INTERVAL_MS: i64 = 60_000;
/// Early exit when the midpoint elevation is this close to the target.
pub const BISECTION_TOLERANCE_DEGREES: f64 = 0.01;
/// The final midpoint must be within this of the target, otherwise no crossing.
pub const BISECTION_ACCEPTANCE_DEGREES: f64 = 1.0;

pub const MINUTES_PER_DAY: u32 = 1440;
pub const MILLIS_PER_MINUTE: i64 = 60_000;

// # Sun Path

pub const DEFAULT_SUN_PATH_INTERVAL: u32 = 15;
pub const MINIMUM_SUN_PATH_INTERVAL: u32 = 1;
pub const MAXIMUM_SUN_PATH_INTERVAL: u32 = MINUTES_PER_DAY;

// # Timezone

/// Scale applied before rounding coordinates into cache buckets (two decimals, ~1.1 km).
pub const TIMEZONE_CACHE_PRECISION: f64 = 100.0;
