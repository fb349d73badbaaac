//! Solar position and lighting-period calculations.
//!
//! ## Module Structure
//!
//! - [`math`]: the degrees/radians pair and angle wrapping
//! - [`position`]: the low-precision position model (azimuth, elevation, distance)
//! - [`events`]: threshold crossings (closed form for sunrise/sunset/noon,
//!   bisection for everything else)
//! - [`profile`]: day profiles, sun paths and day/night classification
//!
//! Every function here is pure, synchronous and bounded, and safe to call from
//! any number of threads at once.

pub mod events;
pub mod math;
pub mod position;
pub mod profile;

pub use events::{
    Direction, calculate_solar_noon, calculate_sunrise, calculate_sunset,
    find_elevation_crossing,
};
pub use position::{
    SolarCoordinates, SolarPosition, compute_sun_position, equation_of_time, julian_day,
    solar_coordinates, solar_declination,
};
pub use profile::{
    DayLightProfile, DayNightStatus, EventWindow, LightStatus, LocalDayLightProfile, SunPath,
    SunPathPoint, WindowPair, calculate_sun_times, generate_default_sun_path, generate_sun_path,
    get_day_night_status, get_sun_position_at_time,
};

#[cfg(test)]
mod tests;
