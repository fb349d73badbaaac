//! Error kinds raised at the public entry points.
//!
//! A threshold that is never crossed (polar day or night) is not an error: it is
//! reported as `Ok(None)` by the event search and as a `None` side of an
//! [`EventWindow`](crate::solar::EventWindow).

use thiserror::Error;

pub type SolarResult<T> = Result<T, SolarError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolarError {
    /// Latitude/longitude out of range or not finite.
    #[error("invalid coordinate: {0}")]
    Coordinate(String),

    /// Non-finite timestamp, calendar year outside [1000, 3000] or an
    /// impossible wall-clock time.
    #[error("invalid instant: {0}")]
    InvalidInstant(String),

    /// Sun path sampling interval outside [1, 1440] minutes.
    #[error("sun path interval must be between 1 and 1440 minutes (got {0})")]
    IntervalRange(u32),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}
