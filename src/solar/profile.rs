//! Day profiles, sun paths and point-in-time classification.
//!
//! Everything here composes the position model and the event search. All
//! returned values are immutable snapshots that can be regenerated from the
//! same arguments at any time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::events::{
    Direction, calculate_solar_noon, calculate_sunrise, calculate_sunset,
    find_elevation_crossing,
};
use super::position::{SolarPosition, compute_sun_position, sun_position_unchecked};
use crate::constants::{
    ASTRONOMICAL_TWILIGHT, BLUE_HOUR_LOW, CIVIL_TWILIGHT, DEFAULT_SUN_PATH_INTERVAL,
    GOLDEN_HOUR_HIGH, GOLDEN_HOUR_LOW, MAXIMUM_SUN_PATH_INTERVAL, MINIMUM_SUN_PATH_INTERVAL,
    MINUTES_PER_DAY, NAUTICAL_TWILIGHT, SUNRISE_ELEVATION,
};
use crate::error::{SolarError, SolarResult};
use crate::geo::GeoCoordinate;
use crate::time::{utc_midnight, validate_date, validate_instant};
use crate::timezone::{LocalInstant, TimezoneInfo, TimezoneProvider, TimezoneResolver};

/// A lighting period bounded by two threshold crossings.
///
/// A `None` side means the threshold is not crossed that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventWindow<T = DateTime<Utc>> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> EventWindow<T> {
    pub fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    /// Both boundaries are defined.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> EventWindow<U> {
        EventWindow {
            start: self.start.map(&mut f),
            end: self.end.map(&mut f),
        }
    }
}

impl EventWindow {
    /// Length of the window, when both boundaries exist.
    pub fn duration(&self) -> Option<Duration> {
        Some(self.end? - self.start?)
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= *instant && *instant < end,
            _ => false,
        }
    }
}

/// The morning and evening occurrences of a lighting period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowPair<T = DateTime<Utc>> {
    pub morning: EventWindow<T>,
    pub evening: EventWindow<T>,
}

impl<T> WindowPair<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> WindowPair<U> {
        WindowPair {
            morning: self.morning.map(&mut f),
            evening: self.evening.map(&mut f),
        }
    }
}

/// All lighting periods for one coordinate and UTC calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLightProfile {
    pub date: NaiveDate,
    pub coordinate: GeoCoordinate,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub solar_noon: DateTime<Utc>,
    /// Elevation at solar noon, used to tell polar day from polar night.
    pub noon_elevation: f64,
    /// Hours between sunrise and sunset.
    pub day_length: Option<f64>,
    pub golden_hour: WindowPair,
    pub blue_hour: WindowPair,
    pub civil_twilight: WindowPair,
    pub nautical_twilight: WindowPair,
    pub astronomical_twilight: WindowPair,
}

impl DayLightProfile {
    /// The sun stays above the horizon all day.
    pub fn is_polar_day(&self) -> bool {
        self.sunrise.is_none() && self.noon_elevation > SUNRISE_ELEVATION
    }

    /// The sun stays below the horizon all day.
    pub fn is_polar_night(&self) -> bool {
        self.sunrise.is_none() && self.noon_elevation <= SUNRISE_ELEVATION
    }

    /// Render every instant in the coordinate's local zone.
    pub fn to_local<P: TimezoneProvider>(
        &self,
        resolver: &TimezoneResolver<P>,
    ) -> SolarResult<LocalDayLightProfile> {
        let zone = resolver.resolve(&self.coordinate)?;
        let timezone = resolver.get_info(&self.coordinate, &self.solar_noon)?;
        let local = |instant: DateTime<Utc>| LocalInstant::from_utc(&instant, zone);

        Ok(LocalDayLightProfile {
            date: self.date,
            timezone,
            sunrise: self.sunrise.map(local),
            sunset: self.sunset.map(local),
            solar_noon: local(self.solar_noon),
            day_length: self.day_length,
            golden_hour: self.golden_hour.clone().map(local),
            blue_hour: self.blue_hour.clone().map(local),
            civil_twilight: self.civil_twilight.clone().map(local),
            nautical_twilight: self.nautical_twilight.clone().map(local),
            astronomical_twilight: self.astronomical_twilight.clone().map(local),
        })
    }
}

/// A [`DayLightProfile`] expressed in local wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalDayLightProfile {
    pub date: NaiveDate,
    /// Zone details as of solar noon.
    pub timezone: TimezoneInfo,
    pub sunrise: Option<LocalInstant>,
    pub sunset: Option<LocalInstant>,
    pub solar_noon: LocalInstant,
    pub day_length: Option<f64>,
    pub golden_hour: WindowPair<LocalInstant>,
    pub blue_hour: WindowPair<LocalInstant>,
    pub civil_twilight: WindowPair<LocalInstant>,
    pub nautical_twilight: WindowPair<LocalInstant>,
    pub astronomical_twilight: WindowPair<LocalInstant>,
}

/// Compute every lighting period for `date` at `coordinate`.
///
/// Sunrise, sunset and noon come from the closed form; the other bands from
/// bisection. Windows nest by construction: astronomical dawn, nautical dawn,
/// civil dawn, sunrise in the morning and the reverse in the evening.
pub fn calculate_sun_times(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
) -> SolarResult<DayLightProfile> {
    coordinate.validate()?;
    validate_date(date)?;

    let sunrise = calculate_sunrise(coordinate, date)?;
    let sunset = calculate_sunset(coordinate, date)?;
    let solar_noon = calculate_solar_noon(coordinate, date)?;
    let noon_elevation = sun_position_unchecked(coordinate, &solar_noon).elevation;

    let day_length = match (sunrise, sunset) {
        (Some(rise), Some(set)) => Some((set - rise).num_milliseconds() as f64 / 3_600_000.0),
        _ => None,
    };

    let rising =
        |elevation| find_elevation_crossing(coordinate, date, elevation, Direction::Rising);
    let falling =
        |elevation| find_elevation_crossing(coordinate, date, elevation, Direction::Falling);

    let civil_dawn = rising(CIVIL_TWILIGHT)?;
    let civil_dusk = falling(CIVIL_TWILIGHT)?;
    let nautical_dawn = rising(NAUTICAL_TWILIGHT)?;
    let nautical_dusk = falling(NAUTICAL_TWILIGHT)?;
    let astronomical_dawn = rising(ASTRONOMICAL_TWILIGHT)?;
    let astronomical_dusk = falling(ASTRONOMICAL_TWILIGHT)?;

    let golden_hour = WindowPair {
        morning: EventWindow::new(rising(GOLDEN_HOUR_LOW)?, rising(GOLDEN_HOUR_HIGH)?),
        evening: EventWindow::new(falling(GOLDEN_HOUR_HIGH)?, falling(GOLDEN_HOUR_LOW)?),
    };
    let blue_hour = WindowPair {
        morning: EventWindow::new(rising(BLUE_HOUR_LOW)?, rising(GOLDEN_HOUR_LOW)?),
        evening: EventWindow::new(falling(GOLDEN_HOUR_LOW)?, falling(BLUE_HOUR_LOW)?),
    };

    Ok(DayLightProfile {
        date,
        coordinate: *coordinate,
        sunrise,
        sunset,
        solar_noon,
        noon_elevation,
        day_length,
        golden_hour,
        blue_hour,
        civil_twilight: WindowPair {
            morning: EventWindow::new(civil_dawn, sunrise),
            evening: EventWindow::new(sunset, civil_dusk),
        },
        nautical_twilight: WindowPair {
            morning: EventWindow::new(nautical_dawn, civil_dawn),
            evening: EventWindow::new(civil_dusk, nautical_dusk),
        },
        astronomical_twilight: WindowPair {
            morning: EventWindow::new(astronomical_dawn, nautical_dawn),
            evening: EventWindow::new(nautical_dusk, astronomical_dusk),
        },
    })
}

/// One sample of the sun's track across the sky.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunPathPoint {
    pub time: DateTime<Utc>,
    pub position: SolarPosition,
}

/// Evenly spaced sun positions over one UTC calendar day.
///
/// Finite and lazily evaluated; clone it (or call [`SunPath::restart`]) to walk
/// the same sequence again.
#[derive(Debug, Clone)]
pub struct SunPath {
    coordinate: GeoCoordinate,
    start: DateTime<Utc>,
    interval_minutes: u32,
    next: u32,
    len: u32,
}

impl SunPath {
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Rewind to the first sample.
    pub fn restart(&mut self) {
        self.next = 0;
    }

    fn point(&self, index: u32) -> SunPathPoint {
        let time =
            self.start + Duration::minutes(i64::from(index) * i64::from(self.interval_minutes));
        SunPathPoint {
            time,
            position: sun_position_unchecked(&self.coordinate, &time),
        }
    }
}

impl Iterator for SunPath {
    type Item = SunPathPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let point = self.point(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SunPath {}

/// Sample the sun every `interval_minutes` from 00:00 UTC of `date`.
///
/// Samples are taken while the offset is below 24 hours, which is exactly
/// `1440 / interval_minutes` points when the interval divides a day.
pub fn generate_sun_path(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    interval_minutes: u32,
) -> SolarResult<SunPath> {
    coordinate.validate()?;
    validate_date(date)?;
    if !(MINIMUM_SUN_PATH_INTERVAL..=MAXIMUM_SUN_PATH_INTERVAL).contains(&interval_minutes) {
        return Err(SolarError::IntervalRange(interval_minutes));
    }

    Ok(SunPath {
        coordinate: *coordinate,
        start: utc_midnight(date),
        interval_minutes,
        next: 0,
        len: MINUTES_PER_DAY.div_ceil(interval_minutes),
    })
}

/// [`generate_sun_path`] with the default 15 minute spacing.
pub fn generate_default_sun_path(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
) -> SolarResult<SunPath> {
    generate_sun_path(coordinate, date, DEFAULT_SUN_PATH_INTERVAL)
}

/// Sun position at `hour:minute` UTC on `date`.
pub fn get_sun_position_at_time(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> SolarResult<SunPathPoint> {
    let time = date.and_hms_opt(hour, minute, 0).ok_or_else(|| {
        SolarError::InvalidInstant(format!("{hour:02}:{minute:02} is not a valid time of day"))
    })?;
    let time = time.and_utc();
    let position = compute_sun_position(coordinate, &time)?;
    Ok(SunPathPoint { time, position })
}

/// Lighting condition at an instant, from the sun's elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightStatus {
    Day,
    CivilTwilight,
    NauticalTwilight,
    AstronomicalTwilight,
    Night,
}

impl LightStatus {
    pub fn from_elevation(elevation: f64) -> Self {
        if elevation > 0.0 {
            LightStatus::Day
        } else if elevation > CIVIL_TWILIGHT {
            LightStatus::CivilTwilight
        } else if elevation > NAUTICAL_TWILIGHT {
            LightStatus::NauticalTwilight
        } else if elevation > ASTRONOMICAL_TWILIGHT {
            LightStatus::AstronomicalTwilight
        } else {
            LightStatus::Night
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LightStatus::Day => "day",
            LightStatus::CivilTwilight => "civil_twilight",
            LightStatus::NauticalTwilight => "nautical_twilight",
            LightStatus::AstronomicalTwilight => "astronomical_twilight",
            LightStatus::Night => "night",
        }
    }
}

impl std::fmt::Display for LightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayNightStatus {
    pub status: LightStatus,
    pub position: SolarPosition,
    /// The sun is above the horizon.
    pub is_visible: bool,
}

/// Classify `instant` as day, one of the twilight tiers, or night.
pub fn get_day_night_status(
    coordinate: &GeoCoordinate,
    instant: &DateTime<Utc>,
) -> SolarResult<DayNightStatus> {
    validate_instant(instant)?;
    let position = compute_sun_position(coordinate, instant)?;
    Ok(DayNightStatus {
        status: LightStatus::from_elevation(position.elevation),
        position,
        is_visible: position.elevation > 0.0,
    })
}
