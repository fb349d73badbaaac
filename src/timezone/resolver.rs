//! Zone resolution, DST inference and local/UTC conversion.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::cache::TimezoneCache;
use super::provider::{RegionTableProvider, TimezoneProvider};
use crate::error::{SolarError, SolarResult};
use crate::geo::GeoCoordinate;
use crate::time::validate_instant;

/// Zone details for a coordinate at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimezoneInfo {
    /// IANA identifier, e.g. `Europe/London`.
    pub zone_id: String,
    /// Best-effort, see [`is_dst`].
    pub is_dst: bool,
    /// Minutes east of UTC at the instant (New York in summer is -240).
    pub offset_minutes: i32,
    /// Abbreviation and offset, e.g. `BST (UTC+01:00)`.
    pub display_name: String,
}

/// Wall-clock time in a named zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalInstant {
    pub zone_id: String,
    pub wall_clock: NaiveDateTime,
    /// Minutes east of UTC in effect at this wall-clock time.
    pub offset_minutes: i32,
}

impl LocalInstant {
    pub fn from_utc(instant: &DateTime<Utc>, zone: Tz) -> Self {
        let local = instant.with_timezone(&zone);
        Self {
            zone_id: zone.name().to_string(),
            wall_clock: local.naive_local(),
            offset_minutes: local.offset().fix().local_minus_utc() / 60,
        }
    }

    /// The UTC instant this reading came from, using the stored offset.
    ///
    /// Exact inside a fall-back hour, where the wall clock alone is ambiguous
    /// and the free [`to_utc`] picks the earlier reading.
    pub fn to_utc(&self) -> SolarResult<DateTime<Utc>> {
        let instant = self
            .wall_clock
            .checked_sub_signed(Duration::minutes(self.offset_minutes.into()))
            .ok_or_else(|| {
                SolarError::InvalidInstant(format!("{self} is out of the representable range"))
            })?
            .and_utc();
        validate_instant(&instant)?;
        Ok(instant)
    }
}

impl std::fmt::Display for LocalInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.wall_clock.format("%Y-%m-%d %H:%M:%S"),
            format_offset(self.offset_minutes)
        )
    }
}

/// Resolves coordinates to zones through a [`TimezoneProvider`], memoising
/// results in a shared [`TimezoneCache`].
///
/// Coordinates the provider cannot place resolve to the configured fallback
/// zone, or to the system's local zone when none is configured.
pub struct TimezoneResolver<P = RegionTableProvider> {
    provider: P,
    cache: Arc<TimezoneCache>,
    fallback: Option<Tz>,
}

impl Default for TimezoneResolver<RegionTableProvider> {
    fn default() -> Self {
        Self::new(RegionTableProvider, Arc::new(TimezoneCache::new()))
    }
}

impl<P: TimezoneProvider> TimezoneResolver<P> {
    pub fn new(provider: P, cache: Arc<TimezoneCache>) -> Self {
        Self {
            provider,
            cache,
            fallback: None,
        }
    }

    /// Use `zone` instead of the system zone for unplaced coordinates.
    pub fn with_fallback(mut self, zone: Tz) -> Self {
        self.fallback = Some(zone);
        self
    }

    pub fn cache(&self) -> &Arc<TimezoneCache> {
        &self.cache
    }

    /// Zone for `coordinate`.
    pub fn resolve(&self, coordinate: &GeoCoordinate) -> SolarResult<Tz> {
        coordinate.validate()?;

        if let Some(zone) = self.cache.get(coordinate) {
            return Ok(zone);
        }

        let zone = match self.provider.lookup(coordinate) {
            Some(zone) => zone,
            None => {
                let zone = self.fallback.unwrap_or_else(system_timezone);
                log_debug!("No timezone region for {coordinate}, falling back to {zone}");
                zone
            }
        };

        self.cache.insert(coordinate, zone);
        Ok(zone)
    }

    /// IANA identifier for `coordinate`.
    pub fn zone_id(&self, coordinate: &GeoCoordinate) -> SolarResult<String> {
        Ok(self.resolve(coordinate)?.name().to_string())
    }

    /// Offset and DST state for `coordinate` at `instant`.
    pub fn get_info(
        &self,
        coordinate: &GeoCoordinate,
        instant: &DateTime<Utc>,
    ) -> SolarResult<TimezoneInfo> {
        validate_instant(instant)?;
        let zone = self.resolve(coordinate)?;
        Ok(zone_info(zone, instant))
    }
}

/// [`TimezoneInfo`] for a known zone.
pub fn zone_info(zone: Tz, instant: &DateTime<Utc>) -> TimezoneInfo {
    let local = instant.with_timezone(&zone);
    let offset_minutes = offset_minutes_at(zone, instant);

    TimezoneInfo {
        zone_id: zone.name().to_string(),
        is_dst: is_dst(zone, instant),
        offset_minutes,
        display_name: format!("{} ({})", local.format("%Z"), format_offset(offset_minutes)),
    }
}

fn offset_minutes_at(zone: Tz, instant: &DateTime<Utc>) -> i32 {
    zone.offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
        / 60
}

/// Best-effort DST test from two reference dates.
///
/// Offsets are compared in minutes *west* of UTC, so standard time is the larger
/// of the January 1 and July 1 values. DST is reported when the offset at
/// `instant` is smaller than that. Zones without a seasonal change never report
/// DST. A zone that changed its standard offset during the year, or that keeps
/// more than two offsets, can be misreported.
pub fn is_dst(zone: Tz, instant: &DateTime<Utc>) -> bool {
    let year = instant.year();
    let reference = |month| {
        Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .map(|dt| -offset_minutes_at(zone, &dt))
    };

    let (Some(january), Some(july)) = (reference(1), reference(7)) else {
        return false;
    };
    let standard = january.max(july);
    -offset_minutes_at(zone, instant) < standard
}

/// Parse an IANA identifier.
pub fn parse_zone(zone_id: &str) -> SolarResult<Tz> {
    zone_id
        .parse::<Tz>()
        .map_err(|_| SolarError::UnknownTimezone(zone_id.to_string()))
}

/// Wall-clock time in `zone_id` for a UTC instant.
pub fn to_local(instant: &DateTime<Utc>, zone_id: &str) -> SolarResult<LocalInstant> {
    validate_instant(instant)?;
    let zone = parse_zone(zone_id)?;
    Ok(LocalInstant::from_utc(instant, zone))
}

/// UTC instant for a wall-clock time in `zone_id`.
///
/// Ambiguous times (autumn fall-back) resolve to the earlier instant; times
/// skipped by a spring-forward gap are rejected.
pub fn to_utc(wall_clock: NaiveDateTime, zone_id: &str) -> SolarResult<DateTime<Utc>> {
    let zone = parse_zone(zone_id)?;
    let local = zone.from_local_datetime(&wall_clock).earliest().ok_or_else(|| {
        SolarError::InvalidInstant(format!("{wall_clock} does not exist in {zone_id}"))
    })?;
    let instant = local.with_timezone(&Utc);
    validate_instant(&instant)?;
    Ok(instant)
}

/// `UTC+05:30` style label.
pub fn format_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let minutes = offset_minutes.abs();
    format!("UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The executing system's zone: `TZ`, then the `/etc/localtime` link, else UTC.
pub fn system_timezone() -> Tz {
    if let Ok(value) = std::env::var("TZ")
        && let Ok(zone) = value.trim_start_matches(':').parse::<Tz>()
    {
        return zone;
    }

    zone_from_localtime_link(Path::new("/etc/localtime")).unwrap_or(Tz::UTC)
}

pub(crate) fn zone_from_localtime_link(path: &Path) -> Option<Tz> {
    let target = std::fs::read_link(path).ok()?;
    let target = target.to_str()?;
    let (_, name) = target.split_once("zoneinfo/")?;
    name.parse().ok()
}
