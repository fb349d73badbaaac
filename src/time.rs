//! Instant validation and day arithmetic.
//!
//! Instants are `chrono::DateTime<Utc>`. The Julian day formula used by the
//! position model is only trusted for calendar years 1000 through 3000, so
//! every entry point runs [`validate_instant`] (or [`validate_date`]) first.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};

use crate::constants::{MAXIMUM_YEAR, MILLIS_PER_MINUTE, MINIMUM_YEAR};
use crate::error::{SolarError, SolarResult};

/// Reject instants outside the supported calendar range.
pub fn validate_instant(instant: &DateTime<Utc>) -> SolarResult<()> {
    validate_year(instant.year())
}

/// Reject dates outside the supported calendar range.
pub fn validate_date(date: NaiveDate) -> SolarResult<()> {
    validate_year(date.year())
}

fn validate_year(year: i32) -> SolarResult<()> {
    if !(MINIMUM_YEAR..=MAXIMUM_YEAR).contains(&year) {
        return Err(SolarError::InvalidInstant(format!(
            "year {year} is outside the supported range {MINIMUM_YEAR}-{MAXIMUM_YEAR}"
        )));
    }
    Ok(())
}

/// Build an instant from epoch milliseconds as handed over by a UI layer.
///
/// Fractional milliseconds are truncated.
pub fn instant_from_millis(millis: f64) -> SolarResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(SolarError::InvalidInstant(format!(
            "timestamp must be finite (got {millis})"
        )));
    }
    // Beyond i64 the cast saturates; chrono rejects it below anyway
    let instant = DateTime::from_timestamp_millis(millis.trunc() as i64).ok_or_else(|| {
        SolarError::InvalidInstant(format!("timestamp {millis} ms is not representable"))
    })?;
    validate_instant(&instant)?;
    Ok(instant)
}

/// 00:00:00 UTC on `date`.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `date` at 00:00 UTC plus a (possibly negative or > 1440) minute offset.
///
/// Sub-millisecond precision is dropped so results stay reproducible.
pub fn at_minutes_after_midnight(date: NaiveDate, minutes: f64) -> DateTime<Utc> {
    let millis = (minutes * MILLIS_PER_MINUTE as f64).round() as i64;
    utc_midnight(date) + Duration::milliseconds(millis)
}

/// Minutes since 00:00 UTC, including the fractional seconds.
pub fn utc_minutes_of_day(instant: &DateTime<Utc>) -> f64 {
    instant.hour() as f64 * 60.0
        + instant.minute() as f64
        + instant.second() as f64 / 60.0
        + instant.timestamp_subsec_millis() as f64 / 60_000.0
}
