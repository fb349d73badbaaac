//! Timezone resolution for presenting results in local time.
//!
//! This module is independent of the solar calculations. It answers three
//! questions for the presentation layer:
//!
//! - Which zone is a coordinate in? ([`TimezoneResolver::resolve`])
//! - What is the offset and is DST in effect at an instant? ([`TimezoneResolver::get_info`])
//! - What does an instant look like on the local wall clock, and back? ([`to_local`], [`to_utc`])
//!
//! ## Module Structure
//!
//! - [`provider`]: the [`TimezoneProvider`] seam and the built-in region table
//! - [`cache`]: the caller-owned, coordinate-bucketed [`TimezoneCache`]
//! - [`resolver`]: resolution, DST inference and wall-clock conversion
//!
//! ## Limitations
//!
//! The region table is a coarse geographic classifier, not a timezone
//! boundary database. DST detection compares against January 1 and July 1 of
//! the same year and is best-effort.

pub mod cache;
pub mod provider;
pub mod resolver;

pub use cache::TimezoneCache;
pub use provider::{REGIONS, Region, RegionTableProvider, TimezoneProvider};
pub use resolver::{
    LocalInstant, TimezoneInfo, TimezoneResolver, format_offset, is_dst, parse_zone,
    system_timezone, to_local, to_utc, zone_info,
};
