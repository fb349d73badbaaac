//! Coordinate-bucketed zone cache.
//!
//! Owned by the caller and handed to a [`TimezoneResolver`](super::TimezoneResolver)
//! (usually behind an `Arc`) so its lifetime and sharing are explicit. Keys are
//! coordinates rounded to two decimals. Entries never expire since the mapping
//! depends on the coordinate alone.
//!
//! Two threads missing on the same bucket may both compute and insert; the
//! lookup is pure so the second insert writes the same value.

use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::geo::GeoCoordinate;

#[derive(Debug, Default)]
pub struct TimezoneCache {
    entries: Mutex<HashMap<(i32, i32), Tz>>,
}

impl TimezoneCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry behind
    fn entries(&self) -> MutexGuard<'_, HashMap<(i32, i32), Tz>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, coordinate: &GeoCoordinate) -> Option<Tz> {
        self.entries().get(&coordinate.bucket_key()).copied()
    }

    pub fn insert(&self, coordinate: &GeoCoordinate, zone: Tz) {
        self.entries().insert(coordinate.bucket_key(), zone);
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}
