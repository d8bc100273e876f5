//! Transition sources: opaque providers of the offset in force at an instant.

mod table;

pub use table::{AlternateTime, LocalTimeType, Transition, TransitionRule, TransitionTable};

use crate::datetime::Time;
use crate::error::Result;

use std::fmt;

/// Provider of concrete per-instant offset and DST data for one zone.
///
/// Both queries are pure functions of the instant for a fixed zone identity.
/// Implementations backed by a blocking system mechanism may be slow, and report their failures as [`crate::Error::Io`].
///
pub trait TransitionSource: fmt::Debug + Send + Sync {
    /// Returns the identity of the zone, used for equality of time zones
    fn zone_id(&self) -> &str;

    /// Returns the UTC offset in seconds of the local time type in force at the instant.
    ///
    /// The instant is read as UTC if `is_utc` is set, otherwise as local wall clock time.
    ///
    fn offset_seconds(&self, instant: Time, is_utc: bool) -> Result<i32>;

    /// Returns `true` if the local time type in force at the instant is a DST one.
    ///
    /// The instant is read as UTC if `is_utc` is set, otherwise as local wall clock time.
    ///
    fn is_dst(&self, instant: Time, is_utc: bool) -> Result<bool>;
}

/// Constant offset, never in DST
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FixedOffset {
    zone_id: String,
    ut_offset: i32,
}

impl FixedOffset {
    /// Construct a fixed offset source
    pub fn new(zone_id: impl Into<String>, ut_offset: i32) -> Self {
        Self { zone_id: zone_id.into(), ut_offset }
    }

    /// Returns the UTC offset in seconds
    pub fn ut_offset(&self) -> i32 {
        self.ut_offset
    }
}

impl TransitionSource for FixedOffset {
    fn zone_id(&self) -> &str {
        &self.zone_id
    }

    fn offset_seconds(&self, _: Time, _: bool) -> Result<i32> {
        Ok(self.ut_offset)
    }

    fn is_dst(&self, _: Time, _: bool) -> Result<bool> {
        Ok(false)
    }
}
