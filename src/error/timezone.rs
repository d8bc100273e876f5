//! Time zone error types.

use std::error::Error;
use std::fmt;

/// Time zone error
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimeZoneError {
    /// Standard offset outside `[-13h, 13h]` or not a multiple of 5 minutes
    InvalidStandardOffset,
    /// Daylight offset outside `[-3h, 3h]` or not a multiple of 5 minutes
    InvalidDaylightOffset,
    /// Exactly one of the two switch rules is null
    IncompleteSwitchRules,
    /// No local time type
    NoLocalTimeType,
    /// Invalid local time type index
    InvalidLocalTimeTypeIndex,
    /// Transitions are not sorted, or out of range once shifted to local time
    InvalidTransition,
}

impl fmt::Display for TimeZoneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidStandardOffset => f.write_str("standard offset must be a multiple of 5 minutes in [-13h, 13h]"),
            Self::InvalidDaylightOffset => f.write_str("daylight offset must be a multiple of 5 minutes in [-3h, 3h]"),
            Self::IncompleteSwitchRules => f.write_str("switch rules must be both set or both null"),
            Self::NoLocalTimeType => f.write_str("list of local time types must not be empty"),
            Self::InvalidLocalTimeTypeIndex => f.write_str("invalid local time type index"),
            Self::InvalidTransition => f.write_str("transitions must be sorted and representable in local time"),
        }
    }
}

impl Error for TimeZoneError {}
