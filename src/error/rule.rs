//! Recurring yearly rule error types.

use std::error::Error;
use std::fmt;

/// Recurring yearly rule error
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RuleError {
    /// Offset type outside `[0, 15]`
    InvalidOffsetType,
    /// Invalid month
    InvalidMonth,
    /// Invalid day of month, or day of month not valid for the month in a non-leap year
    InvalidDayOfMonth,
    /// Invalid day of week
    InvalidDayOfWeek,
    /// Invalid hours
    InvalidHours,
    /// Invalid minutes
    InvalidMinutes,
    /// Invalid seconds
    InvalidSeconds,
    /// Weekday-relative offset type given to a fixed-date constructor
    ExpectedFixedDateOffsetType,
    /// Fixed-date offset type given to a weekday-relative constructor
    ExpectedWeekdayOffsetType,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidOffsetType => f.write_str("invalid offset type"),
            Self::InvalidMonth => f.write_str("invalid month"),
            Self::InvalidDayOfMonth => f.write_str("invalid day of month"),
            Self::InvalidDayOfWeek => f.write_str("invalid day of week"),
            Self::InvalidHours => f.write_str("invalid hours"),
            Self::InvalidMinutes => f.write_str("invalid minutes"),
            Self::InvalidSeconds => f.write_str("invalid seconds"),
            Self::ExpectedFixedDateOffsetType => f.write_str("offset type must not depend on the day of week"),
            Self::ExpectedWeekdayOffsetType => f.write_str("offset type must depend on the day of week"),
        }
    }
}

impl Error for RuleError {}
