//! Date time error types.

use std::error::Error;
use std::fmt;

/// Date time error
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DateTimeError {
    /// Year outside `[1970, 2099]`
    InvalidYear,
    /// Invalid month
    InvalidMonth,
    /// Invalid month day
    InvalidMonthDay,
    /// Invalid hour
    InvalidHour,
    /// Invalid minute
    InvalidMinute,
    /// Invalid second
    InvalidSecond,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidYear => f.write_str("year must be in [1970, 2099]"),
            Self::InvalidMonth => f.write_str("invalid month"),
            Self::InvalidMonthDay => f.write_str("invalid month day"),
            Self::InvalidHour => f.write_str("invalid hour"),
            Self::InvalidMinute => f.write_str("invalid minute"),
            Self::InvalidSecond => f.write_str("invalid second"),
        }
    }
}

impl Error for DateTimeError {}
