//! Parsing error types.

use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::str::Utf8Error;

/// Parse data error
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParseDataError {
    /// Unexpected end of data
    UnexpectedEof,
    /// Invalid data
    InvalidData,
}

impl fmt::Display for ParseDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of data"),
            Self::InvalidData => f.write_str("invalid data"),
        }
    }
}

impl Error for ParseDataError {}

/// Unified error type for parsing a TZ string
#[non_exhaustive]
#[derive(Debug)]
pub enum TzStringError {
    /// UTF-8 error
    Utf8(Utf8Error),
    /// Integer parsing error
    ParseInt(ParseIntError),
    /// Parse data error
    ParseData(ParseDataError),
    /// Time zone designation shorter than 3 characters
    InvalidDesignation,
    /// Invalid offset hour
    InvalidOffsetHour,
    /// Invalid offset minute
    InvalidOffsetMinute,
    /// Invalid offset second
    InvalidOffsetSecond,
    /// Invalid day time hour
    InvalidDayTimeHour,
    /// Invalid day time minute
    InvalidDayTimeMinute,
    /// Invalid day time second
    InvalidDayTimeSecond,
    /// Rule day fields out of range
    InvalidRuleDay,
    /// Rule day with no recurring yearly rule equivalent (zero-based Julian day)
    UnsupportedRuleDay,
    /// Rule time outside `[00:00:00, 23:59:59]`
    UnsupportedRuleTime,
    /// Missing DST start and end rules
    MissingDstStartEndRules,
    /// Remaining data was found after parsing TZ string
    RemainingData,
    /// Empty TZ string
    Empty,
}

impl fmt::Display for TzStringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Utf8(error) => error.fmt(f),
            Self::ParseInt(error) => error.fmt(f),
            Self::ParseData(error) => error.fmt(f),
            Self::InvalidDesignation => f.write_str("time zone designation must have at least 3 characters"),
            Self::InvalidOffsetHour => f.write_str("invalid offset hour"),
            Self::InvalidOffsetMinute => f.write_str("invalid offset minute"),
            Self::InvalidOffsetSecond => f.write_str("invalid offset second"),
            Self::InvalidDayTimeHour => f.write_str("invalid day time hour"),
            Self::InvalidDayTimeMinute => f.write_str("invalid day time minute"),
            Self::InvalidDayTimeSecond => f.write_str("invalid day time second"),
            Self::InvalidRuleDay => f.write_str("invalid rule day"),
            Self::UnsupportedRuleDay => f.write_str("zero-based julian rule days are not supported"),
            Self::UnsupportedRuleTime => f.write_str("rule times outside of a day are not supported"),
            Self::MissingDstStartEndRules => f.write_str("missing DST start and end rules"),
            Self::RemainingData => f.write_str("remaining data after parsing TZ string"),
            Self::Empty => f.write_str("empty TZ string"),
        }
    }
}

impl Error for TzStringError {}

impl From<Utf8Error> for TzStringError {
    fn from(error: Utf8Error) -> Self {
        Self::Utf8(error)
    }
}

impl From<ParseIntError> for TzStringError {
    fn from(error: ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}

impl From<ParseDataError> for TzStringError {
    fn from(error: ParseDataError) -> Self {
        Self::ParseData(error)
    }
}

/// Unified error type for parsing a TZif file
#[non_exhaustive]
#[derive(Debug)]
pub enum TzFileError {
    /// UTF-8 error
    Utf8(Utf8Error),
    /// Parse data error
    ParseData(ParseDataError),
    /// Invalid magic number
    InvalidMagicNumber,
    /// Unsupported TZif version
    UnsupportedTzFileVersion,
    /// Invalid header
    InvalidHeader,
    /// Invalid footer
    InvalidFooter,
    /// Invalid DST indicator
    InvalidDstIndicator,
    /// Invalid time zone designation char index
    InvalidTimeZoneDesignationCharIndex,
    /// Invalid couple of standard/wall and UT/local indicators
    InvalidStdWallUtLocal,
    /// Remaining data after the end of a TZif v1 data block
    RemainingDataV1,
}

impl fmt::Display for TzFileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Utf8(error) => error.fmt(f),
            Self::ParseData(error) => error.fmt(f),
            Self::InvalidMagicNumber => f.write_str("invalid magic number"),
            Self::UnsupportedTzFileVersion => f.write_str("unsupported TZ file version"),
            Self::InvalidHeader => f.write_str("invalid header"),
            Self::InvalidFooter => f.write_str("invalid footer"),
            Self::InvalidDstIndicator => f.write_str("invalid DST indicator"),
            Self::InvalidTimeZoneDesignationCharIndex => f.write_str("invalid time zone designation char index"),
            Self::InvalidStdWallUtLocal => f.write_str("invalid couple of standard/wall and UT/local indicators"),
            Self::RemainingDataV1 => f.write_str("remaining data after the end of a TZif v1 data block"),
        }
    }
}

impl Error for TzFileError {}

impl From<Utf8Error> for TzFileError {
    fn from(error: Utf8Error) -> Self {
        Self::Utf8(error)
    }
}

impl From<ParseDataError> for TzFileError {
    fn from(error: ParseDataError) -> Self {
        Self::ParseData(error)
    }
}
