//! Error types.

pub mod datetime;
pub mod parse;
pub mod rule;
pub mod timezone;

pub use datetime::DateTimeError;
pub use parse::{ParseDataError, TzFileError, TzStringError};
pub use rule::RuleError;
pub use timezone::TimeZoneError;

use std::error;
use std::fmt;
use std::io;

/// Alias for [`std::result::Result`] with the crate unified error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for everything in the crate
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// I/O or system error, propagated unchanged from a transition source or a zone file
    Io(Box<dyn error::Error + Send + Sync + 'static>),
    /// Unified error type for every non I/O error in the crate
    Tz(TzError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(error) => error.fmt(f),
            Self::Tz(error) => error.fmt(f),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(Box::new(error))
    }
}

impl<T: Into<TzError>> From<T> for Error {
    fn from(error: T) -> Self {
        Self::Tz(error.into())
    }
}

/// Unified error type for every non I/O error in the crate
#[non_exhaustive]
#[derive(Debug)]
pub enum TzError {
    /// Unified error for parsing a TZif file
    TzFile(TzFileError),
    /// Unified error for parsing a TZ string
    TzString(TzStringError),
    /// Recurring yearly rule error
    Rule(RuleError),
    /// Time zone error
    TimeZone(TimeZoneError),
    /// Date time error
    DateTime(DateTimeError),
    /// A null value was read
    NoValue,
    /// Time zone name is absent from the name mapping and from the zone database
    ZoneNotFound(String),
}

impl fmt::Display for TzError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TzFile(error) => write!(f, "invalid TZ file: {error}"),
            Self::TzString(error) => write!(f, "invalid TZ string: {error}"),
            Self::Rule(error) => write!(f, "invalid recurring yearly rule: {error}"),
            Self::TimeZone(error) => write!(f, "invalid time zone: {error}"),
            Self::DateTime(error) => write!(f, "invalid date time: {error}"),
            Self::NoValue => f.write_str("value is null"),
            Self::ZoneNotFound(name) => write!(f, "time zone '{name}' is not found"),
        }
    }
}

impl error::Error for TzError {}

impl From<TzFileError> for TzError {
    fn from(error: TzFileError) -> Self {
        Self::TzFile(error)
    }
}

impl From<TzStringError> for TzError {
    fn from(error: TzStringError) -> Self {
        Self::TzString(error)
    }
}

impl From<RuleError> for TzError {
    fn from(error: RuleError) -> Self {
        Self::Rule(error)
    }
}

impl From<TimeZoneError> for TzError {
    fn from(error: TimeZoneError) -> Self {
        Self::TimeZone(error)
    }
}

impl From<DateTimeError> for TzError {
    fn from(error: DateTimeError) -> Self {
        Self::DateTime(error)
    }
}
