#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! This crate provides the `TimeZone` struct, a time zone rule engine describing a zone by its standard and daylight offsets and by two recurring yearly switch rules.
//!
//! A time zone answers daylight saving time queries and converts between UTC, local wall clock time and standard time.
//! It can also be backed by a [`TransitionSource`], from which its offsets and switch rules are inferred.
//!
//! Time zones can be constructed:
//! * from offsets and [`RecurringYearlyRule`] values,
//! * from a [POSIX `TZ` string](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html),
//! * from a [TZif file](https://datatracker.ietf.org/doc/html/rfc8536),
//! * by IANA identifier or Windows standard name, searching the system zone database.
//!
//! # Usage
//!
//! ```rust
//! # fn main() -> Result<(), tzrules::Error> {
//!     use tzrules::{OffsetType, RecurringYearlyRule, Time, TimeZone};
//!
//!     // US Eastern time: second Sunday of March and first Sunday of November, at 02:00
//!     let time_zone = TimeZone::with_rules_and_names(
//!         -18000,
//!         3600,
//!         RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 8, 2, 0, 0)?,
//!         RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 11, 1, 2, 0, 0)?,
//!         "Eastern Standard Time",
//!         "Eastern Daylight Time",
//!     )?;
//!
//!     let summer = Time::new(2024, 7, 1, 12, 0, 0)?;
//!     assert!(time_zone.is_dst(summer, true)?);
//!     assert_eq!(time_zone.utc_to_local(summer)?, Time::new(2024, 7, 1, 8, 0, 0)?);
//!
//!     // Next switch to standard time
//!     let switch = time_zone.next_switch_time(summer, true)?;
//!     assert_eq!(switch, Some(Time::new(2024, 11, 3, 6, 0, 0)?));
//!
//!     // Time zone from a TZ string
//!     let time_zone = TimeZone::from_posix_tz("NZST-12NZDT,M9.5.0,M4.1.0/3")?;
//!     assert_eq!(time_zone.standard_offset(), 43200);
//!     assert!(time_zone.supports_dst_after(summer)?);
//!
//!     // Mapping of Windows standard names
//!     assert_eq!(tzrules::standard_name_windows_to_iana("Eastern Standard Time"), Some("America/New_York"));
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;

pub mod constants;
mod datetime;
pub mod error;
mod mapping;
mod parse;
mod rule;
mod source;
mod system;
mod timezone;

pub use datetime::{days_in_month, is_leap_year, Time, TimeSpan};
pub use error::{Error, Result, TzError};
pub use mapping::{standard_name_iana_to_windows, standard_name_windows_to_iana, windows_and_iana_names};
pub use rule::{OffsetType, RecurringYearlyRule};
pub use source::{AlternateTime, FixedOffset, LocalTimeType, Transition, TransitionRule, TransitionSource, TransitionTable};
pub use timezone::TimeZone;
