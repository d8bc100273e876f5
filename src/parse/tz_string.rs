//! Functions used for parsing a TZ string.

use super::utils::Cursor;
use crate::error::TzStringError;
use crate::rule::RecurringYearlyRule;
use crate::source::{AlternateTime, LocalTimeType, TransitionRule};

use std::num::ParseIntError;
use std::str::{self, FromStr};

/// Default rule time, in seconds
const DEFAULT_RULE_TIME: i32 = 2 * 3600;

/// Rule day of a TZ string
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum RuleDay {
    /// One-based Julian day in `[1, 365]`, February 29 never counted
    Julian1WithoutLeap(u16),
    /// Zero-based Julian day in `[0, 365]`, February 29 counted in leap years
    Julian0WithLeap(u16),
    /// Day represented by a month, a week of the month in `[1, 5]` and a week day in `[0, 6]`
    MonthWeekDay(u8, u8, u8),
}

impl RuleDay {
    /// Returns the recurring yearly rule for the rule day at the specified rule time
    fn into_rule(self, time: i32) -> Result<RecurringYearlyRule, TzStringError> {
        match self {
            Self::Julian1WithoutLeap(julian_day_1) => RecurringYearlyRule::from_julian_day(julian_day_1, time),
            Self::Julian0WithLeap(_) => Err(TzStringError::UnsupportedRuleDay),
            Self::MonthWeekDay(month, week, week_day) => RecurringYearlyRule::from_month_week_day(month, week, week_day, time),
        }
    }
}

/// Parse integer from a slice of bytes
fn parse_int<T: FromStr<Err = ParseIntError>>(bytes: &[u8]) -> Result<T, TzStringError> {
    Ok(str::from_utf8(bytes)?.parse()?)
}

/// Parse time zone designation
fn parse_time_zone_designation<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, TzStringError> {
    let unquoted = if cursor.peek() == Some(b'<') {
        cursor.read_exact(1)?;
        let unquoted = cursor.read_until(|&x| x == b'>')?;
        cursor.read_exact(1)?;
        unquoted
    } else {
        cursor.read_while(u8::is_ascii_alphabetic)?
    };

    if unquoted.len() < 3 {
        return Err(TzStringError::InvalidDesignation);
    }

    Ok(str::from_utf8(unquoted)?)
}

/// Parse hours, minutes and seconds
fn parse_hhmmss(cursor: &mut Cursor<'_>) -> Result<(i32, i32, i32), TzStringError> {
    let hour = parse_int(cursor.read_while(u8::is_ascii_digit)?)?;

    let mut minute = 0;
    let mut second = 0;

    if cursor.read_optional_tag(b":")? {
        minute = parse_int(cursor.read_while(u8::is_ascii_digit)?)?;

        if cursor.read_optional_tag(b":")? {
            second = parse_int(cursor.read_while(u8::is_ascii_digit)?)?;
        }
    }

    Ok((hour, minute, second))
}

/// Parse signed hours, minutes and seconds
fn parse_signed_hhmmss(cursor: &mut Cursor<'_>) -> Result<(i32, i32, i32, i32), TzStringError> {
    let mut sign = 1;
    if let Some(c @ (b'+' | b'-')) = cursor.peek() {
        cursor.read_exact(1)?;
        if c == b'-' {
            sign = -1;
        }
    }

    let (hour, minute, second) = parse_hhmmss(cursor)?;
    Ok((sign, hour, minute, second))
}

/// Parse time zone offset, positive west of Greenwich
fn parse_offset(cursor: &mut Cursor<'_>) -> Result<i32, TzStringError> {
    let (sign, hour, minute, second) = parse_signed_hhmmss(cursor)?;

    if !(0..=24).contains(&hour) {
        return Err(TzStringError::InvalidOffsetHour);
    }
    if !(0..=59).contains(&minute) {
        return Err(TzStringError::InvalidOffsetMinute);
    }
    if !(0..=59).contains(&second) {
        return Err(TzStringError::InvalidOffsetSecond);
    }

    Ok(sign * (hour * 3600 + minute * 60 + second))
}

/// Parse transition rule day
fn parse_rule_day(cursor: &mut Cursor<'_>) -> Result<RuleDay, TzStringError> {
    match cursor.peek() {
        Some(b'J') => {
            cursor.read_exact(1)?;
            Ok(RuleDay::Julian1WithoutLeap(parse_int(cursor.read_while(u8::is_ascii_digit)?)?))
        }
        Some(b'M') => {
            cursor.read_exact(1)?;

            let month = parse_int(cursor.read_while(u8::is_ascii_digit)?)?;
            cursor.read_tag(b".")?;
            let week = parse_int(cursor.read_while(u8::is_ascii_digit)?)?;
            cursor.read_tag(b".")?;
            let week_day = parse_int(cursor.read_while(u8::is_ascii_digit)?)?;

            Ok(RuleDay::MonthWeekDay(month, week, week_day))
        }
        _ => Ok(RuleDay::Julian0WithLeap(parse_int(cursor.read_while(u8::is_ascii_digit)?)?)),
    }
}

/// Parse transition rule time
fn parse_rule_time(cursor: &mut Cursor<'_>) -> Result<i32, TzStringError> {
    let (hour, minute, second) = parse_hhmmss(cursor)?;

    if !(0..=24).contains(&hour) {
        return Err(TzStringError::InvalidDayTimeHour);
    }
    if !(0..=59).contains(&minute) {
        return Err(TzStringError::InvalidDayTimeMinute);
    }
    if !(0..=59).contains(&second) {
        return Err(TzStringError::InvalidDayTimeSecond);
    }

    Ok(hour * 3600 + minute * 60 + second)
}

/// Parse transition rule time with TZ string extensions
fn parse_rule_time_extended(cursor: &mut Cursor<'_>) -> Result<i32, TzStringError> {
    let (sign, hour, minute, second) = parse_signed_hhmmss(cursor)?;

    if !(-167..=167).contains(&hour) {
        return Err(TzStringError::InvalidDayTimeHour);
    }
    if !(0..=59).contains(&minute) {
        return Err(TzStringError::InvalidDayTimeMinute);
    }
    if !(0..=59).contains(&second) {
        return Err(TzStringError::InvalidDayTimeSecond);
    }

    Ok(sign * (hour * 3600 + minute * 60 + second))
}

/// Parse transition rule
fn parse_rule_block(cursor: &mut Cursor<'_>, use_string_extensions: bool) -> Result<RecurringYearlyRule, TzStringError> {
    let date = parse_rule_day(cursor)?;

    let time = if cursor.read_optional_tag(b"/")? {
        if use_string_extensions {
            parse_rule_time_extended(cursor)?
        } else {
            parse_rule_time(cursor)?
        }
    } else {
        DEFAULT_RULE_TIME
    };

    date.into_rule(time)
}

/// Parse a POSIX TZ string containing a time zone description, as described in [the POSIX documentation of the `TZ` environment variable](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html).
///
/// TZ string extensions from [RFC 8536](https://datatracker.ietf.org/doc/html/rfc8536#section-3.3.1) may be used.
/// Rules are only accepted if they have an equivalent recurring yearly rule.
///
pub(crate) fn parse_posix_tz(tz_string: &[u8], use_string_extensions: bool) -> Result<TransitionRule, TzStringError> {
    if tz_string.is_empty() {
        return Err(TzStringError::Empty);
    }

    let mut cursor = Cursor::new(tz_string);

    let std_designation = parse_time_zone_designation(&mut cursor)?;
    let std_offset = parse_offset(&mut cursor)?;

    if cursor.is_empty() {
        return Ok(TransitionRule::Fixed(LocalTimeType::new(-std_offset, false, Some(std_designation))));
    }

    let dst_designation = parse_time_zone_designation(&mut cursor)?;

    let dst_offset = match cursor.peek() {
        Some(b',') => std_offset - 3600,
        Some(_) => parse_offset(&mut cursor)?,
        None => return Err(TzStringError::MissingDstStartEndRules),
    };

    if cursor.is_empty() {
        return Err(TzStringError::MissingDstStartEndRules);
    }

    cursor.read_tag(b",")?;
    let dst_start = parse_rule_block(&mut cursor, use_string_extensions)?;

    cursor.read_tag(b",")?;
    let dst_end = parse_rule_block(&mut cursor, use_string_extensions)?;

    if !cursor.is_empty() {
        return Err(TzStringError::RemainingData);
    }

    Ok(TransitionRule::Alternate(AlternateTime::new(
        LocalTimeType::new(-std_offset, false, Some(std_designation)),
        LocalTimeType::new(-dst_offset, true, Some(dst_designation)),
        dst_start,
        dst_end,
    )))
}
