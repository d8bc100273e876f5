//! Types related to a date time.

use crate::constants::*;
use crate::error::DateTimeError;

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::time::SystemTime;

/// Signed duration in seconds
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeSpan(i64);

impl TimeSpan {
    /// Zero duration
    pub const ZERO: Self = Self(0);

    /// Construct a time span from a number of seconds
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Construct a time span from a number of minutes
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * SECONDS_PER_MINUTE)
    }

    /// Construct a time span from a number of hours
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours * SECONDS_PER_HOUR)
    }

    /// Construct a time span from a number of days
    pub const fn from_days(days: i64) -> Self {
        Self(days * SECONDS_PER_DAY)
    }

    /// Construct a time span from a number of weeks
    pub const fn from_weeks(weeks: i64) -> Self {
        Self(weeks * SECONDS_PER_WEEK)
    }

    /// Returns the duration in seconds
    pub const fn seconds(&self) -> i64 {
        self.0
    }
}

impl Neg for TimeSpan {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Add for TimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

/// Instant exprimed in seconds since the Unix epoch, with calendar accessors in the [proleptic gregorian calendar](https://en.wikipedia.org/wiki/Proleptic_Gregorian_calendar).
///
/// Whether the instant is read as UTC, local or standard time depends on the caller.
/// Civil fields are always computed without any offset.
///
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Time {
    /// Seconds since `1970-01-01T00:00:00`
    unix_time: i64,
}

/// Broken-down calendar fields
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Civil {
    year: i32,
    month: u8,
    month_day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Time {
    /// Construct a time from calendar fields
    ///
    /// ## Inputs
    ///
    /// * `year`: Year in `[1970, 2099]`
    /// * `month`: Month in `[1, 12]`
    /// * `month_day`: Day of the month in `[1, 31]`
    /// * `hour`: Hours since midnight in `[0, 23]`
    /// * `minute`: Minutes in `[0, 59]`
    /// * `second`: Seconds in `[0, 59]`
    ///
    pub fn new(year: i32, month: u8, month_day: u8, hour: u8, minute: u8, second: u8) -> Result<Self, DateTimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateTimeError::InvalidYear);
        }
        if !(1..=12).contains(&month) {
            return Err(DateTimeError::InvalidMonth);
        }
        if !(1..=days_in_month(year, month)).contains(&month_day) {
            return Err(DateTimeError::InvalidMonthDay);
        }
        if hour > 23 {
            return Err(DateTimeError::InvalidHour);
        }
        if minute > 59 {
            return Err(DateTimeError::InvalidMinute);
        }
        if second > 59 {
            return Err(DateTimeError::InvalidSecond);
        }

        Ok(Self::from_civil(year, month, month_day.into(), hour, minute, second))
    }

    /// Construct a time from calendar fields without validation.
    ///
    /// A month day past the end of the month overflows into the next month.
    ///
    pub(crate) fn from_civil(year: i32, month: u8, month_day: i64, hour: u8, minute: u8, second: u8) -> Self {
        let mut result = days_since_unix_epoch(year, month, month_day);
        result *= SECONDS_PER_DAY;
        result += hour as i64 * SECONDS_PER_HOUR;
        result += minute as i64 * SECONDS_PER_MINUTE;
        result += second as i64;

        Self { unix_time: result }
    }

    /// Construct a time from a Unix time in seconds
    pub const fn from_unix_time(unix_time: i64) -> Self {
        Self { unix_time }
    }

    /// Returns the current UTC time
    pub fn now() -> Self {
        let unix_time = match SystemTime::now().duration_since(SystemTime::UNIX_EPOCH) {
            Ok(duration) => duration.as_secs() as i64,
            Err(error) => -(error.duration().as_secs() as i64),
        };

        Self { unix_time }
    }

    /// Returns the first second of a year
    pub fn start_of_year(year: i32) -> Self {
        Self::from_civil(year, 1, 1, 0, 0, 0)
    }

    /// Returns the last second of a year
    pub fn end_of_year(year: i32) -> Self {
        Self::from_civil(year, 12, 31, 23, 59, 59)
    }

    /// Returns the Unix time in seconds
    pub const fn unix_time(&self) -> i64 {
        self.unix_time
    }

    /// Returns year
    pub fn year(&self) -> i32 {
        self.civil().year
    }

    /// Returns month in `[1, 12]`
    pub fn month(&self) -> u8 {
        self.civil().month
    }

    /// Returns day of the month in `[1, 31]`
    pub fn month_day(&self) -> u8 {
        self.civil().month_day
    }

    /// Returns hours since midnight in `[0, 23]`
    pub fn hour(&self) -> u8 {
        self.civil().hour
    }

    /// Returns minutes in `[0, 59]`
    pub fn minute(&self) -> u8 {
        self.civil().minute
    }

    /// Returns seconds in `[0, 59]`
    pub fn second(&self) -> u8 {
        self.civil().second
    }

    /// Returns days since Sunday in `[0, 6]`
    pub fn week_day(&self) -> u8 {
        (4 + self.unix_time.div_euclid(SECONDS_PER_DAY)).rem_euclid(DAYS_PER_WEEK) as u8
    }

    /// Returns days since January 1 in `[0, 365]`
    pub fn year_day(&self) -> u16 {
        let civil = self.civil();
        year_day(civil.year, civil.month, civil.month_day.into())
    }

    /// Returns seconds since midnight
    pub fn seconds_of_day(&self) -> i64 {
        self.unix_time.rem_euclid(SECONDS_PER_DAY)
    }

    fn civil(&self) -> Civil {
        let seconds = self.unix_time - UNIX_OFFSET_SECS;

        let mut remaining_days = seconds.div_euclid(SECONDS_PER_DAY);
        let remaining_seconds = seconds.rem_euclid(SECONDS_PER_DAY);

        let cycles_400_years = remaining_days.div_euclid(DAYS_PER_400_YEARS);
        remaining_days = remaining_days.rem_euclid(DAYS_PER_400_YEARS);

        let cycles_100_years = (remaining_days / DAYS_PER_100_YEARS).min(3);
        remaining_days -= cycles_100_years * DAYS_PER_100_YEARS;

        let cycles_4_years = (remaining_days / DAYS_PER_4_YEARS).min(24);
        remaining_days -= cycles_4_years * DAYS_PER_4_YEARS;

        let remaining_years = (remaining_days / DAYS_PER_NORMAL_YEAR).min(3);
        remaining_days -= remaining_years * DAYS_PER_NORMAL_YEAR;

        let mut year = OFFSET_YEAR + remaining_years + cycles_4_years * 4 + cycles_100_years * 100 + cycles_400_years * 400;

        // Months are counted from March
        let mut month = 2;
        for days in DAY_IN_MONTHS_LEAP_YEAR_FROM_MARCH {
            if remaining_days < days {
                break;
            }
            remaining_days -= days;
            month += 1;
        }

        if month >= MONTHS_PER_YEAR {
            month -= MONTHS_PER_YEAR;
            year += 1;
        }

        Civil {
            year: year as i32,
            month: month as u8 + 1,
            month_day: remaining_days as u8 + 1,
            hour: (remaining_seconds / SECONDS_PER_HOUR) as u8,
            minute: ((remaining_seconds / SECONDS_PER_MINUTE) % MINUTES_PER_HOUR) as u8,
            second: (remaining_seconds % SECONDS_PER_MINUTE) as u8,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let civil = self.civil();
        write!(f, "{:04}-{:02}-{:02} {:02}:{:02}:{:02}", civil.year, civil.month, civil.month_day, civil.hour, civil.minute, civil.second)
    }
}

impl Add<TimeSpan> for Time {
    type Output = Self;

    fn add(self, rhs: TimeSpan) -> Self {
        Self { unix_time: self.unix_time + rhs.0 }
    }
}

impl Sub<TimeSpan> for Time {
    type Output = Self;

    fn sub(self, rhs: TimeSpan) -> Self {
        Self { unix_time: self.unix_time - rhs.0 }
    }
}

impl Sub for Time {
    type Output = TimeSpan;

    fn sub(self, rhs: Self) -> TimeSpan {
        TimeSpan(self.unix_time - rhs.unix_time)
    }
}

impl AddAssign<TimeSpan> for Time {
    fn add_assign(&mut self, rhs: TimeSpan) {
        self.unix_time += rhs.0;
    }
}

impl SubAssign<TimeSpan> for Time {
    fn sub_assign(&mut self, rhs: TimeSpan) {
        self.unix_time -= rhs.0;
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Returns the number of days in a month, with month in `[1, 12]`
pub fn days_in_month(year: i32, month: u8) -> u8 {
    let index = usize::from(month.clamp(1, 12) - 1);
    let days = DAY_IN_MONTHS_NORMAL_YEAR[index] as u8;

    if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Compute the number of days since January 1 in `[0, 365]`
fn year_day(year: i32, month: u8, month_day: i64) -> u16 {
    let index = usize::from(month - 1);
    let leap = (index > 1 && is_leap_year(year)) as i64;

    (CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[index] + leap + month_day - 1) as u16
}

/// Compute the number of days since Unix epoch (`1970-01-01T00:00:00Z`).
///
/// ## Inputs
///
/// * `year`: Year
/// * `month`: Month in `[1, 12]`
/// * `month_day`: Day of the month, may exceed the month length
///
fn days_since_unix_epoch(year: i32, month: u8, month_day: i64) -> i64 {
    let index = usize::from(month.clamp(1, 12) - 1);
    let is_leap_year = is_leap_year(year);
    let year = year as i64;

    let mut result = (year - 1970) * 365;

    if year >= 1970 {
        result += (year - 1968) / 4;
        result -= (year - 1900) / 100;
        result += (year - 1600) / 400;

        if is_leap_year && index < 2 {
            result -= 1;
        }
    } else {
        result += (year - 1972) / 4;
        result -= (year - 2000) / 100;
        result += (year - 2000) / 400;

        if is_leap_year && index >= 2 {
            result += 1;
        }
    }

    result += CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[index] + month_day - 1;

    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_time() -> Result<(), DateTimeError> {
        let cases = [
            (951825600, (2000, 2, 29, 12, 0, 0)),
            (951912000, (2000, 3, 1, 12, 0, 0)),
            (983448000, (2001, 3, 1, 12, 0, 0)),
            (1078056000, (2004, 2, 29, 12, 0, 0)),
            (1078142400, (2004, 3, 1, 12, 0, 0)),
            (1710037800, (2024, 3, 10, 2, 30, 0)),
            (4102444799, (2099, 12, 31, 23, 59, 59)),
        ];

        for (unix_time, (year, month, month_day, hour, minute, second)) in cases {
            let time = Time::from_unix_time(unix_time);
            assert_eq!(time.year(), year);
            assert_eq!(time.month(), month);
            assert_eq!(time.month_day(), month_day);
            assert_eq!(time.hour(), hour);
            assert_eq!(time.minute(), minute);
            assert_eq!(time.second(), second);
            assert_eq!(Time::new(year, month, month_day, hour, minute, second)?, time);
        }

        assert_eq!(Time::from_unix_time(0), Time::new(1970, 1, 1, 0, 0, 0)?);
        assert_eq!(Time::from_unix_time(-1).year(), 1969);
        assert_eq!(Time::from_unix_time(4107585600).to_string(), "2100-03-01 12:00:00");
        assert_eq!(Time::from_unix_time(-8483659200).to_string(), "1701-03-01 12:00:00");

        Ok(())
    }

    #[test]
    fn test_time_validation() {
        assert_eq!(Time::new(1969, 12, 31, 0, 0, 0), Err(DateTimeError::InvalidYear));
        assert_eq!(Time::new(2100, 1, 1, 0, 0, 0), Err(DateTimeError::InvalidYear));
        assert_eq!(Time::new(2023, 0, 1, 0, 0, 0), Err(DateTimeError::InvalidMonth));
        assert_eq!(Time::new(2023, 2, 29, 0, 0, 0), Err(DateTimeError::InvalidMonthDay));
        assert!(Time::new(2024, 2, 29, 0, 0, 0).is_ok());
        assert_eq!(Time::new(2023, 4, 31, 0, 0, 0), Err(DateTimeError::InvalidMonthDay));
        assert_eq!(Time::new(2023, 1, 1, 24, 0, 0), Err(DateTimeError::InvalidHour));
        assert_eq!(Time::new(2023, 1, 1, 0, 60, 0), Err(DateTimeError::InvalidMinute));
        assert_eq!(Time::new(2023, 1, 1, 0, 0, 60), Err(DateTimeError::InvalidSecond));
    }

    #[test]
    fn test_time_arithmetic() -> Result<(), DateTimeError> {
        let time = Time::new(2024, 2, 28, 23, 0, 0)?;

        assert_eq!(time + TimeSpan::from_hours(1), Time::new(2024, 2, 29, 0, 0, 0)?);
        assert_eq!(time + TimeSpan::from_days(2), Time::new(2024, 3, 1, 23, 0, 0)?);
        assert_eq!(time - TimeSpan::from_weeks(1), Time::new(2024, 2, 21, 23, 0, 0)?);
        assert_eq!(Time::new(2024, 3, 1, 23, 0, 0)? - time, TimeSpan::from_days(2));
        assert_eq!(-TimeSpan::from_minutes(2), TimeSpan::from_seconds(-120));

        let mut time = time;
        time += TimeSpan::from_seconds(3600);
        time -= TimeSpan::from_days(1);
        assert_eq!(time, Time::new(2024, 2, 28, 0, 0, 0)?);

        assert_eq!(Time::from_civil(2023, 2, 29, 0, 0, 0), Time::new(2023, 3, 1, 0, 0, 0)?);
        assert_eq!(Time::end_of_year(2023) + TimeSpan::from_seconds(1), Time::start_of_year(2024));

        Ok(())
    }

    #[test]
    fn test_week_day() -> Result<(), DateTimeError> {
        let cases = [
            ((1970, 1, 1), 4),
            ((2000, 1, 1), 6),
            ((2000, 2, 28), 1),
            ((2000, 2, 29), 2),
            ((2000, 3, 1), 3),
            ((2000, 12, 31), 0),
            ((2001, 1, 1), 1),
            ((2001, 2, 28), 3),
            ((2001, 3, 1), 4),
            ((2001, 12, 31), 1),
            ((2024, 3, 10), 0),
        ];

        for ((year, month, month_day), week_day) in cases {
            assert_eq!(Time::new(year, month, month_day, 12, 0, 0)?.week_day(), week_day);
        }

        assert_eq!(Time::from_unix_time(-1).week_day(), 3);

        Ok(())
    }

    #[test]
    fn test_year_day() {
        assert_eq!(year_day(2000, 1, 1), 0);
        assert_eq!(year_day(2000, 2, 28), 58);
        assert_eq!(year_day(2000, 2, 29), 59);
        assert_eq!(year_day(2000, 3, 1), 60);
        assert_eq!(year_day(2000, 12, 31), 365);

        assert_eq!(year_day(2001, 1, 1), 0);
        assert_eq!(year_day(2001, 2, 28), 58);
        assert_eq!(year_day(2001, 3, 1), 59);
        assert_eq!(year_day(2001, 12, 31), 364);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2001));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2200));
        assert!(!is_leap_year(2300));
        assert!(is_leap_year(2400));

        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 11), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_days_since_unix_epoch() {
        assert_eq!(days_since_unix_epoch(1600, 2, 29), -135081);
        assert_eq!(days_since_unix_epoch(1600, 3, 1), -135080);
        assert_eq!(days_since_unix_epoch(1700, 3, 1), -98556);
        assert_eq!(days_since_unix_epoch(1701, 3, 1), -98191);
        assert_eq!(days_since_unix_epoch(1704, 2, 29), -97096);
        assert_eq!(days_since_unix_epoch(2000, 2, 29), 11016);
        assert_eq!(days_since_unix_epoch(2000, 3, 1), 11017);
        assert_eq!(days_since_unix_epoch(2001, 3, 1), 11382);
        assert_eq!(days_since_unix_epoch(2004, 2, 29), 12477);
        assert_eq!(days_since_unix_epoch(2100, 3, 1), 47541);
        assert_eq!(days_since_unix_epoch(2024, 3, 10), 19792);
    }
}
