//! Recurring yearly rule: the same civil moment every year.

use crate::datetime::{days_in_month, Time, TimeSpan};
use crate::error::{RuleError, TzError, TzStringError};

use std::fmt;

const MONTH_NAMES: [&str; 12] = ["January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December"];
const WEEK_DAY_NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

/// Offset applied to the anchor date of a recurring yearly rule
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum OffsetType {
    /// No offset from the anchor, the date is set explicitly
    #[default]
    NoOffset = 0,
    /// Given weekday strictly before the anchor
    WeekdayBefore = 1,
    /// First weekday on or after the anchor
    WeekdayFirstAfter = 2,
    /// Second weekday on or after the anchor
    WeekdaySecondAfter = 3,
    /// Third weekday on or after the anchor
    WeekdayThirdAfter = 4,
    /// Fourth weekday on or after the anchor
    WeekdayFourthAfter = 5,
    /// Last weekday of the month, the anchor day is always the first of the month
    WeekdayLastAfter = 6,
    /// Observed on the date and on the following day
    ObserveOnThisAndFollowing = 7,
    /// Shift to Monday if the date is a Sunday
    MondayIfSunday = 8,
    /// Shift to Friday if the date is a Sunday
    FridayIfSunday = 9,
    /// Shift to Monday if the date is a Saturday
    MondayIfSaturday = 10,
    /// Shift to Friday if the date is a Saturday
    FridayIfSaturday = 11,
    /// Shift to Monday if the date is a Saturday or a Sunday
    MondayIfSaturdayOrSunday = 12,
    /// Shift to Friday if the date is a Saturday or a Sunday
    FridayIfSaturdayOrSunday = 13,
    /// Postpone to Monday if Sunday, advance to Friday if Saturday
    MondayIfSundayFridayIfSaturday = 14,
    /// Observed on the day following the date
    ObserveOnFollowing = 15,
}

impl OffsetType {
    /// Returns `true` if the offset type does not depend on a day of week
    pub fn is_day_of_week_ignored(self) -> bool {
        !(Self::WeekdayBefore..=Self::WeekdayLastAfter).contains(&self)
    }

    fn weeks_from_anchor(self) -> i64 {
        match self {
            Self::WeekdayBefore => -1,
            Self::WeekdaySecondAfter => 1,
            Self::WeekdayThirdAfter => 2,
            Self::WeekdayFourthAfter => 3,
            Self::WeekdayLastAfter => 4,
            _ => 0,
        }
    }

    fn ordinal(self) -> &'static str {
        match self {
            Self::WeekdayFirstAfter => "first",
            Self::WeekdaySecondAfter => "second",
            Self::WeekdayThirdAfter => "third",
            Self::WeekdayFourthAfter => "fourth",
            _ => "",
        }
    }
}

impl TryFrom<u8> for OffsetType {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, RuleError> {
        use OffsetType::*;

        const ALL: [OffsetType; 16] = [
            NoOffset,
            WeekdayBefore,
            WeekdayFirstAfter,
            WeekdaySecondAfter,
            WeekdayThirdAfter,
            WeekdayFourthAfter,
            WeekdayLastAfter,
            ObserveOnThisAndFollowing,
            MondayIfSunday,
            FridayIfSunday,
            MondayIfSaturday,
            FridayIfSaturday,
            MondayIfSaturdayOrSunday,
            FridayIfSaturdayOrSunday,
            MondayIfSundayFridayIfSaturday,
            ObserveOnFollowing,
        ];

        ALL.get(usize::from(value)).copied().ok_or(RuleError::InvalidOffsetType)
    }
}

/// Year-generic description of a civil moment, resolved into a concrete time for a given year.
///
/// A rule with all fields set to zero is null: it describes no moment, and reading it yields [`TzError::NoValue`].
///
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct RecurringYearlyRule {
    /// Offset applied to the anchor date
    offset_type: OffsetType,
    /// Month in `[1, 12]`
    month: u8,
    /// Day of the month in `[1, 31]`
    day: u8,
    /// Days since Sunday in `[0, 6]`, ignored by fixed-date offset types
    weekday: u8,
    /// Hours since midnight in `[0, 23]`
    hours: u8,
    /// Minutes in `[0, 59]`
    minutes: u8,
    /// Seconds in `[0, 59]`
    seconds: u8,
}

impl RecurringYearlyRule {
    /// Null rule
    pub const NULL: Self = Self { offset_type: OffsetType::NoOffset, month: 0, day: 0, weekday: 0, hours: 0, minutes: 0, seconds: 0 };

    /// Construct a rule on a fixed date of the month, with an optional weekend shift
    pub fn on_day(offset_type: OffsetType, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self, RuleError> {
        if !offset_type.is_day_of_week_ignored() {
            return Err(RuleError::ExpectedFixedDateOffsetType);
        }

        let rule = Self::new_unchecked(offset_type, month, day, hour, minute, 0, 0);
        rule.check_is_valid()?;
        Ok(rule)
    }

    /// Construct a rule on a weekday relative to an anchor day of the month
    pub fn on_weekday(offset_type: OffsetType, month: u8, day: u8, hour: u8, minute: u8, weekday: u8) -> Result<Self, RuleError> {
        if offset_type.is_day_of_week_ignored() {
            return Err(RuleError::ExpectedWeekdayOffsetType);
        }

        let rule = Self::new_unchecked(offset_type, month, day, hour, minute, 0, weekday);
        rule.check_is_valid()?;
        Ok(rule)
    }

    /// Construct a rule without validation
    pub(crate) const fn new_unchecked(offset_type: OffsetType, month: u8, day: u8, hours: u8, minutes: u8, seconds: u8, weekday: u8) -> Self {
        Self { offset_type, month, day, weekday, hours, minutes, seconds }
    }

    /// Construct a rule from a POSIX `Mm.w.d` rule day and a rule time in seconds.
    ///
    /// Weeks 1 to 4 anchor a first-weekday rule on the first day of that week of the month,
    /// week 5 means the last weekday of the month.
    ///
    pub(crate) fn from_month_week_day(month: u8, week: u8, week_day: u8, time: i32) -> Result<Self, TzStringError> {
        if !(1..=12).contains(&month) || !(1..=5).contains(&week) || week_day > 6 {
            return Err(TzStringError::InvalidRuleDay);
        }
        let (hours, minutes, seconds) = split_rule_time(time)?;

        let (offset_type, day) = match week {
            5 => (OffsetType::WeekdayLastAfter, 1),
            week => (OffsetType::WeekdayFirstAfter, 7 * (week - 1) + 1),
        };

        Ok(Self::new_unchecked(offset_type, month, day, hours, minutes, seconds, week_day))
    }

    /// Construct a rule from a POSIX `Jn` rule day (one-based, February 29 never counted) and a rule time in seconds
    pub(crate) fn from_julian_day(julian_day_1: u16, time: i32) -> Result<Self, TzStringError> {
        use crate::constants::DAY_IN_MONTHS_NORMAL_YEAR;

        if !(1..=365).contains(&julian_day_1) {
            return Err(TzStringError::InvalidRuleDay);
        }
        let (hours, minutes, seconds) = split_rule_time(time)?;

        let mut day = i64::from(julian_day_1);
        let mut month = 1;
        for days in DAY_IN_MONTHS_NORMAL_YEAR {
            if day <= days {
                break;
            }
            day -= days;
            month += 1;
        }

        Ok(Self::new_unchecked(OffsetType::NoOffset, month, day as u8, hours, minutes, seconds, 0))
    }

    /// Returns `true` if the rule is null
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Reset the rule to null
    pub fn set_to_null(&mut self) {
        *self = Self::NULL;
    }

    fn check_not_null(&self) -> Result<(), TzError> {
        if self.is_null() {
            Err(TzError::NoValue)
        } else {
            Ok(())
        }
    }

    /// Returns offset type
    pub fn offset_type(&self) -> Result<OffsetType, TzError> {
        self.check_not_null()?;
        Ok(self.offset_type)
    }

    /// Returns `true` if the weekday field is not used by the offset type
    pub fn is_day_of_week_ignored(&self) -> Result<bool, TzError> {
        Ok(self.offset_type()?.is_day_of_week_ignored())
    }

    /// Returns month in `[1, 12]`
    pub fn month(&self) -> Result<u8, TzError> {
        self.check_not_null()?;
        Ok(self.month)
    }

    /// Returns day of the month in `[1, 31]`
    pub fn day_of_month(&self) -> Result<u8, TzError> {
        self.check_not_null()?;
        Ok(self.day)
    }

    /// Returns days since Sunday in `[0, 6]`
    pub fn day_of_week(&self) -> Result<u8, TzError> {
        self.check_not_null()?;
        Ok(self.weekday)
    }

    /// Returns hours in `[0, 23]`
    pub fn hours(&self) -> Result<u8, TzError> {
        self.check_not_null()?;
        Ok(self.hours)
    }

    /// Returns minutes in `[0, 59]`
    pub fn minutes(&self) -> Result<u8, TzError> {
        self.check_not_null()?;
        Ok(self.minutes)
    }

    /// Returns seconds in `[0, 59]`
    pub fn seconds(&self) -> Result<u8, TzError> {
        self.check_not_null()?;
        Ok(self.seconds)
    }

    /// Set offset type
    pub fn set_offset_type(&mut self, offset_type: OffsetType) {
        self.offset_type = offset_type;
    }

    /// Set month in `[1, 12]`
    pub fn set_month(&mut self, month: u8) -> Result<(), RuleError> {
        if !(1..=12).contains(&month) {
            return Err(RuleError::InvalidMonth);
        }
        self.month = month;
        Ok(())
    }

    /// Set day of the month in `[1, 31]`.
    ///
    /// The day is checked against the month only by [`Self::check_is_valid`].
    ///
    pub fn set_day_of_month(&mut self, day: u8) -> Result<(), RuleError> {
        if !(1..=31).contains(&day) {
            return Err(RuleError::InvalidDayOfMonth);
        }
        self.day = day;
        Ok(())
    }

    /// Set days since Sunday in `[0, 6]`
    pub fn set_day_of_week(&mut self, weekday: u8) -> Result<(), RuleError> {
        if weekday > 6 {
            return Err(RuleError::InvalidDayOfWeek);
        }
        self.weekday = weekday;
        Ok(())
    }

    /// Set hours in `[0, 23]`
    pub fn set_hours(&mut self, hours: u8) -> Result<(), RuleError> {
        if hours > 23 {
            return Err(RuleError::InvalidHours);
        }
        self.hours = hours;
        Ok(())
    }

    /// Set minutes in `[0, 59]`
    pub fn set_minutes(&mut self, minutes: u8) -> Result<(), RuleError> {
        if minutes > 59 {
            return Err(RuleError::InvalidMinutes);
        }
        self.minutes = minutes;
        Ok(())
    }

    /// Set seconds in `[0, 59]`
    pub fn set_seconds(&mut self, seconds: u8) -> Result<(), RuleError> {
        if seconds > 59 {
            return Err(RuleError::InvalidSeconds);
        }
        self.seconds = seconds;
        Ok(())
    }

    /// Check every field, failing on the first invalid one. A null rule is valid.
    pub fn check_is_valid(&self) -> Result<(), RuleError> {
        if self.is_null() {
            return Ok(());
        }

        let mut rule = Self::NULL;
        rule.set_offset_type(self.offset_type);
        rule.set_month(self.month)?;
        rule.set_day_of_month(self.day)?;
        rule.set_hours(self.hours)?;
        rule.set_minutes(self.minutes)?;
        rule.set_seconds(self.seconds)?;
        rule.set_day_of_week(self.weekday)?;

        // 1999 is not a leap year
        if self.day > days_in_month(1999, self.month) {
            return Err(RuleError::InvalidDayOfMonth);
        }

        Ok(())
    }

    /// Returns the moment described by the rule in the year of the given time
    pub fn pertinent(&self, tag_time: &Time) -> Result<Time, TzError> {
        self.pertinent_for_year(tag_time.year())
    }

    /// Returns the moment described by the rule in the given year
    pub fn pertinent_for_year(&self, year: i32) -> Result<Time, TzError> {
        use OffsetType::*;

        self.check_not_null()?;

        let day = if self.offset_type == WeekdayLastAfter { 1 } else { self.day };
        let mut time = Time::from_civil(year, self.month, day.into(), self.hours, self.minutes, self.seconds);

        let week_day = time.week_day();
        match self.offset_type {
            NoOffset | ObserveOnThisAndFollowing => {}
            WeekdayBefore | WeekdayFirstAfter | WeekdaySecondAfter | WeekdayThirdAfter | WeekdayFourthAfter | WeekdayLastAfter => {
                let days_forward = (i64::from(self.weekday) - i64::from(week_day)).rem_euclid(7);
                time += TimeSpan::from_days(days_forward) + TimeSpan::from_weeks(self.offset_type.weeks_from_anchor());

                if self.offset_type == WeekdayLastAfter && time.month() != self.month {
                    time -= TimeSpan::from_weeks(1);
                }
            }
            MondayIfSunday if week_day == 0 => time += TimeSpan::from_days(1),
            FridayIfSunday if week_day == 0 => time -= TimeSpan::from_days(2),
            MondayIfSaturday if week_day == 6 => time += TimeSpan::from_days(2),
            FridayIfSaturday if week_day == 6 => time -= TimeSpan::from_days(1),
            MondayIfSaturdayOrSunday => match week_day {
                6 => time += TimeSpan::from_days(2),
                0 => time += TimeSpan::from_days(1),
                _ => {}
            },
            FridayIfSaturdayOrSunday => match week_day {
                6 => time -= TimeSpan::from_days(1),
                0 => time -= TimeSpan::from_days(2),
                _ => {}
            },
            MondayIfSundayFridayIfSaturday => match week_day {
                6 => time -= TimeSpan::from_days(1),
                0 => time += TimeSpan::from_days(1),
                _ => {}
            },
            ObserveOnFollowing => time += TimeSpan::from_days(1),
            MondayIfSunday | FridayIfSunday | MondayIfSaturday | FridayIfSaturday => {}
        }

        Ok(time)
    }
}

/// Split a rule time in seconds into hours, minutes and seconds of a single day
fn split_rule_time(time: i32) -> Result<(u8, u8, u8), TzStringError> {
    if !(0..86400).contains(&time) {
        return Err(TzStringError::UnsupportedRuleTime);
    }

    Ok(((time / 3600) as u8, (time / 60 % 60) as u8, (time % 60) as u8))
}

impl fmt::Display for RecurringYearlyRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use OffsetType::*;

        if self.is_null() || self.check_is_valid().is_err() {
            return f.write_str("null");
        }

        let month = MONTH_NAMES[usize::from(self.month - 1)];
        let weekday = WEEK_DAY_NAMES[usize::from(self.weekday)];

        match self.offset_type {
            WeekdayBefore => write!(f, "{weekday} before {month} {}", self.day)?,
            WeekdayLastAfter => write!(f, "last {weekday} of {month}")?,
            WeekdayFirstAfter | WeekdaySecondAfter | WeekdayThirdAfter | WeekdayFourthAfter => {
                write!(f, "{} {weekday} on or after {month} {}", self.offset_type.ordinal(), self.day)?
            }
            _ => write!(f, "{month} {}", self.day)?,
        }

        write!(f, " at {:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)?;

        let shift = match self.offset_type {
            ObserveOnThisAndFollowing => "also observed on the following day",
            MondayIfSunday => "Monday if Sunday",
            FridayIfSunday => "Friday if Sunday",
            MondayIfSaturday => "Monday if Saturday",
            FridayIfSaturday => "Friday if Saturday",
            MondayIfSaturdayOrSunday => "Monday if Saturday or Sunday",
            FridayIfSaturdayOrSunday => "Friday if Saturday or Sunday",
            MondayIfSundayFridayIfSaturday => "Monday if Sunday, Friday if Saturday",
            ObserveOnFollowing => "observed on the following day",
            _ => return Ok(()),
        };

        write!(f, " ({shift})")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for RecurringYearlyRule {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let offset_type = OffsetType::try_from(1 + u8::arbitrary(g) % 6).unwrap_or(OffsetType::WeekdayFirstAfter);
        let month = 1 + u8::arbitrary(g) % 12;
        let day = 1 + u8::arbitrary(g) % days_in_month(1999, month);

        Self::new_unchecked(offset_type, month, day, u8::arbitrary(g) % 24, u8::arbitrary(g) % 60, u8::arbitrary(g) % 60, u8::arbitrary(g) % 7)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;

    use quickcheck::Arbitrary;

    #[test]
    fn test_weekday_rules() -> Result<()> {
        let to_daylight = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 8, 2, 0, 0)?;
        assert_eq!(to_daylight.pertinent_for_year(2024)?, Time::new(2024, 3, 10, 2, 0, 0)?);
        assert_eq!(to_daylight.pertinent_for_year(2023)?, Time::new(2023, 3, 12, 2, 0, 0)?);
        assert_eq!(to_daylight.pertinent(&Time::new(2025, 7, 1, 0, 0, 0)?)?, Time::new(2025, 3, 9, 2, 0, 0)?);

        let first_sunday_of_march = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 1, 2, 0, 0)?;
        assert_eq!(first_sunday_of_march.pertinent_for_year(2024)?, Time::new(2024, 3, 3, 2, 0, 0)?);

        let to_standard = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 11, 1, 2, 0, 0)?;
        assert_eq!(to_standard.pertinent_for_year(2024)?, Time::new(2024, 11, 3, 2, 0, 0)?);

        let second = RecurringYearlyRule::on_weekday(OffsetType::WeekdaySecondAfter, 3, 1, 2, 0, 0)?;
        assert_eq!(second.pertinent_for_year(2024)?, Time::new(2024, 3, 10, 2, 0, 0)?);

        let fourth = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFourthAfter, 11, 1, 0, 0, 4)?;
        assert_eq!(fourth.pertinent_for_year(2024)?, Time::new(2024, 11, 28, 0, 0, 0)?);

        let before = RecurringYearlyRule::on_weekday(OffsetType::WeekdayBefore, 11, 8, 0, 0, 0)?;
        assert_eq!(before.pertinent_for_year(2024)?, Time::new(2024, 11, 3, 0, 0, 0)?);

        Ok(())
    }

    #[test]
    fn test_last_weekday_clamps_to_month() -> Result<()> {
        let rule = RecurringYearlyRule::on_weekday(OffsetType::WeekdayLastAfter, 3, 1, 1, 0, 0)?;

        // Four weeks after the first Sunday stays in March
        assert_eq!(rule.pertinent_for_year(2024)?, Time::new(2024, 3, 31, 1, 0, 0)?);
        // Four weeks after the first Sunday is in April
        assert_eq!(rule.pertinent_for_year(2023)?, Time::new(2023, 3, 26, 1, 0, 0)?);

        let rule = RecurringYearlyRule::on_weekday(OffsetType::WeekdayLastAfter, 10, 25, 1, 0, 0)?;
        assert_eq!(rule.pertinent_for_year(2024)?, Time::new(2024, 10, 27, 1, 0, 0)?);

        Ok(())
    }

    #[test]
    fn test_fixed_date_rules() -> Result<()> {
        let check = |offset_type, month, day, year, expected: (u8, u8)| -> Result<()> {
            let rule = RecurringYearlyRule::on_day(offset_type, month, day, 0, 0)?;
            assert_eq!(rule.pertinent_for_year(year)?, Time::new(year, expected.0, expected.1, 0, 0, 0)?, "{rule}");
            Ok(())
        };

        // 2020-07-04 is a Saturday, 2021-07-04 is a Sunday, 2022-07-04 is a Monday
        check(OffsetType::NoOffset, 7, 4, 2020, (7, 4))?;
        check(OffsetType::ObserveOnThisAndFollowing, 7, 4, 2020, (7, 4))?;
        check(OffsetType::ObserveOnFollowing, 7, 4, 2022, (7, 5))?;
        check(OffsetType::MondayIfSunday, 7, 4, 2021, (7, 5))?;
        check(OffsetType::MondayIfSunday, 7, 4, 2020, (7, 4))?;
        check(OffsetType::FridayIfSunday, 7, 4, 2021, (7, 2))?;
        check(OffsetType::MondayIfSaturday, 7, 4, 2020, (7, 6))?;
        check(OffsetType::MondayIfSaturday, 7, 4, 2021, (7, 4))?;
        check(OffsetType::FridayIfSaturday, 7, 4, 2020, (7, 3))?;
        check(OffsetType::MondayIfSaturdayOrSunday, 7, 4, 2020, (7, 6))?;
        check(OffsetType::MondayIfSaturdayOrSunday, 7, 4, 2021, (7, 5))?;
        check(OffsetType::FridayIfSaturdayOrSunday, 7, 4, 2020, (7, 3))?;
        check(OffsetType::FridayIfSaturdayOrSunday, 7, 4, 2021, (7, 2))?;
        check(OffsetType::MondayIfSundayFridayIfSaturday, 7, 4, 2020, (7, 3))?;
        check(OffsetType::MondayIfSundayFridayIfSaturday, 7, 4, 2021, (7, 5))?;
        check(OffsetType::MondayIfSundayFridayIfSaturday, 7, 4, 2022, (7, 4))?;
        check(OffsetType::MondayIfSunday, 12, 25, 2022, (12, 26))?;
        check(OffsetType::FridayIfSaturday, 12, 25, 2021, (12, 24))?;

        Ok(())
    }

    #[test]
    fn test_validation() {
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::WeekdayFirstAfter, 3, 1, 0, 0), Err(RuleError::ExpectedFixedDateOffsetType));
        assert_eq!(RecurringYearlyRule::on_weekday(OffsetType::MondayIfSunday, 3, 1, 0, 0, 0), Err(RuleError::ExpectedWeekdayOffsetType));
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::NoOffset, 2, 29, 0, 0), Err(RuleError::InvalidDayOfMonth));
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::NoOffset, 4, 31, 0, 0), Err(RuleError::InvalidDayOfMonth));
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::NoOffset, 13, 1, 0, 0), Err(RuleError::InvalidMonth));
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::NoOffset, 1, 0, 0, 0), Err(RuleError::InvalidDayOfMonth));
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::NoOffset, 1, 1, 24, 0), Err(RuleError::InvalidHours));
        assert_eq!(RecurringYearlyRule::on_day(OffsetType::NoOffset, 1, 1, 0, 60), Err(RuleError::InvalidMinutes));
        assert_eq!(RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 1, 1, 0, 0, 7), Err(RuleError::InvalidDayOfWeek));
        assert_eq!(RecurringYearlyRule::new_unchecked(OffsetType::NoOffset, 1, 1, 0, 0, 60, 0).check_is_valid(), Err(RuleError::InvalidSeconds));

        assert_eq!(OffsetType::try_from(15), Ok(OffsetType::ObserveOnFollowing));
        assert_eq!(OffsetType::try_from(16), Err(RuleError::InvalidOffsetType));

        let mut rule = RecurringYearlyRule::NULL;
        assert_eq!(rule.set_month(0), Err(RuleError::InvalidMonth));
        assert_eq!(rule.set_day_of_week(7), Err(RuleError::InvalidDayOfWeek));
        assert!(rule.is_null());
    }

    #[test]
    fn test_null() -> Result<()> {
        let mut rule = RecurringYearlyRule::default();
        assert!(rule.is_null());
        assert!(rule.check_is_valid().is_ok());
        assert!(matches!(rule.pertinent_for_year(2024), Err(TzError::NoValue)));
        assert!(matches!(rule.month(), Err(TzError::NoValue)));
        assert!(matches!(rule.offset_type(), Err(TzError::NoValue)));

        rule.set_month(1)?;
        rule.set_day_of_month(1)?;
        assert!(!rule.is_null());
        assert_eq!(rule.pertinent_for_year(2024)?, Time::new(2024, 1, 1, 0, 0, 0)?);
        assert!(rule.is_day_of_week_ignored()?);

        rule.set_to_null();
        assert!(rule.is_null());

        Ok(())
    }

    #[test]
    fn test_posix_rule_days() -> Result<()> {
        let rule = RecurringYearlyRule::from_month_week_day(3, 2, 0, 7200)?;
        assert_eq!(rule, RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 8, 2, 0, 0)?);

        let rule = RecurringYearlyRule::from_month_week_day(10, 5, 0, 3600)?;
        assert_eq!(rule.pertinent_for_year(2024)?, Time::new(2024, 10, 27, 1, 0, 0)?);

        let rule = RecurringYearlyRule::from_julian_day(60, 0)?;
        assert_eq!(rule, RecurringYearlyRule::on_day(OffsetType::NoOffset, 3, 1, 0, 0)?);
        assert_eq!(rule.pertinent_for_year(2024)?, Time::new(2024, 3, 1, 0, 0, 0)?);

        let rule = RecurringYearlyRule::from_julian_day(365, 0)?;
        assert_eq!(rule, RecurringYearlyRule::on_day(OffsetType::NoOffset, 12, 31, 0, 0)?);

        assert!(matches!(RecurringYearlyRule::from_month_week_day(3, 6, 0, 0), Err(TzStringError::InvalidRuleDay)));
        assert!(matches!(RecurringYearlyRule::from_month_week_day(3, 4, 4, 93600), Err(TzStringError::UnsupportedRuleTime)));
        assert!(matches!(RecurringYearlyRule::from_julian_day(0, 0), Err(TzStringError::InvalidRuleDay)));

        Ok(())
    }

    #[test]
    fn test_display() -> Result<()> {
        let rule = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 8, 2, 0, 0)?;
        assert_eq!(rule.to_string(), "first Sunday on or after March 8 at 02:00:00");

        let rule = RecurringYearlyRule::on_weekday(OffsetType::WeekdayLastAfter, 10, 1, 3, 0, 0)?;
        assert_eq!(rule.to_string(), "last Sunday of October at 03:00:00");

        let rule = RecurringYearlyRule::on_day(OffsetType::MondayIfSunday, 12, 25, 0, 0)?;
        assert_eq!(rule.to_string(), "December 25 at 00:00:00 (Monday if Sunday)");

        assert_eq!(RecurringYearlyRule::NULL.to_string(), "null");

        Ok(())
    }

    quickcheck::quickcheck! {
        fn prop_weekday_rule_lands_on_its_weekday(rule: RecurringYearlyRule, year: u8) -> bool {
            let year = 1971 + i32::from(year % 128);
            match rule.pertinent_for_year(year) {
                Ok(time) => time.week_day() == rule.weekday,
                Err(_) => false,
            }
        }

        fn prop_last_weekday_stays_in_month(rule: RecurringYearlyRule, year: u8) -> bool {
            let mut rule = rule;
            rule.set_offset_type(OffsetType::WeekdayLastAfter);
            let year = 1971 + i32::from(year % 128);
            match rule.pertinent_for_year(year) {
                Ok(time) => time.month() == rule.month && time.month_day() + 7 > days_in_month(year, rule.month),
                Err(_) => false,
            }
        }
    }

    #[test]
    fn test_arbitrary_rules_are_valid() {
        let mut g = quickcheck::Gen::new(64);
        for _ in 0..256 {
            assert!(RecurringYearlyRule::arbitrary(&mut g).check_is_valid().is_ok());
        }
    }
}
