//! Transition table: absolute offset changes, as read from a TZif file.

use super::TransitionSource;
use crate::datetime::Time;
use crate::error::{Result, TimeZoneError, TzError};
use crate::rule::RecurringYearlyRule;
use crate::timezone::is_dst_by_rules;

/// Transition into a local time type
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Transition {
    /// Unix time of the transition
    unix_time: i64,
    /// Index specifying the local time type of the transition
    local_time_type_index: usize,
}

impl Transition {
    /// Construct a transition
    pub fn new(unix_time: i64, local_time_type_index: usize) -> Self {
        Self { unix_time, local_time_type_index }
    }

    /// Returns Unix time of the transition
    pub fn unix_time(&self) -> i64 {
        self.unix_time
    }

    /// Returns local time type index
    pub fn local_time_type_index(&self) -> usize {
        self.local_time_type_index
    }
}

/// Local time type in force between two transitions
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LocalTimeType {
    /// Offset from UTC in seconds
    ut_offset: i32,
    /// Daylight Saving Time indicator
    is_dst: bool,
    /// Time zone designation
    designation: Option<String>,
}

impl LocalTimeType {
    /// Construct a local time type
    pub fn new(ut_offset: i32, is_dst: bool, designation: Option<&str>) -> Self {
        Self { ut_offset, is_dst, designation: designation.map(str::to_owned) }
    }

    /// Construct a standard local time type with the specified offset in seconds
    pub fn with_ut_offset(ut_offset: i32) -> Self {
        Self { ut_offset, is_dst: false, designation: None }
    }

    /// Returns offset from UTC in seconds
    pub fn ut_offset(&self) -> i32 {
        self.ut_offset
    }

    /// Returns daylight saving time indicator
    pub fn is_dst(&self) -> bool {
        self.is_dst
    }

    /// Returns time zone designation
    pub fn designation(&self) -> Option<&str> {
        self.designation.as_deref()
    }
}

/// Standard and DST local time types alternating by a pair of recurring yearly rules
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AlternateTime {
    /// Local time type for standard time
    std: LocalTimeType,
    /// Local time type for Daylight Saving Time
    dst: LocalTimeType,
    /// Switch to DST, in standard wall clock time
    dst_start: RecurringYearlyRule,
    /// Switch to standard time, in DST wall clock time
    dst_end: RecurringYearlyRule,
}

impl AlternateTime {
    /// Construct an alternate time
    pub fn new(std: LocalTimeType, dst: LocalTimeType, dst_start: RecurringYearlyRule, dst_end: RecurringYearlyRule) -> Self {
        Self { std, dst, dst_start, dst_end }
    }

    /// Returns local time type for standard time
    pub fn std(&self) -> &LocalTimeType {
        &self.std
    }

    /// Returns local time type for Daylight Saving Time
    pub fn dst(&self) -> &LocalTimeType {
        &self.dst
    }

    /// Returns the switch to DST
    pub fn dst_start(&self) -> &RecurringYearlyRule {
        &self.dst_start
    }

    /// Returns the switch to standard time
    pub fn dst_end(&self) -> &RecurringYearlyRule {
        &self.dst_end
    }

    fn find_local_time_type(&self, time: Time, is_utc: bool) -> Result<&LocalTimeType, TzError> {
        let daylight_offset = self.dst.ut_offset - self.std.ut_offset;

        if is_dst_by_rules(time, &self.dst_start, &self.dst_end, self.std.ut_offset, daylight_offset, is_utc)? {
            Ok(&self.dst)
        } else {
            Ok(&self.std)
        }
    }
}

/// Transition rule applicable after the last transition
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransitionRule {
    /// Fixed local time type
    Fixed(LocalTimeType),
    /// Alternate local time types
    Alternate(AlternateTime),
}

impl TransitionRule {
    fn find_local_time_type(&self, time: Time, is_utc: bool) -> Result<&LocalTimeType, TzError> {
        match self {
            Self::Fixed(local_time_type) => Ok(local_time_type),
            Self::Alternate(alternate_time) => alternate_time.find_local_time_type(time, is_utc),
        }
    }
}

/// Sorted list of absolute transitions into local time types, with an optional trailing rule
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransitionTable {
    /// Zone identity
    zone_id: String,
    /// List of transitions
    transitions: Vec<Transition>,
    /// List of local time types (cannot be empty)
    local_time_types: Vec<LocalTimeType>,
    /// Extra transition rule applicable after the last transition
    extra_rule: Option<TransitionRule>,
}

impl TransitionTable {
    /// Construct a transition table
    pub fn new(zone_id: impl Into<String>, transitions: Vec<Transition>, local_time_types: Vec<LocalTimeType>, extra_rule: Option<TransitionRule>) -> Result<Self, TimeZoneError> {
        if local_time_types.is_empty() {
            return Err(TimeZoneError::NoLocalTimeType);
        }

        let local_time_types_size = local_time_types.len();
        if !transitions.iter().all(|x| x.local_time_type_index < local_time_types_size) {
            return Err(TimeZoneError::InvalidLocalTimeTypeIndex);
        }

        if !transitions.windows(2).all(|x| x[0].unix_time < x[1].unix_time) {
            return Err(TimeZoneError::InvalidTransition);
        }

        // Transitions are compared to local times in the offset in force before them
        let mut offset_before = local_time_types[0].ut_offset;
        for transition in &transitions {
            if transition.unix_time.checked_add(offset_before.into()).is_none() {
                return Err(TimeZoneError::InvalidTransition);
            }
            offset_before = local_time_types[transition.local_time_type_index].ut_offset;
        }

        Ok(Self { zone_id: zone_id.into(), transitions, local_time_types, extra_rule })
    }

    /// Returns list of transitions
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns list of local time types
    pub fn local_time_types(&self) -> &[LocalTimeType] {
        &self.local_time_types
    }

    /// Returns extra transition rule applicable after the last transition
    pub fn extra_rule(&self) -> Option<&TransitionRule> {
        self.extra_rule.as_ref()
    }

    /// Find the local time type in force at a UTC instant
    pub fn find_local_time_type(&self, utc: Time) -> Result<&LocalTimeType, TzError> {
        let unix_time = utc.unix_time();

        match self.transitions.last() {
            None => match &self.extra_rule {
                Some(extra_rule) => extra_rule.find_local_time_type(utc, true),
                None => Ok(&self.local_time_types[0]),
            },
            Some(last_transition) if unix_time >= last_transition.unix_time => match &self.extra_rule {
                Some(extra_rule) => extra_rule.find_local_time_type(utc, true),
                None => Ok(&self.local_time_types[last_transition.local_time_type_index]),
            },
            _ => {
                let index = self.transitions.partition_point(|x| x.unix_time <= unix_time);
                Ok(self.local_time_type_before(index))
            }
        }
    }

    /// Find the local time type in force at a local wall clock time.
    ///
    /// A transition applies once the wall clock, still read with the offset in force before it, reaches the transition instant.
    /// A repeated hour at a backward switch therefore reads as the local time type in force before the switch.
    ///
    pub fn find_local_time_type_from_local(&self, local: Time) -> Result<&LocalTimeType, TzError> {
        let local_unix_time = local.unix_time();

        let applied = self
            .transitions
            .iter()
            .enumerate()
            .rev()
            .find(|(index, transition)| transition.unix_time + i64::from(self.local_time_type_before(*index).ut_offset) <= local_unix_time);

        match applied {
            Some((index, transition)) if index + 1 == self.transitions.len() => match &self.extra_rule {
                Some(extra_rule) => extra_rule.find_local_time_type(local, false),
                None => Ok(&self.local_time_types[transition.local_time_type_index]),
            },
            Some((_, transition)) => Ok(&self.local_time_types[transition.local_time_type_index]),
            None if self.transitions.is_empty() => match &self.extra_rule {
                Some(extra_rule) => extra_rule.find_local_time_type(local, false),
                None => Ok(&self.local_time_types[0]),
            },
            None => Ok(&self.local_time_types[0]),
        }
    }

    /// Returns the local time type in force before the transition at the specified index
    fn local_time_type_before(&self, index: usize) -> &LocalTimeType {
        match index.checked_sub(1) {
            Some(previous) => &self.local_time_types[self.transitions[previous].local_time_type_index],
            None => &self.local_time_types[0],
        }
    }

    fn find(&self, instant: Time, is_utc: bool) -> Result<&LocalTimeType, TzError> {
        if is_utc {
            self.find_local_time_type(instant)
        } else {
            self.find_local_time_type_from_local(instant)
        }
    }
}

impl TransitionSource for TransitionTable {
    fn zone_id(&self) -> &str {
        &self.zone_id
    }

    fn offset_seconds(&self, instant: Time, is_utc: bool) -> Result<i32> {
        Ok(self.find(instant, is_utc)?.ut_offset)
    }

    fn is_dst(&self, instant: Time, is_utc: bool) -> Result<bool> {
        Ok(self.find(instant, is_utc)?.is_dst)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rule::OffsetType;

    fn us_eastern_2024() -> Result<TransitionTable> {
        Ok(TransitionTable::new(
            "America/New_York",
            vec![
                Transition::new(Time::new(2024, 3, 10, 7, 0, 0)?.unix_time(), 1),
                Transition::new(Time::new(2024, 11, 3, 6, 0, 0)?.unix_time(), 0),
            ],
            vec![LocalTimeType::new(-18000, false, Some("EST")), LocalTimeType::new(-14400, true, Some("EDT"))],
            None,
        )?)
    }

    #[test]
    fn test_utc_lookup() -> Result<()> {
        let table = TransitionTable::new(
            "Pacific/Honolulu",
            vec![
                Transition::new(-2334101314, 1),
                Transition::new(-1157283000, 2),
                Transition::new(-1155436200, 1),
                Transition::new(-880198200, 3),
                Transition::new(-769395600, 4),
                Transition::new(-765376200, 1),
                Transition::new(-712150200, 5),
            ],
            vec![
                LocalTimeType::new(-37886, false, Some("LMT")),
                LocalTimeType::new(-37800, false, Some("HST")),
                LocalTimeType::new(-34200, true, Some("HDT")),
                LocalTimeType::new(-34200, true, Some("HWT")),
                LocalTimeType::new(-34200, true, Some("HPT")),
                LocalTimeType::new(-36000, false, Some("HST")),
            ],
            Some(TransitionRule::Fixed(LocalTimeType::new(-36000, false, Some("HST")))),
        )?;

        assert_eq!(*table.find_local_time_type(Time::from_unix_time(-1156939200))?, LocalTimeType::new(-34200, true, Some("HDT")));
        assert_eq!(*table.find_local_time_type(Time::from_unix_time(1546300800))?, LocalTimeType::new(-36000, false, Some("HST")));
        assert_eq!(table.find_local_time_type(Time::from_unix_time(-3000000000))?.designation(), Some("LMT"));
        assert_eq!(table.offset_seconds(Time::from_unix_time(0), true)?, -36000);
        assert!(!table.is_dst(Time::from_unix_time(0), true)?);

        Ok(())
    }

    #[test]
    fn test_local_lookup() -> Result<()> {
        let table = us_eastern_2024()?;

        let local = |month, day, hour, minute, second| -> Result<bool> { Ok(table.is_dst(Time::new(2024, month, day, hour, minute, second)?, false)?) };

        assert!(!local(1, 1, 0, 0, 0)?);
        assert!(!local(3, 10, 1, 59, 59)?);
        assert!(local(3, 10, 2, 0, 0)?);
        assert!(local(7, 1, 0, 0, 0)?);
        // Repeated hour reads as DST
        assert!(local(11, 3, 1, 30, 0)?);
        assert!(local(11, 3, 1, 59, 59)?);
        assert!(!local(11, 3, 2, 0, 0)?);
        assert!(!local(12, 1, 0, 0, 0)?);

        assert_eq!(table.offset_seconds(Time::new(2024, 7, 1, 0, 0, 0)?, false)?, -14400);
        assert_eq!(table.offset_seconds(Time::new(2024, 3, 10, 6, 59, 59)?, true)?, -18000);
        assert_eq!(table.offset_seconds(Time::new(2024, 3, 10, 7, 0, 0)?, true)?, -14400);

        Ok(())
    }

    #[test]
    fn test_extra_rule() -> Result<()> {
        let dst_start = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 8, 2, 0, 0)?;
        let dst_end = RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 11, 1, 2, 0, 0)?;
        let std = LocalTimeType::new(-18000, false, Some("EST"));
        let dst = LocalTimeType::new(-14400, true, Some("EDT"));

        let table = TransitionTable::new(
            "EST5EDT",
            vec![Transition::new(Time::new(2024, 11, 3, 6, 0, 0)?.unix_time(), 0)],
            vec![std.clone(), dst.clone()],
            Some(TransitionRule::Alternate(AlternateTime::new(std, dst, dst_start, dst_end))),
        )?;

        assert!(!table.is_dst(Time::new(2024, 12, 1, 0, 0, 0)?, true)?);
        assert!(!table.is_dst(Time::new(2030, 1, 1, 0, 0, 0)?, true)?);
        assert!(table.is_dst(Time::new(2030, 7, 1, 0, 0, 0)?, true)?);
        assert!(!table.is_dst(Time::new(2030, 3, 10, 6, 59, 59)?, true)?);
        assert!(table.is_dst(Time::new(2030, 3, 10, 7, 0, 0)?, true)?);
        assert!(!table.is_dst(Time::new(2030, 3, 10, 1, 59, 59)?, false)?);
        assert!(table.is_dst(Time::new(2030, 3, 10, 2, 0, 0)?, false)?);

        Ok(())
    }

    #[test]
    fn test_invalid_table() {
        let types = || vec![LocalTimeType::with_ut_offset(0)];

        assert_eq!(TransitionTable::new("a", vec![], vec![], None), Err(TimeZoneError::NoLocalTimeType));
        assert_eq!(TransitionTable::new("a", vec![Transition::new(0, 1)], types(), None), Err(TimeZoneError::InvalidLocalTimeTypeIndex));
        assert_eq!(
            TransitionTable::new("a", vec![Transition::new(10, 0), Transition::new(10, 0)], types(), None),
            Err(TimeZoneError::InvalidTransition)
        );

        // Local time of the transition, in the offset in force before it, is out of range
        let types = vec![LocalTimeType::with_ut_offset(-3600), LocalTimeType::with_ut_offset(0)];
        assert_eq!(TransitionTable::new("a", vec![Transition::new(i64::MIN, 1)], types.clone(), None), Err(TimeZoneError::InvalidTransition));
        assert_eq!(
            TransitionTable::new("a", vec![Transition::new(0, 1), Transition::new(i64::MAX, 0)], vec![types[1].clone(), LocalTimeType::with_ut_offset(3600)], None),
            Err(TimeZoneError::InvalidTransition)
        );
    }

    #[test]
    fn test_extreme_transitions() -> Result<()> {
        let types = vec![LocalTimeType::with_ut_offset(3600), LocalTimeType::with_ut_offset(0)];
        let table = TransitionTable::new("a", vec![Transition::new(i64::MIN, 1)], types, None)?;

        assert!(!table.is_dst(Time::from_unix_time(0), false)?);
        assert_eq!(table.offset_seconds(Time::from_unix_time(0), false)?, 0);
        assert_eq!(table.offset_seconds(Time::from_unix_time(0), true)?, 0);

        Ok(())
    }
}
