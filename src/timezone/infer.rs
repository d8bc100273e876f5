//! Inference of recurring yearly switch rules from observed switch instants.

use super::TimeZone;
use crate::datetime::{Time, TimeSpan};
use crate::error::Result;
use crate::rule::{OffsetType, RecurringYearlyRule};

/// Minimum distance between the two switches of a year
const MIN_SWITCH_INTERVAL: TimeSpan = TimeSpan::from_days(32);
/// Distance before a candidate switch where the verification search starts
const VERIFICATION_LEAD: TimeSpan = TimeSpan::from_days(30);
/// Number of consecutive years a candidate rule must match
const VERIFICATION_YEARS: i32 = 6;

/// Weekday based offset types, tried in order.
///
/// Candidates are anchored on the first day of the week containing the switch,
/// so a later weekday occurrence never lands on the switch itself.
///
const WEEKDAY_OFFSET_TYPES: [OffsetType; 2] = [OffsetType::WeekdayLastAfter, OffsetType::WeekdayFirstAfter];

impl TimeZone {
    /// Infer the switch rules to DST and to standard time, from the two next switches in local time after the anchor.
    ///
    /// Null rules are returned if the zone does not switch, or if no recurring rule matches its switches.
    ///
    pub fn infer_switch_rules(&self, anchor: Time) -> Result<(RecurringYearlyRule, RecurringYearlyRule)> {
        const NO_RULES: (RecurringYearlyRule, RecurringYearlyRule) = (RecurringYearlyRule::NULL, RecurringYearlyRule::NULL);

        let Some(switch_1) = self.next_switch_time(anchor, false)? else {
            return Ok(NO_RULES);
        };
        let Some(switch_2) = self.next_switch_time(switch_1 + MIN_SWITCH_INTERVAL, false)? else {
            return Ok(NO_RULES);
        };

        let rule_1 = self.infer_rule(switch_1)?;
        let rule_2 = self.infer_rule(switch_2)?;
        if rule_1.is_null() || rule_2.is_null() {
            debug!("no recurring rule matches switches at {switch_1} and {switch_2}");
            return Ok(NO_RULES);
        }

        // Local to UTC offset decreases when entering DST
        let change_1 = self.switch_time_offset_change(switch_1, false)?;
        let change_2 = self.switch_time_offset_change(switch_2, false)?;

        if change_1 < 0 && change_2 > 0 {
            Ok((rule_1, rule_2))
        } else if change_1 > 0 && change_2 < 0 {
            Ok((rule_2, rule_1))
        } else {
            debug!("switches at {switch_1} and {switch_2} do not alternate DST and standard time");
            Ok(NO_RULES)
        }
    }

    /// Find a recurring rule matching the switch for the following years, or a null rule
    fn infer_rule(&self, switch: Time) -> Result<RecurringYearlyRule> {
        let (month, month_day, week_day) = (switch.month(), switch.month_day(), switch.week_day());
        let (hours, minutes, seconds) = (switch.hour(), switch.minute(), switch.second());

        // First day of the week of the month containing the switch
        let week_start_day = (month_day - 1) / 7 * 7 + 1;

        for offset_type in WEEKDAY_OFFSET_TYPES {
            let day = if offset_type == OffsetType::WeekdayLastAfter { 1 } else { week_start_day };
            let rule = RecurringYearlyRule::new_unchecked(offset_type, month, day, hours, minutes, seconds, week_day);

            if self.matches_switches(&rule, switch.year())? {
                return Ok(rule);
            }
        }

        let is_new_year = month == 1 && month_day == 1 && hours == 0 && minutes == 0;
        let rule = RecurringYearlyRule::new_unchecked(OffsetType::NoOffset, month, month_day, hours, minutes, seconds, 0);

        if !is_new_year && rule.check_is_valid().is_ok() && self.matches_switches(&rule, switch.year())? {
            return Ok(rule);
        }

        Ok(RecurringYearlyRule::NULL)
    }

    /// Check that the rule gives the real local switch for consecutive years
    fn matches_switches(&self, rule: &RecurringYearlyRule, first_year: i32) -> Result<bool> {
        for year in first_year..first_year + VERIFICATION_YEARS {
            let candidate = rule.pertinent_for_year(year)?;
            let real = self.next_switch_time(candidate - VERIFICATION_LEAD, false)?;

            if real != Some(candidate) {
                trace!("rule {rule} gives {candidate} in {year}, but the switch is at {real:?}");
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::{LocalTimeType, Transition, TransitionTable};

    use std::sync::Arc;

    /// Returns the day of the nth weekday of a month, counted from the first day
    fn nth_weekday(year: i32, month: u8, week_day: u8, nth: u8) -> Result<u8> {
        let mut count = 0;
        for day in 1..=28 {
            if Time::new(year, month, day, 0, 0, 0)?.week_day() == week_day {
                count += 1;
                if count == nth {
                    return Ok(day);
                }
            }
        }
        unreachable!()
    }

    /// Returns the day of the last weekday of a month
    fn last_weekday(year: i32, month: u8, week_day: u8) -> Result<u8> {
        let mut last = 0;
        for day in 1..=crate::datetime::days_in_month(year, month) {
            if Time::new(year, month, day, 0, 0, 0)?.week_day() == week_day {
                last = day;
            }
        }
        Ok(last)
    }

    /// Transition table alternating between a standard and a DST local time type at the specified UTC instants
    fn table(zone_id: &str, std: LocalTimeType, dst: LocalTimeType, switches: &[(Time, bool)]) -> Result<TransitionTable> {
        let transitions = switches.iter().map(|&(time, to_dst)| Transition::new(time.unix_time(), usize::from(to_dst))).collect();
        Ok(TransitionTable::new(zone_id, transitions, vec![std, dst], None)?)
    }

    fn us_eastern_table() -> Result<TransitionTable> {
        let mut switches = Vec::new();
        for year in 1990..=2035 {
            // 02:00 EST and 02:00 EDT
            switches.push((Time::new(year, 3, nth_weekday(year, 3, 0, 2)?, 7, 0, 0)?, true));
            switches.push((Time::new(year, 11, nth_weekday(year, 11, 0, 1)?, 6, 0, 0)?, false));
        }
        table("America/New_York", LocalTimeType::new(-18000, false, Some("EST")), LocalTimeType::new(-14400, true, Some("EDT")), &switches)
    }

    fn central_europe_table() -> Result<TransitionTable> {
        let mut switches = Vec::new();
        for year in 2020..=2035 {
            // 01:00 UTC
            switches.push((Time::new(year, 3, last_weekday(year, 3, 0)?, 1, 0, 0)?, true));
            switches.push((Time::new(year, 10, last_weekday(year, 10, 0)?, 1, 0, 0)?, false));
        }
        table("Europe/Berlin", LocalTimeType::new(3600, false, Some("CET")), LocalTimeType::new(7200, true, Some("CEST")), &switches)
    }

    fn australia_eastern_table() -> Result<TransitionTable> {
        let mut switches = Vec::new();
        for year in 2020..=2035 {
            // 03:00 AEDT and 02:00 AEST, on the previous UTC day
            switches.push((Time::new(year, 4, nth_weekday(year, 4, 0, 1)?, 0, 0, 0)? - TimeSpan::from_hours(8), false));
            switches.push((Time::new(year, 10, nth_weekday(year, 10, 0, 1)?, 0, 0, 0)? - TimeSpan::from_hours(8), true));
        }
        table("Australia/Sydney", LocalTimeType::new(36000, false, Some("AEST")), LocalTimeType::new(39600, true, Some("AEDT")), &switches)
    }

    fn fixed_date_table() -> Result<TransitionTable> {
        let mut switches = Vec::new();
        for year in 2020..=2035 {
            // March 22 and September 22 at 00:00 local time
            switches.push((Time::new(year, 3, 21, 20, 30, 0)?, true));
            switches.push((Time::new(year, 9, 21, 19, 30, 0)?, false));
        }
        table("Asia/Tehran", LocalTimeType::new(12600, false, Some("+0330")), LocalTimeType::new(16200, true, Some("+0430")), &switches)
    }

    #[test]
    fn test_infer_us_rules() -> Result<()> {
        let time_zone = TimeZone::from_source_at(Arc::new(us_eastern_table()?), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        assert_eq!(time_zone.standard_offset(), -18000);
        assert_eq!(time_zone.daylight_offset(), 3600);
        assert_eq!(time_zone.standard_name(), "America/New_York");
        assert!(time_zone.is_initialized_from_database());

        assert_eq!(*time_zone.to_daylight(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 8, 2, 0, 0)?);
        assert_eq!(*time_zone.to_standard(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 11, 1, 2, 0, 0)?);

        assert!(time_zone.supports_dst_after(Time::new(2024, 1, 15, 0, 0, 0)?)?);
        assert!(time_zone.has_switch_times()?);

        Ok(())
    }

    #[test]
    fn test_infer_european_rules() -> Result<()> {
        let time_zone = TimeZone::from_source_at(Arc::new(central_europe_table()?), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        assert_eq!(time_zone.standard_offset(), 3600);
        assert_eq!(time_zone.daylight_offset(), 3600);
        assert_eq!(*time_zone.to_daylight(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayLastAfter, 3, 1, 2, 0, 0)?);
        assert_eq!(*time_zone.to_standard(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayLastAfter, 10, 1, 3, 0, 0)?);

        Ok(())
    }

    #[test]
    fn test_infer_southern_rules() -> Result<()> {
        let time_zone = TimeZone::from_source_at(Arc::new(australia_eastern_table()?), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        assert_eq!(time_zone.standard_offset(), 36000);
        assert_eq!(time_zone.daylight_offset(), 3600);
        assert_eq!(*time_zone.to_daylight(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 10, 1, 2, 0, 0)?);
        assert_eq!(*time_zone.to_standard(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 4, 1, 3, 0, 0)?);

        Ok(())
    }

    #[test]
    fn test_infer_later_weekday_rules() -> Result<()> {
        let mut switches = Vec::new();
        for year in 2020..=2035 {
            // Third and fourth Sundays at 01:00 UTC
            switches.push((Time::new(year, 3, nth_weekday(year, 3, 0, 3)?, 1, 0, 0)?, true));
            switches.push((Time::new(year, 10, nth_weekday(year, 10, 0, 4)?, 1, 0, 0)?, false));
        }
        let table = table("Atlantic/Synthetic", LocalTimeType::new(0, false, Some("GMT")), LocalTimeType::new(3600, true, Some("BST")), &switches)?;
        let time_zone = TimeZone::from_source_at(Arc::new(table), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        // The fourth Sunday of October is not always the last one
        assert_eq!(*time_zone.to_daylight(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 3, 15, 1, 0, 0)?);
        assert_eq!(*time_zone.to_standard(), RecurringYearlyRule::on_weekday(OffsetType::WeekdayFirstAfter, 10, 22, 2, 0, 0)?);

        Ok(())
    }

    #[test]
    fn test_infer_fixed_date_rules() -> Result<()> {
        let time_zone = TimeZone::from_source_at(Arc::new(fixed_date_table()?), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        assert_eq!(*time_zone.to_daylight(), RecurringYearlyRule::on_day(OffsetType::NoOffset, 3, 22, 0, 0)?);
        assert_eq!(*time_zone.to_standard(), RecurringYearlyRule::on_day(OffsetType::NoOffset, 9, 22, 0, 0)?);

        Ok(())
    }

    #[test]
    fn test_inferred_rules_agree_with_source() -> Result<()> {
        let source = Arc::new(us_eastern_table()?);
        let time_zone = TimeZone::from_source_at(source.clone(), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        let mut detached = time_zone.clone();
        detached.remove_transition_source();

        let mut time = Time::new(2024, 1, 1, 0, 30, 0)?;
        while time < Time::new(2030, 1, 1, 0, 0, 0)? {
            assert_eq!(detached.is_dst(time, true)?, time_zone.is_dst(time, true)?, "{time}");
            time += TimeSpan::from_hours(7);
        }

        Ok(())
    }

    #[test]
    fn test_no_rules_without_switches() -> Result<()> {
        let source = TransitionTable::new("Asia/Kolkata", vec![], vec![LocalTimeType::new(19800, false, Some("IST"))], None)?;
        let time_zone = TimeZone::from_source_at(Arc::new(source), Time::new(2024, 1, 15, 0, 0, 0)?)?;

        assert_eq!(time_zone.standard_offset(), 19800);
        assert_eq!(time_zone.daylight_offset(), 0);
        assert!(time_zone.to_daylight().is_null());
        assert!(time_zone.to_standard().is_null());
        assert!(!time_zone.supports_dst_after(Time::new(2024, 1, 15, 0, 0, 0)?)?);
        assert!(!time_zone.has_switch_times()?);

        Ok(())
    }

    #[test]
    fn test_no_rules_after_last_switch() -> Result<()> {
        // Table ends in standard time in November 2035
        let time_zone = TimeZone::from_source_at(Arc::new(us_eastern_table()?), Time::new(2036, 1, 15, 0, 0, 0)?)?;

        assert!(time_zone.to_daylight().is_null());
        assert!(time_zone.to_standard().is_null());
        assert_eq!(time_zone.standard_offset(), -18000);

        Ok(())
    }
}
