//! Types related to a time zone.

mod current;
mod infer;
mod switch;

use crate::constants::*;
use crate::datetime::{Time, TimeSpan};
use crate::error::{Error, Result, TimeZoneError, TzError};
use crate::parse::{parse_posix_tz, parse_tz_file};
use crate::rule::{OffsetType, RecurringYearlyRule};
use crate::source::{TransitionRule, TransitionSource};
use crate::{mapping, system};

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Maximum number of 90 days steps done when looking for a standard time instant
const MAX_STANDARD_PROBES: usize = 8;

/// Returns `true` if the rule marks the absence of a switch for the year.
///
/// A January rule, either fixed on a date or relative to the first weekday of the month, never switches.
///
fn is_no_switch_rule(rule: &RecurringYearlyRule) -> Result<bool, TzError> {
    Ok(rule.month()? == 1 && matches!(rule.offset_type()?, OffsetType::NoOffset | OffsetType::WeekdayFirstAfter))
}

/// Check if DST is in effect at the specified time, for a pair of switch rules.
///
/// Switch rules are expressed in local wall clock time.
/// The switch to DST is read in standard time, and the switch to standard time is read in DST.
///
pub(crate) fn is_dst_by_rules(
    time: Time,
    to_daylight: &RecurringYearlyRule,
    to_standard: &RecurringYearlyRule,
    standard_offset: i32,
    daylight_offset: i32,
    is_utc: bool,
) -> Result<bool, TzError> {
    if daylight_offset == 0 || to_daylight.is_null() || to_standard.is_null() {
        return Ok(false);
    }

    let is_northern = (2..=6).contains(&to_daylight.month()?) || (6..=12).contains(&to_standard.month()?);

    let year = time.year();
    let year_start = Time::start_of_year(year);
    let year_end = Time::start_of_year(year + 1);

    let switch_to_daylight = if is_no_switch_rule(to_daylight)? {
        if is_northern {
            year_start
        } else {
            year_end
        }
    } else {
        let switch = to_daylight.pertinent_for_year(year)?;
        if is_utc {
            switch - TimeSpan::from_seconds(standard_offset.into())
        } else {
            switch
        }
    };

    let switch_to_standard = if is_no_switch_rule(to_standard)? {
        if is_northern {
            year_end
        } else {
            year_start
        }
    } else {
        let switch = to_standard.pertinent_for_year(year)?;
        if is_utc {
            switch - TimeSpan::from_seconds(i64::from(standard_offset) + i64::from(daylight_offset))
        } else {
            switch
        }
    };

    if is_northern {
        Ok(time >= switch_to_daylight && time < switch_to_standard)
    } else {
        Ok(time < switch_to_standard || time >= switch_to_daylight)
    }
}

fn check_standard_offset(standard_offset: i32) -> Result<(), TimeZoneError> {
    if standard_offset.abs() > MAX_STANDARD_OFFSET || standard_offset % OFFSET_GRANULARITY != 0 {
        return Err(TimeZoneError::InvalidStandardOffset);
    }
    Ok(())
}

fn check_daylight_offset(daylight_offset: i32) -> Result<(), TimeZoneError> {
    if daylight_offset.abs() > MAX_DAYLIGHT_OFFSET || daylight_offset % OFFSET_GRANULARITY != 0 {
        return Err(TimeZoneError::InvalidDaylightOffset);
    }
    Ok(())
}

/// Check that switch rules are both null or both set and valid
fn check_switch_rules(to_daylight: &RecurringYearlyRule, to_standard: &RecurringYearlyRule) -> Result<(), TzError> {
    if to_daylight.is_null() != to_standard.is_null() {
        return Err(TimeZoneError::IncompleteSwitchRules.into());
    }
    if !to_daylight.is_null() {
        to_daylight.check_is_valid()?;
        to_standard.check_is_valid()?;
    }
    Ok(())
}

/// Name of a fixed offset zone, like `UTC+05:30`
fn fixed_offset_name(ut_offset: i32) -> String {
    if ut_offset == 0 {
        return "UTC".to_owned();
    }

    let sign = if ut_offset < 0 { '-' } else { '+' };
    let minutes = i64::from(ut_offset).abs() / SECONDS_PER_MINUTE;
    format!("UTC{sign}{:02}:{:02}", minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// Time zone, either described by explicit offsets and switch rules or backed by a transition source.
///
/// When a transition source is attached, offset and DST queries are answered by the source,
/// and the offsets and switch rules of the zone are derived from it.
///
#[derive(Clone)]
pub struct TimeZone {
    /// Standard offset from UTC in seconds
    standard_offset: i32,
    /// Offset added to the standard offset during DST, in seconds
    daylight_offset: i32,
    standard_name: String,
    daylight_name: String,
    display_name: String,
    /// Switch to DST, in standard wall clock time
    to_daylight: RecurringYearlyRule,
    /// Switch to standard time, in DST wall clock time
    to_standard: RecurringYearlyRule,
    /// Transition source answering offset and DST queries
    source: Option<Arc<dyn TransitionSource>>,
    /// Set while the zone is unchanged since it was loaded from the zone database
    initialized_from_database: bool,
}

impl TimeZone {
    /// Returns UTC time zone
    pub fn utc() -> Self {
        Self {
            standard_offset: 0,
            daylight_offset: 0,
            standard_name: "UTC".to_owned(),
            daylight_name: String::new(),
            display_name: "UTC".to_owned(),
            to_daylight: RecurringYearlyRule::NULL,
            to_standard: RecurringYearlyRule::NULL,
            source: None,
            initialized_from_database: false,
        }
    }

    /// Returns time zone with fixed UTC offset in seconds
    pub fn fixed(ut_offset: i32) -> Result<Self, TimeZoneError> {
        Self::fixed_with_name(ut_offset, fixed_offset_name(ut_offset))
    }

    /// Returns named time zone with fixed UTC offset in seconds
    pub fn fixed_with_name(ut_offset: i32, name: impl Into<String>) -> Result<Self, TimeZoneError> {
        check_standard_offset(ut_offset)?;

        let name = name.into();
        Ok(Self { standard_offset: ut_offset, display_name: name.clone(), standard_name: name, ..Self::utc() })
    }

    /// Construct a time zone from offsets and switch rules.
    ///
    /// Switch rules must be both null, or both valid.
    ///
    pub fn with_rules(standard_offset: i32, daylight_offset: i32, to_daylight: RecurringYearlyRule, to_standard: RecurringYearlyRule) -> Result<Self, TzError> {
        Self::with_rules_and_names(standard_offset, daylight_offset, to_daylight, to_standard, "", "")
    }

    /// Construct a named time zone from offsets and switch rules
    pub fn with_rules_and_names(
        standard_offset: i32,
        daylight_offset: i32,
        to_daylight: RecurringYearlyRule,
        to_standard: RecurringYearlyRule,
        standard_name: impl Into<String>,
        daylight_name: impl Into<String>,
    ) -> Result<Self, TzError> {
        check_standard_offset(standard_offset)?;
        check_daylight_offset(daylight_offset)?;
        check_switch_rules(&to_daylight, &to_standard)?;

        let standard_name = standard_name.into();
        Ok(Self {
            standard_offset,
            daylight_offset,
            display_name: standard_name.clone(),
            standard_name,
            daylight_name: daylight_name.into(),
            to_daylight,
            to_standard,
            source: None,
            initialized_from_database: false,
        })
    }

    /// Construct a time zone backed by a transition source, deriving its offsets and switch rules from the current time
    pub fn from_source(source: Arc<dyn TransitionSource>) -> Result<Self> {
        Self::from_source_at(source, Time::now())
    }

    /// Construct a time zone backed by a transition source, deriving its offsets and switch rules from the specified UTC instant.
    ///
    /// Failures of the source are propagated unchanged.
    ///
    pub fn from_source_at(source: Arc<dyn TransitionSource>, anchor: Time) -> Result<Self> {
        let name = source.zone_id().to_owned();

        let mut time_zone = Self {
            standard_offset: 0,
            daylight_offset: 0,
            standard_name: name.clone(),
            daylight_name: String::new(),
            display_name: name,
            to_daylight: RecurringYearlyRule::NULL,
            to_standard: RecurringYearlyRule::NULL,
            source: Some(source),
            initialized_from_database: true,
        };

        time_zone.standard_offset = time_zone.standard_offset_for_time(anchor)?;
        time_zone.daylight_offset = time_zone.daylight_offset_for_year(anchor.year())?;

        let (to_daylight, to_standard) = time_zone.infer_switch_rules(anchor)?;
        time_zone.to_daylight = to_daylight;
        time_zone.to_standard = to_standard;

        debug!(
            "loaded time zone {}: standard offset {}s, daylight offset {}s, to daylight {}, to standard {}",
            time_zone.standard_name, time_zone.standard_offset, time_zone.daylight_offset, time_zone.to_daylight, time_zone.to_standard
        );

        Ok(time_zone)
    }

    /// Construct a time zone from the contents of a TZif file
    pub fn from_tz_data(zone_id: &str, bytes: &[u8]) -> Result<Self> {
        Self::from_source(Arc::new(parse_tz_file(zone_id, bytes)?))
    }

    /// Construct a time zone from a POSIX TZ string, as described in [the POSIX documentation of the `TZ` environment variable](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html).
    ///
    /// Offsets must be representable as time zone offsets, and rule times must be within a day.
    ///
    pub fn from_posix_tz(tz_string: &str) -> Result<Self> {
        let tz_string = tz_string.trim_matches(|c: char| c.is_ascii_whitespace());

        // TZ string extensions are not allowed
        let mut time_zone = match parse_posix_tz(tz_string.as_bytes(), false)? {
            TransitionRule::Fixed(local_time_type) => Self::fixed_with_name(local_time_type.ut_offset(), local_time_type.designation().unwrap_or_default())?,
            TransitionRule::Alternate(alternate_time) => {
                let std = alternate_time.std();
                let dst = alternate_time.dst();

                Self::with_rules_and_names(
                    std.ut_offset(),
                    dst.ut_offset() - std.ut_offset(),
                    *alternate_time.dst_start(),
                    *alternate_time.dst_end(),
                    std.designation().unwrap_or_default(),
                    dst.designation().unwrap_or_default(),
                )?
            }
        };

        time_zone.display_name = tz_string.to_owned();
        Ok(time_zone)
    }

    /// Construct a time zone by name.
    ///
    /// The name is resolved in order as:
    /// * an absolute path to a TZif file,
    /// * a Windows standard name mapped to its IANA identifier,
    /// * an IANA identifier, named after its Windows standard name if one exists,
    /// * a raw name of the zoneinfo directory,
    /// * a `GMT` or `UTC` name with an optional `±HH` suffix.
    ///
    /// An unknown name returns [`TzError::ZoneNotFound`], and an existing file with an invalid format returns a parse error.
    ///
    pub fn by_name(name: &str) -> Result<Self> {
        let path = Path::new(name);
        if path.is_absolute() {
            let bytes = system::read_tz_file(path)?;
            return Self::from_database(name, name, &bytes);
        }

        let (zone_id, standard_name) = match (mapping::standard_name_windows_to_iana(name), mapping::standard_name_iana_to_windows(name)) {
            (Some(iana), _) => (iana, name),
            (None, Some(windows)) => (name, windows),
            (None, None) => (name, name),
        };

        if let Some(bytes) = system::read_zoneinfo_file(zone_id)? {
            return Self::from_database(zone_id, standard_name, &bytes);
        }

        if let Some(ut_offset) = system::parse_gmt_name(name) {
            return Ok(Self::fixed_with_name(ut_offset, name)?);
        }

        Err(TzError::ZoneNotFound(name.to_owned()).into())
    }

    /// Returns local time zone.
    ///
    /// The `TZ` environment variable is honored first, either as a zone name or a POSIX TZ string.
    /// The system local time file is used otherwise.
    ///
    pub fn local() -> Result<Self> {
        if let Some(tz) = system::tz_env() {
            debug!("reading local time zone from TZ={tz}");

            return match tz.strip_prefix(':') {
                Some(name) => Self::by_name(name),
                None => Self::from_tz_env(&tz),
            };
        }

        let path = system::localtime_file().ok_or_else(|| TzError::ZoneNotFound("localtime".to_owned()))?;
        let zone_id = system::zone_id_from_localtime(path).unwrap_or_else(|| "localtime".to_owned());
        let standard_name = mapping::standard_name_iana_to_windows(&zone_id).unwrap_or(zone_id.as_str()).to_owned();

        Self::from_database(&zone_id, &standard_name, &system::read_tz_file(path)?)
    }

    /// Returns the sorted Windows standard names of the zones available in the system zone database
    pub fn all_time_zone_names() -> Vec<String> {
        system::available_windows_names()
    }

    /// Read a `TZ` value as a zone name, or as a POSIX TZ string if no zone has this name
    fn from_tz_env(tz: &str) -> Result<Self> {
        match Self::by_name(tz) {
            Err(Error::Tz(TzError::ZoneNotFound(_))) => Self::from_posix_tz(tz),
            result => result,
        }
    }

    fn from_database(zone_id: &str, standard_name: &str, bytes: &[u8]) -> Result<Self> {
        let mut time_zone = Self::from_tz_data(zone_id, bytes)?;
        time_zone.standard_name = standard_name.to_owned();
        time_zone.display_name = standard_name.to_owned();
        Ok(time_zone)
    }

    /// Returns the standard offset from UTC in seconds
    pub fn standard_offset(&self) -> i32 {
        self.standard_offset
    }

    /// Returns the offset added to the standard offset during DST, in seconds
    pub fn daylight_offset(&self) -> i32 {
        self.daylight_offset
    }

    /// Returns the standard time name
    pub fn standard_name(&self) -> &str {
        &self.standard_name
    }

    /// Returns the DST name
    pub fn daylight_name(&self) -> &str {
        &self.daylight_name
    }

    /// Returns the display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the switch to DST, in standard wall clock time
    pub fn to_daylight(&self) -> &RecurringYearlyRule {
        &self.to_daylight
    }

    /// Returns the switch to standard time, in DST wall clock time
    pub fn to_standard(&self) -> &RecurringYearlyRule {
        &self.to_standard
    }

    /// Returns the attached transition source
    pub fn transition_source(&self) -> Option<&Arc<dyn TransitionSource>> {
        self.source.as_ref()
    }

    /// Returns `true` if the zone is unchanged since it was loaded from the zone database
    pub fn is_initialized_from_database(&self) -> bool {
        self.initialized_from_database
    }

    /// Set the standard offset, in seconds.
    ///
    /// The offset must be within 13 hours of UTC, and a multiple of 5 minutes.
    ///
    pub fn set_standard_offset(&mut self, standard_offset: i32) -> Result<(), TimeZoneError> {
        check_standard_offset(standard_offset)?;
        self.standard_offset = standard_offset;
        self.initialized_from_database = false;
        Ok(())
    }

    /// Set the daylight offset, in seconds.
    ///
    /// The offset must be within 3 hours, and a multiple of 5 minutes.
    ///
    pub fn set_daylight_offset(&mut self, daylight_offset: i32) -> Result<(), TimeZoneError> {
        check_daylight_offset(daylight_offset)?;
        self.daylight_offset = daylight_offset;
        self.initialized_from_database = false;
        Ok(())
    }

    /// Set the standard time name
    pub fn set_standard_name(&mut self, standard_name: impl Into<String>) {
        self.standard_name = standard_name.into();
        self.initialized_from_database = false;
    }

    /// Set the DST name
    pub fn set_daylight_name(&mut self, daylight_name: impl Into<String>) {
        self.daylight_name = daylight_name.into();
        self.initialized_from_database = false;
    }

    /// Set the display name
    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
        self.initialized_from_database = false;
    }

    /// Set both switch rules, which must be both null, or both valid
    pub fn set_switch_times(&mut self, to_daylight: RecurringYearlyRule, to_standard: RecurringYearlyRule) -> Result<(), TzError> {
        check_switch_rules(&to_daylight, &to_standard)?;
        self.to_daylight = to_daylight;
        self.to_standard = to_standard;
        self.initialized_from_database = false;
        Ok(())
    }

    /// Detach the transition source, so that queries are answered by the explicit offsets and switch rules
    pub fn remove_transition_source(&mut self) {
        self.source = None;
        self.initialized_from_database = false;
    }

    /// Reset to an unnamed zone with a zero offset and no DST
    pub fn clear(&mut self) {
        *self = Self { standard_name: String::new(), display_name: String::new(), ..Self::utc() };
    }

    /// Check if DST is in effect at the specified time, read as UTC if `is_utc` is set, otherwise as local wall clock time
    pub fn is_dst(&self, time: Time, is_utc: bool) -> Result<bool> {
        match &self.source {
            Some(source) => source.is_dst(time, is_utc),
            None => Ok(is_dst_by_rules(time, &self.to_daylight, &self.to_standard, self.standard_offset, self.daylight_offset, is_utc)?),
        }
    }

    /// Returns the offset in seconds to add to a UTC time to get the local time
    pub fn utc_to_local_offset(&self, utc: Time) -> Result<i32> {
        match &self.source {
            Some(source) => source.offset_seconds(utc, true),
            None => {
                let mut offset = self.standard_offset;
                if self.is_dst(utc, true)? {
                    offset += self.daylight_offset;
                }
                Ok(offset)
            }
        }
    }

    /// Returns the offset in seconds to add to a local time to get the UTC time
    pub fn local_to_utc_offset(&self, local: Time) -> Result<i32> {
        match &self.source {
            Some(source) => Ok(-source.offset_seconds(local, false)?),
            None => {
                let mut offset = -self.standard_offset;
                if self.is_dst(local, false)? {
                    offset -= self.daylight_offset;
                }
                Ok(offset)
            }
        }
    }

    /// Returns the standard offset in force at the specified UTC time.
    ///
    /// Instants in DST are moved forward by steps of 90 days until standard time is reached.
    ///
    pub fn standard_offset_for_time(&self, utc: Time) -> Result<i32> {
        let mut time = utc;
        for _ in 0..MAX_STANDARD_PROBES {
            if !self.is_dst(time, true)? {
                break;
            }
            time += TimeSpan::from_days(90);
        }
        self.utc_to_local_offset(time)
    }

    /// Returns the daylight offset in force during the specified year, or zero if DST is not observed
    pub fn daylight_offset_for_year(&self, year: i32) -> Result<i32> {
        let january = Time::from_civil(year, 1, 1, 0, 0, 0);
        let july = Time::from_civil(year, 7, 1, 0, 0, 0);

        let mut offset_1 = self.utc_to_local_offset(january)?;
        let mut is_dst_1 = self.is_dst(january, true)?;
        let offset_2 = self.utc_to_local_offset(july)?;
        let is_dst_2 = self.is_dst(july, true)?;

        if offset_1 == offset_2 {
            // Switches may be late in the year
            let end_of_year = Time::from_civil(year, 12, 25, 0, 0, 0);
            offset_1 = self.utc_to_local_offset(end_of_year)?;
            if !is_dst_1 {
                is_dst_1 = self.is_dst(end_of_year, true)?;
            }
        }

        if !is_dst_1 && !is_dst_2 {
            return Ok(0);
        }
        Ok((offset_1 - offset_2).abs())
    }

    /// Convert a UTC time to local wall clock time
    pub fn utc_to_local(&self, utc: Time) -> Result<Time> {
        Ok(utc + TimeSpan::from_seconds(self.utc_to_local_offset(utc)?.into()))
    }

    /// Convert a local wall clock time to UTC.
    ///
    /// A local time in the repeated hour after the switch to standard time is read as DST.
    ///
    pub fn local_to_utc(&self, local: Time) -> Result<Time> {
        Ok(local + TimeSpan::from_seconds(self.local_to_utc_offset(local)?.into()))
    }

    /// Convert a UTC time to standard time, ignoring DST
    pub fn utc_to_standard(&self, utc: Time) -> Result<Time> {
        Ok(utc + TimeSpan::from_seconds(self.standard_offset_for_time(utc)?.into()))
    }

    /// Convert a standard time to UTC
    pub fn standard_to_utc(&self, standard: Time) -> Result<Time> {
        Ok(standard - TimeSpan::from_seconds(self.standard_offset_for_time(standard)?.into()))
    }

    /// Convert a standard time to local wall clock time
    pub fn standard_to_local(&self, standard: Time) -> Result<Time> {
        self.utc_to_local(self.standard_to_utc(standard)?)
    }

    /// Convert a local wall clock time to standard time
    pub fn local_to_standard(&self, local: Time) -> Result<Time> {
        self.utc_to_standard(self.local_to_utc(local)?)
    }

    /// Returns the current UTC time
    pub fn utc_time() -> Time {
        Time::now()
    }

    /// Returns the current local time
    pub fn local_time(&self) -> Result<Time> {
        self.utc_to_local(Time::now())
    }

    /// Returns the current local standard time
    pub fn standard_time(&self) -> Result<Time> {
        self.utc_to_standard(Time::now())
    }

    /// Returns `true` if DST is observed.
    ///
    /// For a zone backed by a transition source, DST is looked for in the next two years.
    ///
    pub fn supports_dst(&self) -> Result<bool> {
        self.supports_dst_after(Time::now())
    }

    /// Returns `true` if DST is observed within two years after the specified UTC instant
    pub fn supports_dst_after(&self, anchor: Time) -> Result<bool> {
        match &self.source {
            Some(source) => {
                let mut time = anchor;
                for _ in 0..25 {
                    if source.is_dst(time, true)? {
                        return Ok(true);
                    }
                    time += TimeSpan::from_days(32);
                }
                Ok(false)
            }
            None => Ok(self.daylight_offset != 0 && !self.to_daylight.is_null() && !self.to_standard.is_null()),
        }
    }

    /// Returns `true` if the zone has switch times
    pub fn has_switch_times(&self) -> Result<bool> {
        match &self.source {
            Some(_) => Ok(self.next_switch_time(Time::from_civil(2000, 1, 1, 0, 0, 0), true)?.is_some()),
            None => Ok(!self.to_daylight.is_null() && !self.to_standard.is_null()),
        }
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TimeZone")
            .field("standard_offset", &self.standard_offset)
            .field("daylight_offset", &self.daylight_offset)
            .field("standard_name", &self.standard_name)
            .field("daylight_name", &self.daylight_name)
            .field("display_name", &self.display_name)
            .field("to_daylight", &self.to_daylight)
            .field("to_standard", &self.to_standard)
            .field("source", &self.source.as_ref().map(|source| source.zone_id()))
            .field("initialized_from_database", &self.initialized_from_database)
            .finish()
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &Self) -> bool {
        if self.standard_name != other.standard_name
            || self.daylight_name != other.daylight_name
            || self.display_name != other.display_name
            || self.standard_offset != other.standard_offset
            || self.daylight_offset != other.daylight_offset
        {
            return false;
        }

        match (&self.source, &other.source) {
            (Some(x), Some(y)) => x.zone_id() == y.zone_id(),
            (None, None) => self.to_daylight == other.to_daylight && self.to_standard == other.to_standard,
            _ => false,
        }
    }
}

impl Eq for TimeZone {}
