//! Functions used for parsing a TZif file.

use super::tz_string::parse_posix_tz;
use super::utils::Cursor;
use crate::error::{ParseDataError, TzError, TzFileError, TzStringError};
use crate::source::{LocalTimeType, Transition, TransitionRule, TransitionTable};

use std::iter;
use std::str;

/// TZif version
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Version {
    /// Version 1
    V1,
    /// Version 2
    V2,
    /// Version 3
    V3,
}

/// TZif header
#[derive(Debug)]
struct Header {
    /// TZif version
    version: Version,
    /// Number of UT/local indicators
    ut_local_count: usize,
    /// Number of standard/wall indicators
    std_wall_count: usize,
    /// Number of leap-second records
    leap_count: usize,
    /// Number of transition times
    transition_count: usize,
    /// Number of local time type records
    type_count: usize,
    /// Number of time zone designations bytes
    char_count: usize,
}

/// Parse TZif header
fn parse_header(cursor: &mut Cursor<'_>) -> Result<Header, TzFileError> {
    if cursor.read_exact(4)? != b"TZif" {
        return Err(TzFileError::InvalidMagicNumber);
    }

    let version = match cursor.read_exact(1)? {
        [0x00] => Version::V1,
        [0x32] => Version::V2,
        [0x33] => Version::V3,
        _ => return Err(TzFileError::UnsupportedTzFileVersion),
    };

    cursor.read_exact(15)?;

    let ut_local_count = cursor.read_be_u32()?;
    let std_wall_count = cursor.read_be_u32()?;
    let leap_count = cursor.read_be_u32()?;
    let transition_count = cursor.read_be_u32()?;
    let type_count = cursor.read_be_u32()?;
    let char_count = cursor.read_be_u32()?;

    if !(type_count != 0 && char_count != 0 && (ut_local_count == 0 || ut_local_count == type_count) && (std_wall_count == 0 || std_wall_count == type_count)) {
        return Err(TzFileError::InvalidHeader);
    }

    Ok(Header {
        version,
        ut_local_count: ut_local_count as usize,
        std_wall_count: std_wall_count as usize,
        leap_count: leap_count as usize,
        transition_count: transition_count as usize,
        type_count: type_count as usize,
        char_count: char_count as usize,
    })
}

/// Parse TZif footer.
///
/// A footer rule without recurring yearly rule equivalent is ignored.
///
fn parse_footer(footer: &[u8], use_string_extensions: bool) -> Result<Option<TransitionRule>, TzError> {
    let footer = str::from_utf8(footer).map_err(TzFileError::from)?;
    if !(footer.starts_with('\n') && footer.ends_with('\n')) {
        return Err(TzFileError::InvalidFooter.into());
    }

    let tz_string = footer.trim_matches(|c: char| c.is_ascii_whitespace());
    if tz_string.starts_with(':') || tz_string.contains('\0') {
        return Err(TzFileError::InvalidFooter.into());
    }

    if tz_string.is_empty() {
        return Ok(None);
    }

    match parse_posix_tz(tz_string.as_bytes(), use_string_extensions) {
        Ok(rule) => Ok(Some(rule)),
        Err(_error @ (TzStringError::UnsupportedRuleDay | TzStringError::UnsupportedRuleTime)) => {
            debug!("ignoring TZif footer '{tz_string}': {_error}");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

/// TZif data blocks
struct DataBlocks<'a, const TIME_SIZE: usize> {
    /// Transition times data block
    transition_times: &'a [u8],
    /// Transition types data block
    transition_types: &'a [u8],
    /// Local time types data block
    local_time_types: &'a [u8],
    /// Time zone designations data block
    time_zone_designations: &'a [u8],
    /// Leap seconds data block
    leap_seconds: &'a [u8],
    /// Standard/wall indicators data block
    std_walls: &'a [u8],
    /// UT/local indicators data block
    ut_locals: &'a [u8],
}

/// Read TZif data blocks
fn read_data_blocks<'a, const TIME_SIZE: usize>(cursor: &mut Cursor<'a>, header: &Header) -> Result<DataBlocks<'a, TIME_SIZE>, TzFileError> {
    Ok(DataBlocks {
        transition_times: cursor.read_exact(header.transition_count * TIME_SIZE)?,
        transition_types: cursor.read_exact(header.transition_count)?,
        local_time_types: cursor.read_exact(header.type_count * 6)?,
        time_zone_designations: cursor.read_exact(header.char_count)?,
        leap_seconds: cursor.read_exact(header.leap_count * (TIME_SIZE + 4))?,
        std_walls: cursor.read_exact(header.std_wall_count)?,
        ut_locals: cursor.read_exact(header.ut_local_count)?,
    })
}

trait ParseTime {
    type TimeData;

    fn parse_time(&self, data: &Self::TimeData) -> i64;
}

impl ParseTime for DataBlocks<'_, 4> {
    type TimeData = [u8; 4];

    fn parse_time(&self, data: &Self::TimeData) -> i64 {
        i32::from_be_bytes(*data).into()
    }
}

impl ParseTime for DataBlocks<'_, 8> {
    type TimeData = [u8; 8];

    fn parse_time(&self, data: &Self::TimeData) -> i64 {
        i64::from_be_bytes(*data)
    }
}

impl<'a, const TIME_SIZE: usize> DataBlocks<'a, TIME_SIZE>
where
    DataBlocks<'a, TIME_SIZE>: ParseTime<TimeData = [u8; TIME_SIZE]>,
{
    /// Parse time zone data into a transition table
    fn parse(&self, zone_id: &str, header: &Header, footer: Option<&[u8]>) -> Result<TransitionTable, TzError> {
        // Leap second records as (Unix leap time, correction)
        let mut leap_seconds = Vec::with_capacity(header.leap_count);
        for data in self.leap_seconds.chunks_exact(TIME_SIZE + 4) {
            let Some((time_data, tail)) = data.split_first_chunk::<TIME_SIZE>() else { continue };
            let Some(correction_data) = tail.first_chunk::<4>() else { continue };

            leap_seconds.push((self.parse_time(time_data), i32::from_be_bytes(*correction_data)));
        }

        let mut transitions = Vec::with_capacity(header.transition_count);
        for (time_data, &local_time_type_index) in self.transition_times.chunks_exact(TIME_SIZE).zip(self.transition_types) {
            let Some(time_data) = time_data.first_chunk::<TIME_SIZE>() else { continue };

            let unix_time = unix_leap_time_to_unix_time(&leap_seconds, self.parse_time(time_data))?;
            transitions.push(Transition::new(unix_time, local_time_type_index.into()));
        }

        let mut local_time_types = Vec::with_capacity(header.type_count);
        for data in self.local_time_types.chunks_exact(6) {
            let &[d0, d1, d2, d3, d4, d5] = data else { continue };

            let ut_offset = i32::from_be_bytes([d0, d1, d2, d3]);

            let is_dst = match d4 {
                0 => false,
                1 => true,
                _ => return Err(TzFileError::InvalidDstIndicator.into()),
            };

            let char_index = usize::from(d5);
            let designations = self.time_zone_designations.get(char_index..).ok_or(TzFileError::InvalidTimeZoneDesignationCharIndex)?;

            let designation = match designations.iter().position(|&c| c == b'\0') {
                None => return Err(TzFileError::InvalidTimeZoneDesignationCharIndex.into()),
                Some(0) => None,
                Some(position) => Some(str::from_utf8(&designations[..position]).map_err(TzFileError::from)?),
            };

            local_time_types.push(LocalTimeType::new(ut_offset, is_dst, designation));
        }

        let std_walls_iter = self.std_walls.iter().copied().chain(iter::repeat(0));
        let ut_locals_iter = self.ut_locals.iter().copied().chain(iter::repeat(0));
        for (std_wall, ut_local) in std_walls_iter.zip(ut_locals_iter).take(header.type_count) {
            if !matches!((std_wall, ut_local), (0, 0) | (1, 0) | (1, 1)) {
                return Err(TzFileError::InvalidStdWallUtLocal.into());
            }
        }

        let extra_rule = match footer {
            Some(footer) => parse_footer(footer, header.version == Version::V3)?,
            None => None,
        };

        Ok(TransitionTable::new(zone_id, transitions, local_time_types, extra_rule)?)
    }
}

/// Convert Unix leap time to Unix time, from the list of leap seconds of a TZif file
fn unix_leap_time_to_unix_time(leap_seconds: &[(i64, i32)], unix_leap_time: i64) -> Result<i64, TzFileError> {
    let index = leap_seconds.partition_point(|&(leap_time, _)| leap_time < unix_leap_time);
    let correction = index.checked_sub(1).map_or(0, |previous| leap_seconds[previous].1);

    unix_leap_time.checked_sub(i64::from(correction)).ok_or(TzFileError::ParseData(ParseDataError::InvalidData))
}

/// Parse TZif file as described in [RFC 8536](https://datatracker.ietf.org/doc/html/rfc8536)
pub(crate) fn parse_tz_file(zone_id: &str, bytes: &[u8]) -> Result<TransitionTable, TzError> {
    let mut cursor = Cursor::new(bytes);

    let header = parse_header(&mut cursor)?;

    match header.version {
        Version::V1 => {
            let data_blocks = read_data_blocks::<4>(&mut cursor, &header)?;

            if !cursor.is_empty() {
                return Err(TzFileError::RemainingDataV1.into());
            }

            data_blocks.parse(zone_id, &header, None)
        }
        Version::V2 | Version::V3 => {
            // Skip v1 data block
            read_data_blocks::<4>(&mut cursor, &header)?;

            let header = parse_header(&mut cursor)?;
            let data_blocks = read_data_blocks::<8>(&mut cursor, &header)?;

            trace!("parsed {} bytes of TZif data blocks for {zone_id}", bytes.len() - cursor.remaining().len());
            data_blocks.parse(zone_id, &header, Some(cursor.remaining()))
        }
    }
}
