//! Search of the instants where the offset of a time zone changes.

use super::TimeZone;
use crate::datetime::{Time, TimeSpan};
use crate::error::Result;

/// Length of one search window
const SEARCH_PERIOD: TimeSpan = TimeSpan::from_days(32);
/// Number of search windows, a little more than three years
const SEARCH_PERIODS: usize = 36;

impl TimeZone {
    /// Offset function used by the search: UTC to local offset for a UTC search, local to UTC offset otherwise
    fn search_offset(&self, time: Time, is_utc: bool) -> Result<i32> {
        if is_utc {
            self.utc_to_local_offset(time)
        } else {
            self.local_to_utc_offset(time)
        }
    }

    /// Find the next instant strictly after `anchor` where the offset changes.
    ///
    /// The search covers about three years from the anchor, and returns `None` if no change is found.
    /// The result has a one second precision, and prefers a round minute.
    ///
    pub fn next_switch_time(&self, anchor: Time, is_utc: bool) -> Result<Option<Time>> {
        let mut from = anchor;
        let mut offset_from = self.search_offset(from, is_utc)?;

        for _ in 0..SEARCH_PERIODS {
            let to = from + SEARCH_PERIOD;
            let offset_to = self.search_offset(to, is_utc)?;

            if offset_from != offset_to {
                let switch = self.bisect_switch_time(from, to, offset_to, is_utc)?;
                trace!("found switch at {switch} after {anchor}");
                return Ok(Some(switch.max(anchor + TimeSpan::from_seconds(1))));
            }

            from = to;
            offset_from = offset_to;
        }

        Ok(None)
    }

    /// Returns the signed change of offset around the specified time, measured one second before and after it
    pub fn switch_time_offset_change(&self, time: Time, is_utc: bool) -> Result<i32> {
        let one_second = TimeSpan::from_seconds(1);
        Ok(self.search_offset(time + one_second, is_utc)? - self.search_offset(time - one_second, is_utc)?)
    }

    /// Narrow down a window with an offset change to one second
    fn bisect_switch_time(&self, mut from: Time, mut to: Time, offset_to: i32, is_utc: bool) -> Result<Time> {
        loop {
            let length = (to - from).seconds();
            if length <= 1 {
                return Ok(pick_switch_time(from, to));
            }

            let pivot = from + TimeSpan::from_seconds(length / 2);
            if self.search_offset(pivot, is_utc)? == offset_to {
                to = pivot;
            } else {
                from = pivot;
            }
        }
    }
}

/// Choose between the two ends of a one second window, preferring a round minute
fn pick_switch_time(from: Time, to: Time) -> Time {
    match (from.second(), to.second()) {
        (0, _) => from,
        (_, 0) => to,
        (59 | 1, _) => from,
        _ => to,
    }
}
