//! Process wide current time zone, refreshed from the system.

use super::TimeZone;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Period during which the current time zone is reused without reading the system configuration
const UPDATE_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug)]
struct CurrentTimeZone {
    time_zone: Arc<TimeZone>,
    checked_at: Instant,
    /// Set to read the system configuration on next access
    expired: bool,
}

static CURRENT: Mutex<Option<CurrentTimeZone>> = Mutex::new(None);

fn lock_current() -> MutexGuard<'static, Option<CurrentTimeZone>> {
    // The protected value is always consistent
    CURRENT.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TimeZone {
    /// Returns the current time zone of the system.
    ///
    /// The system configuration is read again at most every 10 seconds,
    /// and a new instance is published only if the zone has changed.
    /// Previously returned instances stay valid.
    ///
    /// The UTC time zone is used if the system configuration cannot be read.
    ///
    pub fn current() -> Arc<TimeZone> {
        let mut slot = lock_current();
        let now = Instant::now();

        match slot.as_mut() {
            Some(current) if !current.expired && now.duration_since(current.checked_at) < UPDATE_PERIOD => Arc::clone(&current.time_zone),
            Some(current) => {
                let time_zone = Self::read_current();
                if time_zone != *current.time_zone {
                    debug!("current time zone changed to {}", time_zone.standard_name());
                    current.time_zone = Arc::new(time_zone);
                }
                current.checked_at = now;
                current.expired = false;
                Arc::clone(&current.time_zone)
            }
            None => {
                let time_zone = Arc::new(Self::read_current());
                *slot = Some(CurrentTimeZone { time_zone: Arc::clone(&time_zone), checked_at: now, expired: false });
                time_zone
            }
        }
    }

    /// Force the next call to [`TimeZone::current`] to read the system configuration
    pub fn refresh_current() {
        if let Some(current) = lock_current().as_mut() {
            current.expired = true;
        }
    }

    fn read_current() -> TimeZone {
        match Self::local() {
            Ok(time_zone) => time_zone,
            Err(_error) => {
                warn!("unable to read the system time zone, using UTC instead: {_error}");
                Self::utc()
            }
        }
    }
}
