//! Some useful constants.

/// Number of seconds in one minute
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Number of minutes in one hour
pub const MINUTES_PER_HOUR: i64 = 60;
/// Number of seconds in one hour
pub const SECONDS_PER_HOUR: i64 = 3600;
/// Number of seconds in one day
pub const SECONDS_PER_DAY: i64 = 86400;
/// Number of days in one week
pub const DAYS_PER_WEEK: i64 = 7;
/// Number of seconds in one week
pub const SECONDS_PER_WEEK: i64 = SECONDS_PER_DAY * DAYS_PER_WEEK;
/// Number of months in one year
pub const MONTHS_PER_YEAR: i64 = 12;
/// Number of days in a normal year
pub const DAYS_PER_NORMAL_YEAR: i64 = 365;
/// Number of days in 4 years (including 1 leap year)
pub const DAYS_PER_4_YEARS: i64 = DAYS_PER_NORMAL_YEAR * 4 + 1;
/// Number of days in 100 years (including 24 leap years)
pub const DAYS_PER_100_YEARS: i64 = DAYS_PER_NORMAL_YEAR * 100 + 24;
/// Number of days in 400 years (including 97 leap years)
pub const DAYS_PER_400_YEARS: i64 = DAYS_PER_NORMAL_YEAR * 400 + 97;

/// Month days in a normal year
pub const DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Cumulated month days in a normal year
pub const CUMUL_DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Unix time at `2000-03-01T00:00:00Z` (Wednesday)
pub const UNIX_OFFSET_SECS: i64 = 951868800;
/// Year of the `UNIX_OFFSET_SECS` reference
pub const OFFSET_YEAR: i64 = 2000;
/// Month days in a leap year from March
pub const DAY_IN_MONTHS_LEAP_YEAR_FROM_MARCH: [i64; 12] = [31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 29];

/// First year accepted for civil date time construction
pub const MIN_YEAR: i32 = 1970;
/// Last year accepted for civil date time construction
pub const MAX_YEAR: i32 = 2099;

/// Maximum magnitude of a standard offset, in seconds
pub const MAX_STANDARD_OFFSET: i32 = 13 * 3600;
/// Maximum magnitude of a daylight offset, in seconds
pub const MAX_DAYLIGHT_OFFSET: i32 = 3 * 3600;
/// Granularity of standard and daylight offsets, in seconds
pub const OFFSET_GRANULARITY: i32 = 5 * 60;
