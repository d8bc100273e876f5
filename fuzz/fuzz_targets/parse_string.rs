#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use tzrules::TimeZone;

    if let Ok(data) = std::str::from_utf8(data) {
        if let Ok(time_zone) = TimeZone::from_posix_tz(data) {
            let _ = time_zone.local_time();
        }
    }
});
