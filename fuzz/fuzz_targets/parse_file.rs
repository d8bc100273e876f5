#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use tzrules::TimeZone;

    if let Ok(time_zone) = TimeZone::from_tz_data("fuzz", data) {
        let _ = time_zone.next_switch_time(TimeZone::utc_time(), true);
    }
});
