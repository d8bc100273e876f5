//! System time zone configuration: `TZ` and `TZDIR` variables, zoneinfo directory and local time file.

use crate::error::{Result, TzError};
use crate::mapping;

use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Default locations of the zoneinfo directory
const ZONEINFO_DIRECTORIES: &[&str] = &["/usr/share/zoneinfo", "/usr/lib/zoneinfo", "/usr/local/etc/zoneinfo"];

/// Default locations of the local time file
const LOCALTIME_FILES: &[&str] = &["/etc/localtime", "/usr/local/etc/localtime"];

/// Range of hours accepted in a `GMT±HH` name
const GMT_NAME_HOURS: std::ops::RangeInclusive<i32> = -12..=13;

/// Returns the content of the `TZ` environment variable, if set and not empty
pub(crate) fn tz_env() -> Option<String> {
    env::var("TZ").ok().filter(|tz| !tz.is_empty())
}

/// Returns the zoneinfo directory, from the `TZDIR` environment variable or from the default locations
pub(crate) fn zoneinfo_directory() -> Option<PathBuf> {
    if let Some(tzdir) = env::var_os("TZDIR") {
        let tzdir = PathBuf::from(tzdir);
        if tzdir.is_dir() {
            debug!("using zoneinfo directory at TZDIR={}", tzdir.display());
            return Some(tzdir);
        }
        warn!("TZDIR={} is not a directory, trying default locations", tzdir.display());
    }

    let directory = ZONEINFO_DIRECTORIES.iter().map(PathBuf::from).find(|directory| directory.is_dir());
    if directory.is_none() {
        warn!("could not find a zoneinfo directory at any of the following paths: {}", ZONEINFO_DIRECTORIES.join(", "));
    }
    directory
}

/// Returns the first existing local time file
pub(crate) fn localtime_file() -> Option<&'static Path> {
    LOCALTIME_FILES.iter().map(Path::new).find(|path| path.exists())
}

/// Returns the IANA identifier of a local time file, if it links into a zoneinfo directory
pub(crate) fn zone_id_from_localtime(path: &Path) -> Option<String> {
    zone_id_from_path(&fs::canonicalize(path).ok()?)
}

/// Returns the part of a path following its last `zoneinfo` component
fn zone_id_from_path(path: &Path) -> Option<String> {
    let components: Vec<_> = path.components().collect();
    let position = components.iter().rposition(|component| component.as_os_str() == "zoneinfo")?;

    let zone_id: PathBuf = components[position + 1..].iter().collect();
    let zone_id = zone_id.to_str()?;

    // Variants of the database
    let zone_id = zone_id.strip_prefix("posix/").or_else(|| zone_id.strip_prefix("right/")).unwrap_or(zone_id);

    (!zone_id.is_empty()).then(|| zone_id.to_owned())
}

/// Read a TZif file, a missing file meaning that the zone does not exist
pub(crate) fn read_tz_file(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(TzError::ZoneNotFound(path.display().to_string()).into()),
        Err(error) => Err(error.into()),
    }
}

/// Read the TZif file of a zone in the zoneinfo directory, returning `None` if it does not exist
pub(crate) fn read_zoneinfo_file(zone_id: &str) -> Result<Option<Vec<u8>>> {
    let relative = Path::new(zone_id);
    if zone_id.is_empty() || !relative.components().all(|component| matches!(component, Component::Normal(_))) {
        return Ok(None);
    }

    let Some(directory) = zoneinfo_directory() else { return Ok(None) };

    let path = directory.join(relative);
    if !path.is_file() {
        trace!("no zoneinfo file at {}", path.display());
        return Ok(None);
    }

    Ok(Some(fs::read(path)?))
}

/// Parse a `GMT` or `UTC` name, with an optional `±HH` or ` HH` hours suffix, into an offset in seconds
pub(crate) fn parse_gmt_name(name: &str) -> Option<i32> {
    let position = name.find("GMT").or_else(|| name.find("UTC"))?;

    match name[position + 3..].as_bytes() {
        [] => Some(0),
        [sign @ (b'+' | b'-' | b' '), tens @ b'0'..=b'9', units @ b'0'..=b'9', ..] => {
            let hours = i32::from(tens - b'0') * 10 + i32::from(units - b'0');
            let hours = if *sign == b'-' { -hours } else { hours };
            GMT_NAME_HOURS.contains(&hours).then_some(hours * 3600)
        }
        _ => None,
    }
}

/// Returns the sorted Windows standard names of the zones present in the zoneinfo directory
pub(crate) fn available_windows_names() -> Vec<String> {
    let Some(directory) = zoneinfo_directory() else { return Vec::new() };

    let mut names: Vec<_> = mapping::windows_and_iana_names()
        .filter(|(_, iana)| directory.join(iana).is_file())
        .map(|(windows, _)| windows.to_owned())
        .collect();

    names.sort_unstable();
    names
}
