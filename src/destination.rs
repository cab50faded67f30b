//! Destination directory derivation from file timestamps.
//!
//! A file's destination is a pure function of its category base path, its
//! creation timestamp, and the configured date granularity: always a year
//! folder, optionally a month folder inside it. Month names come from an
//! explicit English table rather than the platform locale, so folder names
//! are identical across environments.

use chrono::{DateTime, Datelike, Local};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Full English month name for a 1-based month number.
///
/// Returns `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1 => Some("January"),
        2 => Some("February"),
        3 => Some("March"),
        4 => Some("April"),
        5 => Some("May"),
        6 => Some("June"),
        7 => Some("July"),
        8 => Some("August"),
        9 => Some("September"),
        10 => Some("October"),
        11 => Some("November"),
        12 => Some("December"),
        _ => None,
    }
}

/// The year-level directory for a timestamp: `base/YYYY`.
pub fn year_dir(base: &Path, created: DateTime<Local>) -> PathBuf {
    base.join(created.year().to_string())
}

/// The month-level directory inside a year directory.
///
/// Month folders are either the full English name ("March") or the unpadded
/// month number ("3"), per `use_month_name`.
pub fn month_dir(year_dir: &Path, created: DateTime<Local>, use_month_name: bool) -> PathBuf {
    year_dir.join(month_label(created, use_month_name))
}

/// The final destination directory for a file: `base/YYYY` or
/// `base/YYYY/{M|MonthName}` depending on `use_month`.
pub fn resolve_destination(
    base: &Path,
    created: DateTime<Local>,
    use_month: bool,
    use_month_name: bool,
) -> PathBuf {
    let year = year_dir(base, created);
    if use_month {
        month_dir(&year, created, use_month_name)
    } else {
        year
    }
}

fn month_label(created: DateTime<Local>, use_month_name: bool) -> String {
    let month = created.month();
    if use_month_name
        && let Some(name) = month_name(month)
    {
        return name.to_string();
    }
    month.to_string()
}

/// The timestamp used for date-based placement of a file.
///
/// Uses the filesystem creation time where available, falling back to the
/// modification time on filesystems that do not record one, and to the
/// current time as a last resort.
pub fn creation_time(metadata: &Metadata) -> DateTime<Local> {
    let system_time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or_else(|_| SystemTime::now());
    DateTime::<Local>::from(system_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_month_name_table() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(3), Some("March"));
        assert_eq!(month_name(11), Some("November"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_year_only() {
        let dest = resolve_destination(Path::new("/photos"), timestamp(2022, 3, 15), false, false);
        assert_eq!(dest, PathBuf::from("/photos/2022"));
    }

    #[test]
    fn test_year_and_numeric_month() {
        let dest = resolve_destination(Path::new("/photos"), timestamp(2022, 3, 15), true, false);
        // Numeric month folders are unpadded
        assert_eq!(dest, PathBuf::from("/photos/2022/3"));
    }

    #[test]
    fn test_year_and_month_name() {
        let dest = resolve_destination(Path::new("/photos"), timestamp(2021, 11, 2), true, true);
        assert_eq!(dest, PathBuf::from("/photos/2021/November"));
    }

    #[test]
    fn test_resolution_is_pure() {
        let base = Path::new("/videos");
        let created = timestamp(2020, 7, 4);

        let first = resolve_destination(base, created, true, true);
        let second = resolve_destination(base, created, true, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_month_dir_nests_inside_year_dir() {
        let created = timestamp(2022, 3, 15);
        let year = year_dir(Path::new("/photos"), created);
        let month = month_dir(&year, created, true);

        assert_eq!(year, PathBuf::from("/photos/2022"));
        assert_eq!(month, PathBuf::from("/photos/2022/March"));
        assert!(month.starts_with(&year));
    }
}
