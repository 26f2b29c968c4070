//! Post date parsing.
//!
//! Dates come from two places: a `date` front matter value, or the
//! `YYYY-MM-DD-` prefix of the source filename.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats accepted without a UTC offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Formats accepted with a trailing UTC offset (`+0100` or `+01:00`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M %z"];

/// Parse a front matter date value.
///
/// Values carrying an offset keep their local wall-clock time; the offset is
/// only used to validate the value.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Split a `YYYY-MM-DD-slug` file stem into its date and slug.
///
/// Returns `None` when the stem has no valid date prefix or no slug after it.
pub fn split_filename(stem: &str) -> Option<(NaiveDateTime, &str)> {
    let prefix = stem.get(..10)?;
    let slug = stem.get(10..)?.strip_prefix('-')?;
    if slug.is_empty() {
        return None;
    }

    let date = NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
    Some((date.and_hms_opt(0, 0, 0)?, slug))
}
