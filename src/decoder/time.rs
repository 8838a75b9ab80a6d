//! Observation time resolution.
//!
//! A report only carries day-of-month, hour and minute. Month and year come
//! from a reference date supplied alongside the report (the observation
//! timestamp line of the upstream file), falling back to the current time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Formats accepted for the reference date, all interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse a reference date string, returning `None` when no format matches
pub fn parse_reference(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%Y/%m/%d").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Reference date to resolve against: the supplied one if it parses, else now
pub fn reference_or_now(reference: Option<&str>) -> DateTime<Utc> {
    reference.and_then(parse_reference).unwrap_or_else(Utc::now)
}

/// Replace day, hour and minute of the reference; seconds are zeroed.
///
/// Counting starts from the first of the reference month, so a day that does
/// not exist in that month rolls over into the next one.
pub fn resolve(
    reference: DateTime<Utc>,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<DateTime<Utc>> {
    let first = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?;
    let date = first.checked_add_signed(Duration::days(i64::from(day) - 1))?;
    let naive = date.and_hms_opt(hour, minute, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}
