// ABOUTME: Flexible parsing of item publish timestamps.
// ABOUTME: Accepts RFC 3339 first, then RFC 2822 and common naive layouts assumed to be UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses a publish timestamp into UTC.
///
/// The acquisition step normally hands over RFC 3339 (`2025-01-10T10:00:00Z`),
/// but hand-edited fixtures and exports from other tools drift, so a few
/// other layouts are accepted. Returns None when nothing matches.
pub fn parse_published_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats_with_tz = [
        // "2025-01-10T10:00:00+0200"
        "%Y-%m-%dT%H:%M:%S%z",
        // "2025-01-10 10:00:00 +02:00"
        "%Y-%m-%d %H:%M:%S %:z",
        // "2025-01-10T10:00:00.123+0200"
        "%Y-%m-%dT%H:%M:%S%.f%z",
    ];

    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let formats_naive = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    None
}
