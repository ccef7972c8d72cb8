// ABOUTME: ISO-8601 duration parsing for item lengths.
// ABOUTME: Supports the PT#H#M#S form with every component optional; failures read as zero.

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap());

/// Parses an ISO-8601 duration such as `PT1H2M3S` into seconds.
///
/// Supports:
/// - Any subset of hours, minutes and seconds (`PT45S`, `PT3M`, `PT1H5S`)
/// - Trailing text after a matching prefix, which is ignored
/// - Components too large for `u64`, which saturate at `u64::MAX`
///
/// Returns 0 for anything that does not start with `PT`; durations are
/// informational so a bad value must not fail the run.
pub fn parse_iso8601_duration(s: &str) -> u64 {
    let Some(caps) = ISO_DURATION.captures(s.trim()) else {
        return 0;
    };

    // Captures are all digits, so a failed parse can only be an overflow.
    let component = |idx: usize| -> u64 {
        caps.get(idx)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_form() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), 3723);
    }

    #[test]
    fn test_partial_components() {
        assert_eq!(parse_iso8601_duration("PT2M30S"), 150);
        assert_eq!(parse_iso8601_duration("PT45S"), 45);
        assert_eq!(parse_iso8601_duration("PT3M"), 180);
        assert_eq!(parse_iso8601_duration("PT1H"), 3600);
        assert_eq!(parse_iso8601_duration("PT1H5S"), 3605);
    }

    #[test]
    fn test_bare_prefix_is_zero() {
        assert_eq!(parse_iso8601_duration("PT"), 0);
        assert_eq!(parse_iso8601_duration("PT0S"), 0);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(parse_iso8601_duration(""), 0);
        assert_eq!(parse_iso8601_duration("5 minutes"), 0);
        assert_eq!(parse_iso8601_duration("P1D"), 0);
        assert_eq!(parse_iso8601_duration("04:30"), 0);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(parse_iso8601_duration("PT99999999999999999999H"), u64::MAX);
        assert_eq!(parse_iso8601_duration("PT99999999999999999999S"), u64::MAX);
        assert_eq!(parse_iso8601_duration("PT6000000000000000H"), u64::MAX);
    }

    #[test]
    fn test_overflowing_duration_is_long_form() {
        use crate::classify::{classify, Format};

        let seconds = parse_iso8601_duration("PT99999999999999999999H");
        assert_eq!(classify(seconds, "Marathon stream", ""), Format::LongForm);
    }
}
