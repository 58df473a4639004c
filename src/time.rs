//! Time and Timezone Utilities Module
//!
//! Timezone resolution, UTC-to-zone conversion and clock rounding/formatting.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use iana_time_zone::get_timezone;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

use crate::error::SunError;

// tzf-rs DefaultFinder is pre-compiled and very fast
static TZF_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

// ===================== TIMEZONE UTILITIES =====================

/// Get the system's configured timezone.
///
/// Falls back to UTC if the system timezone cannot be determined.
pub fn system_timezone() -> Tz {
    get_timezone().ok().and_then(|s| s.parse().ok()).unwrap_or(Tz::UTC)
}

/// Parse an IANA zone identifier.
///
/// # Errors
/// [`SunError::InvalidTimezone`] if the name is not a recognized zone.
pub fn parse_timezone(name: &str) -> Result<Tz, SunError> {
    name.parse::<Tz>().map_err(|_| SunError::InvalidTimezone { name: name.to_string() })
}

/// Resolve timezone from geographic coordinates.
///
/// # Arguments
/// * `lon` - Longitude in degrees
/// * `lat` - Latitude in degrees
///
/// # Returns
/// The resolved timezone, or UTC if resolution fails
pub fn resolve_timezone(lon: f64, lat: f64) -> Tz {
    let finder = TZF_FINDER.get_or_init(DefaultFinder::new);
    finder.get_tz_name(lon, lat).parse::<Tz>().unwrap_or(Tz::UTC)
}

/// View a UTC instant in a target zone.
///
/// A stateless conversion: the same UTC `SolarEvent` instant can be projected
/// into any number of zones without recomputation.
pub fn convert(utc: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
    utc.with_timezone(&zone)
}

// ===================== CLOCK ROUNDING =====================

/// Round a duration in whole seconds to (hours, minutes).
///
/// Remainder seconds >= 30 round the minute up; minute 60 carries into the
/// hour; 24 hours or more saturates to 24:00.
pub fn seconds_to_hm(seconds: i64) -> (u32, u32) {
    let total = seconds.max(0);
    let mut hh = total / 3600;
    let rem = total % 3600;
    let mut mm = rem / 60;
    if rem % 60 >= 30 {
        mm += 1;
    }
    if mm == 60 {
        mm = 0;
        hh += 1;
    }
    if hh >= 24 {
        return (24, 0);
    }
    (hh as u32, mm as u32)
}

// ===================== FORMATTING =====================

/// Format an (hour, minute) pair as a verbose "H h M mn" string.
pub fn format_hm(hours: u32, minutes: u32) -> String {
    format!("{} h {} mn", hours, minutes)
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Paris;

    #[test]
    fn test_parse_timezone_valid() {
        assert_eq!(parse_timezone("Europe/Paris").unwrap(), Paris);
        assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
    }

    #[test]
    fn test_parse_timezone_invalid() {
        let err = parse_timezone("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, SunError::InvalidTimezone { .. }));
    }

    #[test]
    fn test_convert_round_trip() {
        // Zone projection is lossless back to UTC.
        let utc = Utc.with_ymd_and_hms(2020, 6, 21, 3, 47, 0).unwrap();
        let paris = convert(utc, Paris);
        assert_eq!(paris.with_timezone(&Utc), utc);
    }

    #[test]
    fn test_convert_applies_offset() {
        // Paris is UTC+2 in June.
        let utc = Utc.with_ymd_and_hms(2020, 6, 21, 3, 47, 0).unwrap();
        let paris = convert(utc, Paris);
        assert_eq!(paris.format("%H:%M").to_string(), "05:47");
    }

    #[test]
    fn test_resolve_timezone_paris() {
        assert_eq!(resolve_timezone(2.35, 48.85), Paris);
    }

    #[test]
    fn test_seconds_to_hm_rounding() {
        assert_eq!(seconds_to_hm(0), (0, 0));
        // 29 s remainder rounds down, 30 s rounds up.
        assert_eq!(seconds_to_hm(3600 + 29), (1, 0));
        assert_eq!(seconds_to_hm(3600 + 30), (1, 1));
    }

    #[test]
    fn test_seconds_to_hm_minute_carry() {
        // 1h 59m 45s carries into 2h.
        assert_eq!(seconds_to_hm(3600 + 59 * 60 + 45), (2, 0));
    }

    #[test]
    fn test_seconds_to_hm_saturates_at_24h() {
        assert_eq!(seconds_to_hm(86_400), (24, 0));
        assert_eq!(seconds_to_hm(86_400 - 10), (24, 0));
        assert_eq!(seconds_to_hm(90_000), (24, 0));
    }

    #[test]
    fn test_format_hm() {
        assert_eq!(format_hm(16, 14), "16 h 14 mn");
        assert_eq!(format_hm(0, 5), "0 h 5 mn");
    }
}
