//! Calendar / Julian Day Conversion Module
//!
//! The external collaborator boundary between civil (proleptic Gregorian)
//! dates and the continuous Julian day count used by the solar formulas.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use julian_day_converter::{julian_day_to_unix_millis, unix_millis_to_julian_day};

use crate::error::SunError;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ===================== CALENDAR DATE =====================

/// A civil calendar date with no time-of-day component.
///
/// The triple is not validated here; conversion through [`to_julian_day`]
/// rejects malformed (month, day) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    /// Proleptic Gregorian year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
}

impl CalendarDate {
    /// Build a calendar date from its components.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

// ===================== CONVERSIONS =====================

/// Convert a calendar date to the Julian day at 00:00 UTC.
///
/// # Returns
/// The (integer, fractional) parts of the Julian day.
///
/// # Errors
/// [`SunError::InvalidCalendarDate`] if the (month, day) pair is malformed.
pub fn to_julian_day(date: CalendarDate) -> Result<(f64, f64), SunError> {
    let civil = NaiveDate::from_ymd_opt(date.year, date.month, date.day).ok_or(
        SunError::InvalidCalendarDate { year: date.year, month: date.month, day: date.day },
    )?;
    let millis = civil.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    let jd = unix_millis_to_julian_day(millis);
    Ok((jd.trunc(), jd.fract()))
}

/// Julian day of the 12:00 UTC instant of a calendar date.
pub fn julian_day_at_noon(date: CalendarDate) -> Result<f64, SunError> {
    let (int, frac) = to_julian_day(date)?;
    Ok(int + frac + 0.5)
}

/// Convert a Julian day back to a calendar date plus day fraction.
///
/// # Returns
/// (year, month, day, fraction of the civil day since 00:00 UTC).
///
/// # Errors
/// [`SunError::JulianDayOutOfRange`] if the value cannot be represented as a
/// civil instant.
pub fn from_julian_day(jd: f64) -> Result<(i32, u32, u32, f64), SunError> {
    let millis = julian_day_to_unix_millis(jd);
    let instant = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or(SunError::JulianDayOutOfRange { jd })?;
    let naive = instant.naive_utc();
    let time = naive.time();
    let frac = (f64::from(time.num_seconds_from_midnight()) * 1000.0
        + f64::from(time.nanosecond()) / 1.0e6)
        / MILLIS_PER_DAY;
    Ok((naive.year(), naive.month(), naive.day(), frac))
}

// ===================== DAY-FRACTION ROUNDING =====================

/// Round a fraction of a day to (hour, minute).
///
/// Minutes are rounded to the nearest, carrying into the hour when rounding
/// reaches 60; a carry past the end of the day clamps to 23:59. Seconds are
/// never materialized, the model's precision does not support them.
pub fn round_day_fraction_to_hm(f: f64) -> (u32, u32) {
    let h = (f * 24.0) as u32;
    let m = (f * 24.0 * 60.0 - f64::from(h) * 60.0).round() as u32;
    if m < 60 {
        (h, m)
    } else if h + 1 == 24 {
        (23, 59)
    } else {
        (h + 1, 0)
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        // 2000-01-01 12:00 UTC is the J2000 epoch, JD 2451545.0.
        let jd = julian_day_at_noon(CalendarDate::new(2000, 1, 1)).unwrap();
        assert!((jd - 2_451_545.0).abs() < 1e-6);
    }

    #[test]
    fn test_midnight_parts() {
        let (int, frac) = to_julian_day(CalendarDate::new(2000, 1, 1)).unwrap();
        assert!((int + frac - 2_451_544.5).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_malformed_date() {
        assert!(matches!(
            to_julian_day(CalendarDate::new(2021, 2, 29)),
            Err(SunError::InvalidCalendarDate { .. })
        ));
        assert!(matches!(
            to_julian_day(CalendarDate::new(2021, 13, 1)),
            Err(SunError::InvalidCalendarDate { .. })
        ));
    }

    #[test]
    fn test_round_trip_noon() {
        let jd = julian_day_at_noon(CalendarDate::new(2020, 6, 21)).unwrap();
        let (y, m, d, frac) = from_julian_day(jd).unwrap();
        assert_eq!((y, m, d), (2020, 6, 21));
        assert!((frac - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_leap_day_round_trip() {
        let jd = julian_day_at_noon(CalendarDate::new(2020, 2, 29)).unwrap();
        let (y, m, d, _) = from_julian_day(jd).unwrap();
        assert_eq!((y, m, d), (2020, 2, 29));
    }

    #[test]
    fn test_round_fraction_exact_hours() {
        assert_eq!(round_day_fraction_to_hm(0.0), (0, 0));
        assert_eq!(round_day_fraction_to_hm(0.5), (12, 0));
    }

    #[test]
    fn test_round_fraction_nearest_minute() {
        // 10:30:29 rounds down, 10:30:31 rounds up.
        let down = (10.0 * 3600.0 + 30.0 * 60.0 + 29.0) / 86_400.0;
        let up = (10.0 * 3600.0 + 30.0 * 60.0 + 31.0) / 86_400.0;
        assert_eq!(round_day_fraction_to_hm(down), (10, 30));
        assert_eq!(round_day_fraction_to_hm(up), (10, 31));
    }

    #[test]
    fn test_round_fraction_minute_carry() {
        // 09:59:45 carries into 10:00.
        let f = (9.0 * 3600.0 + 59.0 * 60.0 + 45.0) / 86_400.0;
        assert_eq!(round_day_fraction_to_hm(f), (10, 0));
    }

    #[test]
    fn test_round_fraction_clamped_at_day_end() {
        // 23:59:45 would carry past the day; clamp to 23:59.
        let f = (23.0 * 3600.0 + 59.0 * 60.0 + 45.0) / 86_400.0;
        assert_eq!(round_day_fraction_to_hm(f), (23, 59));
    }
}
