//! Solar Position Calculation Module
//!
//! Closed-form low-precision sunrise/sunset model (accurate to about one
//! minute), based on mean anomaly, equation of center and ecliptic longitude
//! of the sun. No external ephemeris data is required.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::SunError;
use crate::geo::Location;
use crate::julian::{from_julian_day, julian_day_at_noon, round_day_fraction_to_hm, CalendarDate};

// ===================== CONSTANTS =====================

/// Julian day of the J2000 epoch (2000-01-01 12:00 TT).
pub const JULIAN_DAYS_2000: f64 = 2_451_545.0;

/// Fractional Julian day for leap seconds and terrestrial time.
const JULIAN_DAYS_LEAP: f64 = 0.00084;

// Mean solar anomaly
const MEAN_M0: f64 = 357.5291;
const MEAN_M1: f64 = 0.98560028;

// Equation of center
const CENTER_C0: f64 = 1.9148;
const CENTER_C1: f64 = 0.0200;
const CENTER_C2: f64 = 0.0003;

/// Ecliptic longitude: argument of perihelion in degrees.
const PERIHELION_ARGUMENT: f64 = 102.9372;

// Equation of time (solar transit)
const TIME_0: f64 = 0.0053;
const TIME_1: f64 = 0.0069;

/// Earth's maximal tilt toward the sun in degrees.
const OBLIQUITY: f64 = 23.44;

// Hour angle elevation threshold: atmospheric refraction plus solar disc
// diameter, and the altitude-dependent dip of the horizon (degrees).
const CORRECTION_REFRACTION: f64 = -0.833;
const CORRECTION_ELEVATION: f64 = -2.076;

// ===================== TYPES =====================

/// Which polar condition applies on a day without rise/set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarMarker {
    /// The sun never sets.
    PolarDay,
    /// The sun never rises.
    PolarNight,
}

impl PolarMarker {
    /// Human-readable name of the condition.
    pub fn label(self) -> &'static str {
        match self {
            PolarMarker::PolarDay => "Polar Day",
            PolarMarker::PolarNight => "Polar Night",
        }
    }

    /// Two-letter tag used in table cells.
    pub fn tag(self) -> &'static str {
        match self {
            PolarMarker::PolarDay => "PD",
            PolarMarker::PolarNight => "PN",
        }
    }
}

/// Outcome of one rise/set computation for one (location, date) pair.
///
/// Exactly one variant applies per day; the polar variants are first-class
/// outcomes every consumer has to handle, not missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarEvent {
    /// Ordinary day: the sun crosses the elevation threshold twice.
    ///
    /// Both instants are UTC; a zone view is a separate conversion step.
    /// The rise may fall on the previous civil day and the set on the next,
    /// since both are offsets from the local solar noon.
    RiseSet {
        /// Sunrise, rounded to the minute.
        rise: DateTime<Utc>,
        /// Sunset, rounded to the minute.
        set: DateTime<Utc>,
    },
    /// The sun never sets on this day.
    PolarDay,
    /// The sun never rises on this day.
    PolarNight,
}

impl SolarEvent {
    /// The polar marker, if this day has no rise/set.
    pub fn marker(&self) -> Option<PolarMarker> {
        match self {
            SolarEvent::RiseSet { .. } => None,
            SolarEvent::PolarDay => Some(PolarMarker::PolarDay),
            SolarEvent::PolarNight => Some(PolarMarker::PolarNight),
        }
    }

    /// The (rise, set) pair of an ordinary day.
    pub fn rise_set(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            SolarEvent::RiseSet { rise, set } => Some((*rise, *set)),
            _ => None,
        }
    }
}

// ===================== SOLAR CALCULATION CONTEXT =====================

/// Context for rise/set calculations at a fixed location.
///
/// A pure function of (location, date): no hidden state, freely shareable
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct SolarCalc {
    location: Location,
}

impl SolarCalc {
    /// Build a calculator for a validated location.
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    /// The observer location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Mean solar noon `J*`: days since J2000 corrected for longitude.
    ///
    /// The longitude term is subtracted, matching the reference tables this
    /// model was calibrated against.
    pub fn mean_solar_noon(&self, date: CalendarDate) -> Result<f64, SunError> {
        let jd = julian_day_at_noon(date)?;
        let n = jd - JULIAN_DAYS_2000 + JULIAN_DAYS_LEAP;
        Ok(n - self.location.longitude() / 360.0)
    }

    /// Solar mean anomaly `M` in degrees, [0, 360).
    pub fn solar_mean_anomaly(&self, date: CalendarDate) -> Result<f64, SunError> {
        let jstar = self.mean_solar_noon(date)?;
        Ok((MEAN_M0 + MEAN_M1 * jstar).rem_euclid(360.0))
    }

    /// Equation of center `C` in degrees.
    pub fn equation_of_center(&self, date: CalendarDate) -> Result<f64, SunError> {
        let m = self.solar_mean_anomaly(date)?.to_radians();
        Ok(CENTER_C0 * m.sin() + CENTER_C1 * (2.0 * m).sin() + CENTER_C2 * (3.0 * m).sin())
    }

    /// Ecliptic longitude of the sun in degrees, [0, 360).
    pub fn ecliptic_longitude(&self, date: CalendarDate) -> Result<f64, SunError> {
        let m = self.solar_mean_anomaly(date)?;
        let c = self.equation_of_center(date)?;
        Ok((m + c + 180.0 + PERIHELION_ARGUMENT).rem_euclid(360.0))
    }

    /// True solar noon as a Julian date.
    pub fn solar_transit(&self, date: CalendarDate) -> Result<f64, SunError> {
        let jstar = self.mean_solar_noon(date)?;
        let m = self.solar_mean_anomaly(date)?.to_radians();
        let lambda = self.ecliptic_longitude(date)?.to_radians();
        Ok(JULIAN_DAYS_2000 + jstar + TIME_0 * m.sin() - TIME_1 * (2.0 * lambda).sin())
    }

    /// Sun declination in radians.
    pub fn sun_declination(&self, date: CalendarDate) -> Result<f64, SunError> {
        let lambda = self.ecliptic_longitude(date)?.to_radians();
        Ok((lambda.sin() * OBLIQUITY.to_radians().sin()).asin())
    }

    /// Cosine of the rise/set hour angle.
    ///
    /// Computed unconditionally; the comparison against +/-1 downstream is
    /// the only gate for polar day/night.
    pub fn hour_angle_cos(&self, date: CalendarDate) -> Result<f64, SunError> {
        let elevation =
            CORRECTION_REFRACTION + CORRECTION_ELEVATION * self.location.altitude().sqrt() / 60.0;
        let delta = self.sun_declination(date)?;
        let lat = self.location.latitude().to_radians();
        Ok((elevation.to_radians().sin() - lat.sin() * delta.sin()) / (lat.cos() * delta.cos()))
    }

    /// Compute the solar event for one calendar day.
    ///
    /// # Errors
    /// Only calendar conversion can fail; polar day/night are ordinary
    /// `Ok` outcomes.
    pub fn solar_event(&self, date: CalendarDate) -> Result<SolarEvent, SunError> {
        let cos_omega = self.hour_angle_cos(date)?;
        if cos_omega > 1.0 {
            return Ok(SolarEvent::PolarNight);
        }
        if cos_omega < -1.0 {
            return Ok(SolarEvent::PolarDay);
        }

        let transit = self.solar_transit(date)?;
        let half_arc = cos_omega.acos().to_degrees() / 360.0;
        let rise = jd_to_civil_minute(transit - half_arc)?;
        let set = jd_to_civil_minute(transit + half_arc)?;
        Ok(SolarEvent::RiseSet { rise, set })
    }
}

/// Convert a Julian date to a UTC instant rounded to the minute.
fn jd_to_civil_minute(jd: f64) -> Result<DateTime<Utc>, SunError> {
    let (year, month, day, frac) = from_julian_day(jd)?;
    let (hour, minute) = round_day_fraction_to_hm(frac);
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or(SunError::JulianDayOutOfRange { jd })
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn paris() -> SolarCalc {
        SolarCalc::new(Location::new(2.35, 48.85, 35.0).unwrap())
    }

    #[test]
    fn test_paris_summer_solstice() {
        let event = paris().solar_event(CalendarDate::new(2020, 6, 21)).unwrap();
        let (rise, set) = event.rise_set().expect("ordinary day expected in Paris");

        // Sunrise well before 06:00 UTC, sunset at/after 20:00 UTC.
        assert!(rise.hour() < 6, "rise at {}", rise);
        assert!(set.hour() >= 20, "set at {}", set);

        // More than 15 hours of daylight.
        let minutes = (set - rise).num_minutes();
        assert!(minutes > 15 * 60, "day length {} min", minutes);
    }

    #[test]
    fn test_paris_solstice_known_minutes() {
        // Reference values from the model itself; pins the formula chain.
        let event = paris().solar_event(CalendarDate::new(2020, 6, 21)).unwrap();
        let (rise, set) = event.rise_set().unwrap();
        assert_eq!((rise.hour(), set.hour()), (3, 20));
        // Rise around 03:47, set around 20:00; allow one minute of slack.
        assert!((rise.minute() as i64 - 47).abs() <= 1, "rise at {}", rise);
        assert!(set.minute() <= 2, "set at {}", set);
    }

    #[test]
    fn test_far_north_winter_is_polar_night() {
        let calc = SolarCalc::new(Location::new(25.75, 78.22, 0.0).unwrap());
        let event = calc.solar_event(CalendarDate::new(2020, 12, 21)).unwrap();
        assert_eq!(event, SolarEvent::PolarNight);
        assert_eq!(event.marker(), Some(PolarMarker::PolarNight));
    }

    #[test]
    fn test_far_north_summer_is_polar_day() {
        let calc = SolarCalc::new(Location::new(25.75, 78.22, 0.0).unwrap());
        let event = calc.solar_event(CalendarDate::new(2020, 6, 21)).unwrap();
        assert_eq!(event, SolarEvent::PolarDay);
    }

    #[test]
    fn test_equator_never_polar() {
        let calc = SolarCalc::new(Location::new(0.0, 0.0, 0.0).unwrap());
        for month in 1..=12 {
            for day in [1, 8, 15, 22, 28] {
                let date = CalendarDate::new(2021, month, day);
                let cos_omega = calc.hour_angle_cos(date).unwrap();
                assert!(cos_omega.abs() <= 1.0, "cos omega {} on {}", cos_omega, date);
                assert!(calc.solar_event(date).unwrap().marker().is_none());
            }
        }
    }

    #[test]
    fn test_high_but_subpolar_latitude_never_polar() {
        // The -0.833 degree threshold moves the polar-day onset slightly
        // equatorward of the geometric circle (to roughly 65.7 degrees), so
        // the guaranteed rise/set zone ends there, not at 66.56.
        let calc = SolarCalc::new(Location::new(10.0, 65.0, 0.0).unwrap());
        for date in [CalendarDate::new(2020, 6, 21), CalendarDate::new(2020, 12, 21)] {
            assert!(calc.solar_event(date).unwrap().marker().is_none(), "polar at {}", date);
        }
    }

    #[test]
    fn test_polar_night_needs_beyond_circle_latitude() {
        // Polar night, unlike polar day, never occurs at or below the polar
        // circle: the threshold below the horizon works against it.
        let calc = SolarCalc::new(Location::new(10.0, 66.56, 0.0).unwrap());
        for month in 1..=12 {
            let event = calc.solar_event(CalendarDate::new(2020, month, 15)).unwrap();
            assert_ne!(event, SolarEvent::PolarNight);
        }
    }

    #[test]
    fn test_idempotent() {
        // Pure function: identical inputs give bit-identical outputs.
        let calc = paris();
        let date = CalendarDate::new(2020, 3, 14);
        assert_eq!(calc.solar_event(date).unwrap(), calc.solar_event(date).unwrap());
        assert_eq!(
            calc.hour_angle_cos(date).unwrap().to_bits(),
            calc.hour_angle_cos(date).unwrap().to_bits()
        );
    }

    #[test]
    fn test_solstice_ecliptic_longitude() {
        // Near the June solstice the ecliptic longitude is close to 90 deg.
        let lambda = paris().ecliptic_longitude(CalendarDate::new(2020, 6, 21)).unwrap();
        assert!((lambda - 90.0).abs() < 1.0, "lambda {}", lambda);
    }

    #[test]
    fn test_declination_bounds() {
        let calc = paris();
        for month in 1..=12 {
            let delta = calc.sun_declination(CalendarDate::new(2021, month, 15)).unwrap();
            assert!(delta.to_degrees().abs() <= OBLIQUITY + 0.01);
        }
    }

    #[test]
    fn test_invalid_date_surfaces() {
        let err = paris().solar_event(CalendarDate::new(2021, 2, 30)).unwrap_err();
        assert!(matches!(err, SunError::InvalidCalendarDate { .. }));
    }
}
