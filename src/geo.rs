//! Observer Location Module
//!
//! Provides the validated geographic location value used by all solar
//! calculations.

use crate::error::SunError;

// ===================== CONSTANTS =====================

/// Latitude of the polar circles in degrees.
///
/// Between -66.56 and +66.56 the sun rises and sets every day of the year;
/// beyond, a calendar day may be a polar day or a polar night.
pub const POLAR_CIRCLE_LAT: f64 = 66.56;

// ===================== LOCATION =====================

/// A geographic observation point.
///
/// Constructed only through [`Location::new`], which rejects out-of-range
/// longitude and negative altitude. Latitude beyond the polar circles is
/// accepted with a warning, since the hour-angle test decides polar day/night
/// per date, not the latitude alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    longitude: f64,
    latitude: f64,
    altitude: f64,
}

impl Location {
    /// Validate and build a location.
    ///
    /// # Arguments
    /// * `longitude` - Degrees, negative west, in [-180, 180]
    /// * `latitude` - Degrees, negative south, in [-90, 90]
    /// * `altitude` - Meters above sea level, >= 0
    ///
    /// # Errors
    /// Returns a [`SunError`] if any input is outside its valid range.
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Result<Self, SunError> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SunError::InvalidLongitude { value: longitude });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SunError::InvalidLatitude { value: latitude });
        }
        if altitude < 0.0 {
            return Err(SunError::InvalidAltitude { value: altitude });
        }

        let loc = Self { longitude, latitude, altitude };
        if loc.beyond_polar_circle() {
            tracing::warn!(
                latitude,
                "latitude is beyond the polar circles; expect polar day/night results"
            );
        }
        Ok(loc)
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// True when the latitude lies beyond the polar circles.
    pub fn beyond_polar_circle(&self) -> bool {
        self.latitude.abs() > POLAR_CIRCLE_LAT
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location() {
        let loc = Location::new(2.35, 48.85, 35.0).unwrap();
        assert_eq!(loc.longitude(), 2.35);
        assert_eq!(loc.latitude(), 48.85);
        assert_eq!(loc.altitude(), 35.0);
        assert!(!loc.beyond_polar_circle());
    }

    #[test]
    fn test_rejects_longitude_out_of_range() {
        assert!(matches!(
            Location::new(180.1, 0.0, 0.0),
            Err(SunError::InvalidLongitude { .. })
        ));
        assert!(matches!(
            Location::new(-200.0, 0.0, 0.0),
            Err(SunError::InvalidLongitude { .. })
        ));
    }

    #[test]
    fn test_rejects_latitude_out_of_range() {
        assert!(matches!(Location::new(0.0, 90.5, 0.0), Err(SunError::InvalidLatitude { .. })));
    }

    #[test]
    fn test_rejects_negative_altitude() {
        assert!(matches!(Location::new(0.0, 0.0, -1.0), Err(SunError::InvalidAltitude { .. })));
    }

    #[test]
    fn test_polar_latitude_accepted_with_flag() {
        // High latitude is valid input; only the flag is raised.
        let loc = Location::new(25.75, 78.22, 0.0).unwrap();
        assert!(loc.beyond_polar_circle());

        let edge = Location::new(0.0, 66.56, 0.0).unwrap();
        assert!(!edge.beyond_polar_circle());
    }
}
