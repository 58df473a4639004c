//! Error types for the suntable crate.

/// Error type for all fallible operations in the suntable crate.
///
/// Polar day and polar night are deliberately *not* errors: they are ordinary
/// outcomes carried by [`crate::solar::SolarEvent`].
#[derive(Debug, thiserror::Error)]
pub enum SunError {
    /// Returned when a longitude is outside [-180, 180] degrees.
    #[error("longitude must be between -180 and 180, got {value}")]
    InvalidLongitude {
        /// The rejected longitude in degrees.
        value: f64,
    },

    /// Returned when a latitude is outside [-90, 90] degrees.
    #[error("latitude must be between -90 and 90, got {value}")]
    InvalidLatitude {
        /// The rejected latitude in degrees.
        value: f64,
    },

    /// Returned when an altitude is negative.
    #[error("altitude must be >= 0 meters, got {value}")]
    InvalidAltitude {
        /// The rejected altitude in meters.
        value: f64,
    },

    /// Returned when a (year, month, day) triple does not name a real
    /// proleptic Gregorian date.
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidCalendarDate {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u32,
        /// Day of the rejected date.
        day: u32,
    },

    /// Returned when a Julian day cannot be mapped back to a civil instant.
    #[error("julian day {jd} is outside the representable range")]
    JulianDayOutOfRange {
        /// The unconvertible Julian day.
        jd: f64,
    },

    /// Returned when a zone identifier is not a recognized IANA name.
    #[error("unrecognized time zone {name:?}")]
    InvalidTimezone {
        /// The rejected zone identifier.
        name: String,
    },

    /// Returned when year-level interval detection finds a boundary count
    /// other than 0, 2 or 4 for a polar marker.
    #[error("found {count} {marker} boundaries in year {year}, expected 0, 2 or 4")]
    InconsistentIntervalState {
        /// Marker whose boundaries were scanned ("polar day" or "polar night").
        marker: &'static str,
        /// Year being scanned.
        year: i32,
        /// The offending boundary count.
        count: usize,
    },

    /// Returned when an export directory path does not end in a separator.
    #[error("export path {path:?} must end with '/' or '\\'")]
    InvalidExportPath {
        /// The rejected path.
        path: String,
    },

    /// Returned when rendering the timetable to JSON fails.
    #[error("failed to serialize timetable")]
    Serialize {
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// Returned when writing an export file fails.
    #[error("failed to write {path}")]
    ExportIo {
        /// Destination path of the failed write.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_longitude() {
        let e = SunError::InvalidLongitude { value: 181.0 };
        assert_eq!(e.to_string(), "longitude must be between -180 and 180, got 181");
    }

    #[test]
    fn error_invalid_calendar_date() {
        let e = SunError::InvalidCalendarDate { year: 2021, month: 2, day: 29 };
        assert_eq!(e.to_string(), "invalid calendar date 2021-02-29");
    }

    #[test]
    fn error_inconsistent_interval() {
        let e = SunError::InconsistentIntervalState { marker: "polar night", year: 2020, count: 3 };
        assert_eq!(
            e.to_string(),
            "found 3 polar night boundaries in year 2020, expected 0, 2 or 4"
        );
    }

    #[test]
    fn error_is_std_error_send_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<SunError>();
    }
}
