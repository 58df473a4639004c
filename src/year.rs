//! Year Aggregation Module
//!
//! Builds the full-year table of per-day rise/set records and derives the
//! polar day/night statistics, including interval boundary detection.

use rayon::prelude::*;

use crate::error::SunError;
use crate::geo::Location;
use crate::julian::CalendarDate;
use crate::solar::{PolarMarker, SolarCalc, SolarEvent};
use crate::time::seconds_to_hm;

// ===================== CALENDAR HELPERS =====================

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a year, 365 or 366.
pub fn year_length(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Days per month for a year.
pub fn month_lengths(year: i32) -> [u32; 12] {
    let feb = if is_leap_year(year) { 29 } else { 28 };
    [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
}

/// All calendar days of a year, in day-of-year order.
pub fn days_of_year(year: i32) -> Vec<CalendarDate> {
    let mut days = Vec::with_capacity(year_length(year) as usize);
    for (m, len) in month_lengths(year).iter().enumerate() {
        for d in 1..=*len {
            days.push(CalendarDate::new(year, m as u32 + 1, d));
        }
    }
    days
}

// ===================== TYPES =====================

/// Rounded length of one day's daylight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDuration {
    /// Sunset minus sunrise, rounded to the minute (24:00 at the saturation
    /// boundary).
    Daylight {
        /// Whole hours, 0-24.
        hours: u32,
        /// Whole minutes, 0-59.
        minutes: u32,
    },
    /// No duration exists; tagged with the polar condition that applied.
    NotCalculable(PolarMarker),
}

/// One day of the yearly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// The day's solar event, in UTC.
    pub event: SolarEvent,
    /// Daylight duration derived from the event.
    pub duration: DayDuration,
}

impl DayRecord {
    /// Build a record for one day, deriving the duration from the event.
    pub fn new(month: u32, day: u32, event: SolarEvent) -> Self {
        let duration = match event {
            SolarEvent::RiseSet { rise, set } => {
                let (hours, minutes) = seconds_to_hm((set - rise).num_seconds());
                DayDuration::Daylight { hours, minutes }
            }
            SolarEvent::PolarDay => DayDuration::NotCalculable(PolarMarker::PolarDay),
            SolarEvent::PolarNight => DayDuration::NotCalculable(PolarMarker::PolarNight),
        };
        Self { month, day, event, duration }
    }

    fn is_marker(&self, marker: PolarMarker) -> bool {
        self.event.marker() == Some(marker)
    }
}

/// A (month, day) pair bounding a polar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Derived statistics for a full year at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummary {
    /// Number of polar-night days.
    pub polar_night_days: usize,
    /// Number of polar-day days.
    pub polar_day_days: usize,
    /// (begin, end) of the polar-night interval, if any.
    pub polar_night: Option<(MonthDay, MonthDay)>,
    /// (begin, end) of the polar-day interval, if any.
    pub polar_day: Option<(MonthDay, MonthDay)>,
}

// ===================== YEAR TABLE =====================

/// The ordered day-of-year sequence of records for one (location, year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTable {
    /// Year the table covers.
    pub year: i32,
    /// One record per calendar day, in day-of-year order.
    pub records: Vec<DayRecord>,
}

impl YearTable {
    /// Compute the table for every day of a year.
    ///
    /// Each day is independent, so the per-day solar computations run as a
    /// data-parallel map; results are collected back in day-of-year order
    /// before any boundary detection.
    pub fn build(location: Location, year: i32) -> Result<Self, SunError> {
        let calc = SolarCalc::new(location);
        let records = days_of_year(year)
            .into_par_iter()
            .map(|date| Ok(DayRecord::new(date.month, date.day, calc.solar_event(date)?)))
            .collect::<Result<Vec<_>, SunError>>()?;
        Ok(Self { year, records })
    }

    /// Counts of (polar-night, polar-day) days in the year.
    pub fn polar_counts(&self) -> (usize, usize) {
        let nights = self.records.iter().filter(|r| r.is_marker(PolarMarker::PolarNight)).count();
        let days = self.records.iter().filter(|r| r.is_marker(PolarMarker::PolarDay)).count();
        (nights, days)
    }

    /// Indices of boundary days for a marker.
    ///
    /// A boundary day belongs to the marker set while one of its neighbors
    /// does not; the first and last index of the year are boundaries whenever
    /// they belong to the set, since the adjacent day lies outside the table.
    fn boundary_indices(&self, marker: PolarMarker) -> Vec<usize> {
        let n = self.records.len();
        let mut indices = Vec::new();
        for i in 0..n {
            if !self.records[i].is_marker(marker) {
                continue;
            }
            let edge = i == 0
                || i == n - 1
                || !self.records[i - 1].is_marker(marker)
                || !self.records[i + 1].is_marker(marker);
            if edge {
                indices.push(i);
            }
        }
        indices
    }

    /// The (begin, end) of the polar interval for a marker, if one exists.
    ///
    /// Two boundaries mean a single interval inside the year. Four mean the
    /// interval wraps the year boundary and shows up as a piece at each end:
    /// the reported interval then begins at the third boundary (start of the
    /// non-wrapped piece) and ends at the second (end of the wrapped piece).
    ///
    /// # Errors
    /// [`SunError::InconsistentIntervalState`] for any other boundary count.
    pub fn polar_interval(
        &self,
        marker: PolarMarker,
    ) -> Result<Option<(MonthDay, MonthDay)>, SunError> {
        let md = |i: usize| MonthDay { month: self.records[i].month, day: self.records[i].day };
        let indices = self.boundary_indices(marker);
        match indices.as_slice() {
            [] => Ok(None),
            [begin, end] => Ok(Some((md(*begin), md(*end)))),
            [_, end, begin, _] => Ok(Some((md(*begin), md(*end)))),
            other => Err(SunError::InconsistentIntervalState {
                marker: match marker {
                    PolarMarker::PolarDay => "polar day",
                    PolarMarker::PolarNight => "polar night",
                },
                year: self.year,
                count: other.len(),
            }),
        }
    }

    /// Derive the year summary: counts and interval bounds for both markers.
    pub fn summary(&self) -> Result<YearSummary, SunError> {
        let (polar_night_days, polar_day_days) = self.polar_counts();
        Ok(YearSummary {
            polar_night_days,
            polar_day_days,
            polar_night: self.polar_interval(PolarMarker::PolarNight)?,
            polar_day: self.polar_interval(PolarMarker::PolarDay)?,
        })
    }
}

// ===================== TESTS =====================
