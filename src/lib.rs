//! # suntable
//!
//! Sunrise and sunset times from a closed-form low-precision solar model
//! (about one minute of accuracy), with first-class polar day/night handling
//! and full-year timetable aggregation and export.
//!
//! The computation core is pure: [`solar::SolarCalc`] maps a validated
//! [`geo::Location`] and a [`julian::CalendarDate`] to a
//! [`solar::SolarEvent`], always in UTC. Zone views, yearly tables
//! ([`year::YearTable`]) and JSON/CSV exports ([`export::TimetableExport`])
//! are derived layers on top.
//!
//! ```no_run
//! use suntable::{CalendarDate, Location, SolarCalc, SolarEvent};
//!
//! let paris = Location::new(2.35, 48.85, 35.0)?;
//! let calc = SolarCalc::new(paris);
//! match calc.solar_event(CalendarDate::new(2020, 6, 21))? {
//!     SolarEvent::RiseSet { rise, set } => println!("{} / {}", rise, set),
//!     SolarEvent::PolarDay => println!("the sun never sets"),
//!     SolarEvent::PolarNight => println!("the sun never rises"),
//! }
//! # Ok::<(), suntable::SunError>(())
//! ```

pub mod error;
pub mod export;
pub mod geo;
pub mod julian;
pub mod solar;
pub mod time;
pub mod year;

pub use error::SunError;
pub use export::TimetableExport;
pub use geo::Location;
pub use julian::CalendarDate;
pub use solar::{PolarMarker, SolarCalc, SolarEvent};
pub use year::{DayDuration, DayRecord, MonthDay, YearSummary, YearTable};
