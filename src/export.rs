//! Timetable Export Module
//!
//! Renders a year's day records into JSON or CSV tables with UTC, local and
//! arbitrary-zone columns, and persists them under a caller-supplied
//! directory. Outside the computation core: everything here is derived from
//! an already-built [`YearTable`].

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::SunError;
use crate::solar::{PolarMarker, SolarEvent};
use crate::time::{convert, format_hm};
use crate::year::{DayDuration, DayRecord, YearTable};

// ===================== ROW SCHEMA =====================

/// One table cell: an hour/minute number, or a polar marker tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Hour or minute value of a concrete instant.
    Num(u32),
    /// "PD" or "PN" on a day without the event.
    Tag(&'static str),
}

impl Cell {
    fn csv(&self) -> String {
        match self {
            Cell::Num(v) => v.to_string(),
            Cell::Tag(t) => format!("\"{}\"", t),
        }
    }
}

/// One exported day: UTC, local-zone and elsewhere-zone views of the same
/// underlying UTC event.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    pub hrise_utc: Cell,
    pub mrise_utc: Cell,
    pub hset_utc: Cell,
    pub mset_utc: Cell,
    pub verbose_rise_utc: String,
    pub verbose_set_utc: String,
    pub duration: String,
    pub hrise_local: Cell,
    pub mrise_local: Cell,
    pub hset_local: Cell,
    pub mset_local: Cell,
    pub verbose_rise_local: String,
    pub verbose_set_local: String,
    pub hrise_where: Cell,
    pub mrise_where: Cell,
    pub hset_where: Cell,
    pub mset_where: Cell,
    pub verbose_rise_where: String,
    pub verbose_set_where: String,
}

const CSV_HEADER: &str = "month,day,hrise_utc,mrise_utc,hset_utc,mset_utc,vrise_utc,vset_utc,\
duration,hrise_local,mrise_local,hset_local,mset_local,vrise_local,vset_local,\
hrise_where,mrise_where,hset_where,mset_where,vrise_where,vset_where";

/// Hour/minute cells and verbose string for one instant viewed in one zone.
fn instant_columns(utc: DateTime<Utc>, zone: Tz) -> (Cell, Cell, String) {
    let local = convert(utc, zone);
    (Cell::Num(local.hour()), Cell::Num(local.minute()), format_hm(local.hour(), local.minute()))
}

fn marker_columns(marker: PolarMarker) -> (Cell, Cell, String) {
    (Cell::Tag(marker.tag()), Cell::Tag(marker.tag()), marker.tag().to_string())
}

fn duration_column(record: &DayRecord) -> String {
    match record.duration {
        DayDuration::Daylight { hours, minutes } => format_hm(hours, minutes),
        DayDuration::NotCalculable(marker) => {
            format!("not calculable - {}", marker.label())
        }
    }
}

fn build_row(record: &DayRecord, local: Tz, elsewhere: Tz) -> TableRow {
    let views = |instant: Option<DateTime<Utc>>, marker: Option<PolarMarker>, zone: Tz| match (
        instant, marker,
    ) {
        (Some(utc), _) => instant_columns(utc, zone),
        // Exactly one of the two is populated per event.
        (None, Some(m)) => marker_columns(m),
        (None, None) => unreachable!("event carries either instants or a marker"),
    };

    let (rise, set) = match record.event {
        SolarEvent::RiseSet { rise, set } => (Some(rise), Some(set)),
        _ => (None, None),
    };
    let marker = record.event.marker();

    let (hrise_utc, mrise_utc, verbose_rise_utc) = views(rise, marker, Tz::UTC);
    let (hset_utc, mset_utc, verbose_set_utc) = views(set, marker, Tz::UTC);
    let (hrise_local, mrise_local, verbose_rise_local) = views(rise, marker, local);
    let (hset_local, mset_local, verbose_set_local) = views(set, marker, local);
    let (hrise_where, mrise_where, verbose_rise_where) = views(rise, marker, elsewhere);
    let (hset_where, mset_where, verbose_set_where) = views(set, marker, elsewhere);

    TableRow {
        month: record.month,
        day: record.day,
        hrise_utc,
        mrise_utc,
        hset_utc,
        mset_utc,
        verbose_rise_utc,
        verbose_set_utc,
        duration: duration_column(record),
        hrise_local,
        mrise_local,
        hset_local,
        mset_local,
        verbose_rise_local,
        verbose_set_local,
        hrise_where,
        mrise_where,
        hset_where,
        mset_where,
        verbose_rise_where,
        verbose_set_where,
    }
}

// ===================== EXPORT =====================

/// Renders one year table for a labelled place.
///
/// The local zone is an explicit configuration value, never ambient process
/// state; the "elsewhere" zone defaults to the local zone when unspecified.
#[derive(Debug, Clone)]
pub struct TimetableExport {
    table: YearTable,
    place_label: String,
    local: Tz,
    elsewhere: Tz,
}

impl TimetableExport {
    /// Build an export view of a year table.
    pub fn new(
        table: YearTable,
        place_label: impl Into<String>,
        local: Tz,
        elsewhere: Option<Tz>,
    ) -> Self {
        Self { table, place_label: place_label.into(), local, elsewhere: elsewhere.unwrap_or(local) }
    }

    /// The underlying year table.
    pub fn table(&self) -> &YearTable {
        &self.table
    }

    /// All rows of the table in day-of-year order.
    pub fn rows(&self) -> Vec<TableRow> {
        self.table.records.iter().map(|r| build_row(r, self.local, self.elsewhere)).collect()
    }

    /// Render the table as a JSON array.
    pub fn to_json(&self) -> Result<String, SunError> {
        serde_json::to_string(&self.rows()).map_err(|source| SunError::Serialize { source })
    }

    /// Render the table as CSV with a header line.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for row in self.rows() {
            let fields = [
                row.month.to_string(),
                row.day.to_string(),
                row.hrise_utc.csv(),
                row.mrise_utc.csv(),
                row.hset_utc.csv(),
                row.mset_utc.csv(),
                format!("\"{}\"", row.verbose_rise_utc),
                format!("\"{}\"", row.verbose_set_utc),
                format!("\"{}\"", row.duration),
                row.hrise_local.csv(),
                row.mrise_local.csv(),
                row.hset_local.csv(),
                row.mset_local.csv(),
                format!("\"{}\"", row.verbose_rise_local),
                format!("\"{}\"", row.verbose_set_local),
                row.hrise_where.csv(),
                row.mrise_where.csv(),
                row.hset_where.csv(),
                row.mset_where.csv(),
                format!("\"{}\"", row.verbose_rise_where),
                format!("\"{}\"", row.verbose_set_where),
            ];
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }

    /// Default file name: `{year}_{place_label}_sun_timetable.{ext}` with the
    /// label sanitized for file systems (spaces to `_`, apostrophes to `-`).
    pub fn default_file_name(&self, ext: &str) -> String {
        let label = self.place_label.replace(' ', "_").replace('\'', "-");
        format!("{}_{}_sun_timetable.{}", self.table.year, label, ext)
    }

    /// Write the JSON table under `dir`, returning the full path.
    ///
    /// # Errors
    /// [`SunError::InvalidExportPath`] if `dir` does not end in a path
    /// separator, or an I/O error from the write.
    pub fn register_json(&self, dir: &str, file_name: Option<&str>) -> Result<String, SunError> {
        let name = file_name.map_or_else(|| self.default_file_name("json"), str::to_string);
        let json = self.to_json()?;
        write_under(dir, &name, &json)
    }

    /// Write the CSV table under `dir`, returning the full path.
    pub fn register_csv(&self, dir: &str, file_name: Option<&str>) -> Result<String, SunError> {
        let name = file_name.map_or_else(|| self.default_file_name("csv"), str::to_string);
        write_under(dir, &name, &self.to_csv())
    }
}

fn write_under(dir: &str, name: &str, contents: &str) -> Result<String, SunError> {
    if !(dir.ends_with('/') || dir.ends_with('\\')) {
        return Err(SunError::InvalidExportPath { path: dir.to_string() });
    }
    let path = format!("{}{}", dir, name);
    std::fs::write(&path, contents)
        .map_err(|source| SunError::ExportIo { path: path.clone(), source })?;
    tracing::info!(path = %path, bytes = contents.len(), "wrote timetable");
    Ok(path)
}

// ===================== TESTS =====================
