//! Command-Line Interface Module
//!
//! Handles argument parsing and validation for the suntable binary.

use clap::Parser;

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude, env = "SUNTABLE_LATITUDE")]
    pub latitude: f64,

    /// Observer longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude, env = "SUNTABLE_LONGITUDE")]
    pub longitude: f64,

    /// Observer altitude above mean sea level in meters (>= 0)
    #[arg(long, default_value_t = 0.0, value_parser = parse_altitude, env = "SUNTABLE_ALTITUDE")]
    pub altitude: f64,

    /// Time zone for the local columns ("system", "location", or IANA name)
    #[arg(long, default_value = "system", env = "SUNTABLE_TIMEZONE")]
    pub timezone: String,

    /// Extra IANA zone for the "elsewhere" columns; defaults to the local zone
    #[arg(long)]
    pub elsewhere: Option<String>,

    /// Year for the timetable; defaults to the current year
    #[arg(long, allow_hyphen_values = true)]
    pub year: Option<i32>,

    /// Single-day mode: report rise/set for one date (e.g., "2020-06-21" or "today")
    #[arg(long)]
    pub date: Option<String>,

    /// Place label used in export file names (e.g., "Paris Notre-Dame")
    #[arg(long, default_value = "place", env = "SUNTABLE_PLACE")]
    pub place: String,

    /// Output format for the yearly table
    #[arg(long, default_value = "json", value_parser = ["json", "csv"])]
    pub format: String,

    /// Output directory ending in a path separator; prints to stdout if absent
    #[arg(long)]
    pub out: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_altitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if v < 0.0 {
        return Err(format!("Altitude must be >= 0 meters, got {}", v));
    }
    Ok(v)
}

// ===================== TESTS =====================
