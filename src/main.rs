use chrono::{Datelike, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;
use clap::Parser;

mod cli;
mod logging;

use cli::Args;
use suntable::time::{convert, format_hm, parse_timezone, resolve_timezone, system_timezone};
use suntable::year::DayDuration;
use suntable::{
    CalendarDate, DayRecord, Location, MonthDay, SolarCalc, SolarEvent, TimetableExport, YearTable,
};

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tz: Tz = match args.timezone.as_str() {
        "system" => system_timezone(),
        "location" => resolve_timezone(args.longitude, args.latitude),
        other => parse_timezone(other)?,
    };
    let elsewhere = args.elsewhere.as_deref().map(parse_timezone).transpose()?;

    let location = Location::new(args.longitude, args.latitude, args.altitude)?;

    // Single-day report
    if let Some(date_str) = &args.date {
        let anchor = Utc::now().with_timezone(&tz);
        let parsed = parse_date_string(date_str, anchor, Dialect::Us)?;
        let date = CalendarDate::new(parsed.year(), parsed.month(), parsed.day());
        print_day(location, date, tz);
        return Ok(());
    }

    // Full-year table
    let year = args.year.unwrap_or_else(|| Utc::now().with_timezone(&tz).year());
    let table = YearTable::build(location, year)?;
    let export = TimetableExport::new(table, args.place.clone(), tz, elsewhere);

    match args.out.as_deref() {
        Some(dir) => {
            print_summary(&args, export.table(), tz, year)?;
            let path = match args.format.as_str() {
                "json" => export.register_json(dir, None)?,
                "csv" => export.register_csv(dir, None)?,
                _ => unreachable!(),
            };
            println!("1 file : {}", path);
        }
        None => match args.format.as_str() {
            "json" => println!("{}", export.to_json()?),
            "csv" => print!("{}", export.to_csv()),
            _ => unreachable!(),
        },
    }

    Ok(())
}

// ===================== REPORTS =====================

fn print_day(location: Location, date: CalendarDate, tz: Tz) {
    let calc = SolarCalc::new(location);
    println!(
        "Location : lat={:.6}, lon={:.6}, alt={:.1}m",
        location.latitude(),
        location.longitude(),
        location.altitude()
    );
    println!("Timezone : {}", tz);
    println!("Date     : {}", date);
    println!();

    match calc.solar_event(date) {
        Ok(SolarEvent::RiseSet { rise, set }) => {
            println!("Sunrise : {} UTC | {}", rise.format("%H:%M"), convert(rise, tz));
            println!("Sunset  : {} UTC | {}", set.format("%H:%M"), convert(set, tz));
            let record = DayRecord::new(date.month, date.day, SolarEvent::RiseSet { rise, set });
            if let DayDuration::Daylight { hours, minutes } = record.duration {
                println!("Daylight: {}", format_hm(hours, minutes));
            }
        }
        Ok(event) => {
            // marker() is always Some for the non-RiseSet variants
            if let Some(marker) = event.marker() {
                println!("{} : the sun does not cross the horizon today", marker.label());
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn print_summary(
    args: &Args,
    table: &YearTable,
    tz: Tz,
    year: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = table.summary()?;
    println!("Location : lat={:.6}, lon={:.6}", args.latitude, args.longitude);
    println!("Timezone : {}", tz);
    println!("Year     : {} ({} days)", year, table.records.len());
    println!("Polar night : {} days, {}", summary.polar_night_days, interval(summary.polar_night));
    println!("Polar day   : {} days, {}", summary.polar_day_days, interval(summary.polar_day));
    Ok(())
}

fn interval(bounds: Option<(MonthDay, MonthDay)>) -> String {
    match bounds {
        Some((begin, end)) => format!("{} to {}", begin, end),
        None => "no interval this year".to_string(),
    }
}
