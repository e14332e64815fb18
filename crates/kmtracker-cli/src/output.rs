//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use kmtracker_core::model::{Report, Trip};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a kilometre figure the way the backend stores it.
pub fn km(value: f64) -> String {
    format!("{:.2} km", value)
}

/// Print one trip as a single line.
pub fn trip_line(trip: &Trip) {
    println!(
        "{:>6}  {}  {:>10}  {} → {}  {}",
        trip.id.to_string().dimmed(),
        trip.date,
        km(trip.distance_km),
        trip.start_address,
        trip.end_address,
        trip.purpose.dimmed(),
    );
}

/// Print one report as a single line.
pub fn report_line(report: &Report) {
    println!(
        "{:>6}  {}-{:02}  {:>10}  {} trips  {}",
        report.id.to_string().dimmed(),
        report.year,
        report.month,
        km(report.total_km),
        report.trip_count,
        report.pdf_file.as_deref().unwrap_or("-").dimmed(),
    );
}
