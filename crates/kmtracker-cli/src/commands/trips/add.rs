//! Add trip command implementation.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use colored::Colorize;

use kmtracker_core::model::TripRequest;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Start address
    #[arg(long)]
    pub from: String,

    /// Destination address
    #[arg(long)]
    pub to: String,

    /// Business purpose of the trip
    #[arg(long)]
    pub purpose: String,

    /// Trip date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Distance in km. Calculated from the addresses when omitted.
    #[arg(long)]
    pub distance: Option<f64>,

    /// Print the created trip as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AddArgs, session: &CliSession) -> Result<()> {
    let (distance_km, is_manual) = match args.distance {
        Some(distance) => (distance, true),
        None => {
            eprintln!("{}", "Calculating distance...".dimmed());
            let estimate = session
                .client
                .calculate_distance(&args.from, &args.to)
                .await
                .context("Failed to calculate distance")?;
            (estimate.distance_km, false)
        }
    };

    let request = TripRequest {
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        start_address: args.from,
        end_address: args.to,
        distance_km,
        purpose: args.purpose,
        is_manual,
    };

    let trip = session
        .client
        .create_trip(&request)
        .await
        .context("Failed to create trip")?;

    if args.json {
        return output::json_pretty(&trip);
    }

    output::success("Trip recorded");
    output::trip_line(&trip);

    Ok(())
}
