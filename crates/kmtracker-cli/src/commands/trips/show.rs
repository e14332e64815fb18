//! Show trip command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Trip id
    pub id: u64,

    /// Print the trip as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs, session: &CliSession) -> Result<()> {
    let trip = session
        .client
        .get_trip(args.id)
        .await
        .with_context(|| format!("Failed to fetch trip {}", args.id))?;

    if args.json {
        return output::json_pretty(&trip);
    }

    output::field("Id", &trip.id.to_string());
    output::field("Date", &trip.date.to_string());
    output::field("From", &trip.start_address);
    output::field("To", &trip.end_address);
    output::field("Distance", &output::km(trip.distance_km));
    output::field("Purpose", &trip.purpose);
    output::field("Entry", if trip.is_manual { "manual" } else { "calculated" });

    Ok(())
}
