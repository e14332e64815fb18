//! Monthly summary command implementation.

use anyhow::{Context, Result};
use clap::Args;

use super::MonthArgs;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Also list the month's trips
    #[arg(long)]
    pub trips: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SummaryArgs, session: &CliSession) -> Result<()> {
    let (year, month) = args.month.resolve();

    let summary = session
        .client
        .monthly_summary(year, month)
        .await
        .with_context(|| format!("Failed to fetch summary for {}-{:02}", year, month))?;

    if args.json {
        return output::json_pretty(&summary);
    }

    output::field("Month", &format!("{}-{:02}", summary.year, summary.month));
    output::field("Trips", &summary.trip_count.to_string());
    output::field("Total", &output::km(summary.total_km));

    if args.trips && !summary.trips.is_empty() {
        println!();
        for trip in &summary.trips {
            output::trip_line(trip);
        }
    }

    Ok(())
}
