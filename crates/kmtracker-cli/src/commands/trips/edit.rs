//! Edit trip command implementation.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use kmtracker_core::model::TripPatch;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Trip id
    pub id: u64,

    /// New start address
    #[arg(long)]
    pub from: Option<String>,

    /// New destination address
    #[arg(long)]
    pub to: Option<String>,

    /// New business purpose
    #[arg(long)]
    pub purpose: Option<String>,

    /// New trip date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// New distance in km; marks the trip as a manual entry
    #[arg(long)]
    pub distance: Option<f64>,

    /// Print the updated trip as JSON
    #[arg(long)]
    pub json: bool,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.purpose.is_none()
            && self.date.is_none()
            && self.distance.is_none()
    }

    fn patch(&self) -> TripPatch {
        TripPatch {
            date: self.date,
            start_address: self.from.clone(),
            end_address: self.to.clone(),
            distance_km: self.distance,
            purpose: self.purpose.clone(),
            is_manual: self.distance.map(|_| true),
        }
    }
}

pub async fn run(args: EditArgs, session: &CliSession) -> Result<()> {
    if args.is_empty() {
        bail!("Nothing to change. Pass at least one of --from, --to, --purpose, --date, --distance.");
    }
    let patch = args.patch();

    let trip = session
        .client
        .patch_trip(args.id, &patch)
        .await
        .with_context(|| format!("Failed to update trip {}", args.id))?;

    if args.json {
        return output::json_pretty(&trip);
    }

    output::success(&format!("Updated trip {}", trip.id));
    output::trip_line(&trip);

    Ok(())
}
