//! List trips command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use kmtracker_core::model::TripQuery;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Match addresses or purpose
    #[arg(long)]
    pub search: Option<String>,

    /// Only trips on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only trips on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Sort field, e.g. `-date` or `distance_km`
    #[arg(long)]
    pub ordering: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, session: &CliSession) -> Result<()> {
    let query = TripQuery {
        search: args.search,
        date_after: args.from,
        date_before: args.to,
        ordering: args.ordering,
        page: args.page,
    };

    let page = session
        .client
        .list_trips(&query)
        .await
        .context("Failed to list trips")?;

    if args.json {
        return output::json_pretty(&page);
    }

    if page.results.is_empty() {
        eprintln!("{}", "No trips found.".dimmed());
        return Ok(());
    }

    for trip in &page.results {
        output::trip_line(trip);
    }

    eprintln!();
    eprintln!("{}: {}", "Total trips".dimmed(), page.count);
    if page.has_next() {
        let next = args.page.unwrap_or(1) + 1;
        eprintln!("{}: --page {}", "More".dimmed(), next);
    }

    Ok(())
}
