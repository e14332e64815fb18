//! List reports command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use kmtracker_core::model::ReportQuery;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only reports for this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Only reports for this month (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, session: &CliSession) -> Result<()> {
    let query = ReportQuery {
        year: args.year,
        month: args.month,
        ordering: None,
        page: args.page,
    };

    let page = session
        .client
        .list_reports(&query)
        .await
        .context("Failed to list reports")?;

    if args.json {
        return output::json_pretty(&page);
    }

    if page.results.is_empty() {
        eprintln!("{}", "No reports found.".dimmed());
        return Ok(());
    }

    for report in &page.results {
        output::report_line(report);
    }

    Ok(())
}
