//! Generate report command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands::trips::MonthArgs;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Print the generated report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: GenerateArgs, session: &CliSession) -> Result<()> {
    let (year, month) = args.month.resolve();

    eprintln!("{}", format!("Generating report for {}-{:02}...", year, month).dimmed());

    let response = session
        .client
        .generate_report(year, month)
        .await
        .context("Failed to generate report")?;

    if args.json {
        return output::json_pretty(&response.report);
    }

    output::success("Report generated");
    output::report_line(&response.report);
    if let Some(url) = &response.pdf_url {
        output::field("PDF", url);
    }

    Ok(())
}
