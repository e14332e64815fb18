//! Download report PDF command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Report id
    pub id: u64,

    /// Where to write the PDF (defaults to report-YYYY-MM.pdf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: DownloadArgs, session: &CliSession) -> Result<()> {
    let report = session
        .client
        .get_report(args.id)
        .await
        .with_context(|| format!("Failed to fetch report {}", args.id))?;

    eprintln!("{}", "Downloading PDF...".dimmed());

    let pdf = session
        .client
        .download_report_pdf(&report)
        .await
        .with_context(|| format!("Failed to download report {}", args.id))?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_file_name(report.year, report.month)));
    std::fs::write(&path, &pdf)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::success(&format!("Saved report to {}", path.display()));

    Ok(())
}

fn default_file_name(year: i32, month: u32) -> String {
    format!("report-{}-{:02}.pdf", year, month)
}
