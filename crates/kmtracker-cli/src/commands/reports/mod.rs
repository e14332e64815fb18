//! Report subcommand implementations.

mod download;
mod generate;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ReportsCommand {
    #[command(subcommand)]
    pub command: ReportsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportsSubcommand {
    /// List generated reports
    List(list::ListArgs),

    /// Generate the report for a month
    Generate(generate::GenerateArgs),

    /// Download the PDF of a report
    Download(download::DownloadArgs),
}

pub async fn handle(cmd: ReportsCommand, session: &CliSession) -> Result<()> {
    session.require_login()?;

    match cmd.command {
        ReportsSubcommand::List(args) => list::run(args, session).await,
        ReportsSubcommand::Generate(args) => generate::run(args, session).await,
        ReportsSubcommand::Download(args) => download::run(args, session).await,
    }
}
