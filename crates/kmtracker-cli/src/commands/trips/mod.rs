//! Trip subcommand implementations.

mod add;
mod delete;
mod edit;
mod list;
mod show;
mod summary;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};

use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct TripsCommand {
    #[command(subcommand)]
    pub command: TripsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TripsSubcommand {
    /// List recorded trips
    List(list::ListArgs),

    /// Show a single trip
    Show(show::ShowArgs),

    /// Record a trip
    Add(add::AddArgs),

    /// Change fields of a recorded trip
    Edit(edit::EditArgs),

    /// Delete a trip
    Delete(delete::DeleteArgs),

    /// Total kilometres for a month
    Summary(summary::SummaryArgs),
}

pub async fn handle(cmd: TripsCommand, session: &CliSession) -> Result<()> {
    session.require_login()?;

    match cmd.command {
        TripsSubcommand::List(args) => list::run(args, session).await,
        TripsSubcommand::Show(args) => show::run(args, session).await,
        TripsSubcommand::Add(args) => add::run(args, session).await,
        TripsSubcommand::Edit(args) => edit::run(args, session).await,
        TripsSubcommand::Delete(args) => delete::run(args, session).await,
        TripsSubcommand::Summary(args) => summary::run(args, session).await,
    }
}

/// Year and month, defaulting to the current local month.
#[derive(Args, Debug, Clone, Copy)]
pub struct MonthArgs {
    /// Year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Month 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

impl MonthArgs {
    pub fn resolve(self) -> (i32, u32) {
        let today = Local::now().date_naive();
        (
            self.year.unwrap_or(today.year()),
            self.month.unwrap_or(today.month()),
        )
    }
}
