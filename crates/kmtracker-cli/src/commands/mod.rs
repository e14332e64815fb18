//! Subcommand implementations.

pub mod account;
pub mod reports;
pub mod trips;

use anyhow::Result;

use crate::cli::{ApiArgs, Commands};
use crate::session::CliSession;

pub async fn handle(command: Commands, api: &ApiArgs) -> Result<()> {
    let mut session = CliSession::open(api)?;

    let result = match command {
        Commands::Login(args) => account::login::run(args, &session).await,
        Commands::Register(args) => account::register::run(args, &session).await,
        Commands::Logout => account::logout::run(&session).await,
        Commands::Whoami(args) => account::whoami::run(args, &session).await,
        Commands::Profile(args) => account::profile::run(args, &session).await,
        Commands::Password(args) => account::password::run(args, &session).await,
        Commands::Refresh => account::refresh::run(&session).await,
        Commands::Trips(cmd) => trips::handle(cmd, &session).await,
        Commands::Reports(cmd) => reports::handle(cmd, &session).await,
    };

    session.report_ended();
    result
}
