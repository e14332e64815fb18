//! Refresh command implementation.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::output;
use crate::session::CliSession;

pub async fn run(session: &CliSession) -> Result<()> {
    session.require_login()?;

    eprintln!("{}", "Refreshing session...".dimmed());

    session
        .client
        .refresh_session()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");

    Ok(())
}
