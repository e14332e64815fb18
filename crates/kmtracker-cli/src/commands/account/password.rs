//! Change password command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct PasswordArgs {
    /// Current password
    #[arg(long, env = "KMTRACKER_PASSWORD", hide_env_values = true)]
    pub old: String,

    /// New password
    #[arg(long, env = "KMTRACKER_NEW_PASSWORD", hide_env_values = true)]
    pub new: String,
}

pub async fn run(args: PasswordArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let message = session
        .client
        .change_password(&args.old, &args.new)
        .await
        .context("Failed to change password")?;

    output::success(&message);

    Ok(())
}
