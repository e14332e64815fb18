//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let user = session
        .client
        .profile()
        .await
        .context("Failed to fetch profile")?;

    if args.json {
        return output::json_pretty(&user);
    }

    super::print_user(&user);
    output::field("API", session.client.base_url().as_str());

    Ok(())
}
