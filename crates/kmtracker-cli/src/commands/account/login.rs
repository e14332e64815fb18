//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use kmtracker_core::Credentials;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "KMTRACKER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, session: &CliSession) -> Result<()> {
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let response = session
        .client
        .login(credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    super::print_user(&response.user);
    output::field("API", session.client.base_url().as_str());

    Ok(())
}
