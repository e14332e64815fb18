//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use kmtracker_core::model::RegisterRequest;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "KMTRACKER_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Employer shown on generated reports
    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn run(args: RegisterArgs, session: &CliSession) -> Result<()> {
    let mut request = RegisterRequest::new(args.username, args.email, args.password);
    request.first_name = args.first_name;
    request.last_name = args.last_name;
    request.company = args.company;
    request.phone = args.phone;

    eprintln!("{}", "Creating account...".dimmed());

    let response = session
        .client
        .register(&request)
        .await
        .context("Failed to register")?;

    output::success("Account created");
    println!();
    super::print_user(&response.user);

    Ok(())
}
