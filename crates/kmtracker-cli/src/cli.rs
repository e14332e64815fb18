//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use kmtracker_core::ApiUrl;

use crate::commands::account::{LoginArgs, PasswordArgs, ProfileArgs, RegisterArgs, WhoamiArgs};
use crate::commands::reports::ReportsCommand;
use crate::commands::trips::TripsCommand;

/// Mileage tracking from the command line.
#[derive(Parser, Debug)]
#[command(name = "kmtracker")]
#[command(author, version = env!("KMTRACKER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to reach the API.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// API base URL
    #[arg(long = "api", env = "KMTRACKER_API", default_value = ApiUrl::DEFAULT, global = true)]
    pub url: ApiUrl,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),

    /// Create an account and log in with it
    Register(RegisterArgs),

    /// End the session and forget stored credentials
    Logout,

    /// Display the logged in user
    Whoami(WhoamiArgs),

    /// Update the logged in user's profile
    Profile(ProfileArgs),

    /// Change the account password
    Password(PasswordArgs),

    /// Renew the access token now
    Refresh,

    /// Trip operations
    Trips(TripsCommand),

    /// Monthly report operations
    Reports(ReportsCommand),
}
