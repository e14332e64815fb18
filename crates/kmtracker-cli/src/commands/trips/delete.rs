//! Delete trip command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Trip id
    pub id: u64,
}

pub async fn run(args: DeleteArgs, session: &CliSession) -> Result<()> {
    session
        .client
        .delete_trip(args.id)
        .await
        .with_context(|| format!("Failed to delete trip {}", args.id))?;

    output::success(&format!("Deleted trip {}", args.id));

    Ok(())
}
