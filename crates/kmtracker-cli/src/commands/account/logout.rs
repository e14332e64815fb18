//! Logout command implementation.

use anyhow::Result;

use crate::output;
use crate::session::CliSession;

pub async fn run(session: &CliSession) -> Result<()> {
    if !session.client.is_authenticated() {
        output::success("Not logged in");
        return Ok(());
    }

    session.client.logout().await;
    output::success("Logged out");

    Ok(())
}
