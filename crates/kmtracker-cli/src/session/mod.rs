//! Session wiring for CLI commands.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast;

use kmtracker_http::{ApiClient, ClientConfig, EndReason, SessionEvent};

use crate::cli::ApiArgs;
use crate::output;

use self::storage::FileCredentialStore;

/// An API client bound to the on-disk credential store.
pub struct CliSession {
    pub client: ApiClient,
    events: broadcast::Receiver<SessionEvent>,
}

impl CliSession {
    pub fn open(api: &ApiArgs) -> Result<Self> {
        let store = FileCredentialStore::from_env()?;
        tracing::debug!(path = %store.path().display(), "Using credentials file");

        let config =
            ClientConfig::new(api.url.clone()).with_timeout(Duration::from_secs(api.timeout_secs));
        let client =
            ApiClient::new(config, Arc::new(store)).context("Failed to create API client")?;
        let events = client.subscribe();

        Ok(Self { client, events })
    }

    /// Fail early when no credentials are stored.
    pub fn require_login(&self) -> Result<()> {
        if !self.client.is_authenticated() {
            anyhow::bail!("No active session. Run 'kmtracker login' first.");
        }
        Ok(())
    }

    /// Tell the user if the session ended during the command.
    ///
    /// Logout ends the session deliberately and is not reported.
    pub fn report_ended(&mut self) {
        let mut ended = false;
        while let Ok(SessionEvent::Ended { reason }) = self.events.try_recv() {
            ended |= reason != EndReason::LoggedOut;
        }
        if ended {
            output::warning("Your session has ended. Run 'kmtracker login' to sign in again.");
        }
    }
}
