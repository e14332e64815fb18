//! Session renewal after an expired-session failure.
//!
//! The coordinator decides, for every failed dispatch, whether the call may
//! be replayed with a renewed access token or whether the failure goes back
//! to the caller. Concurrent renewals are coalesced: the first call to fail
//! with a given access token refreshes it, and every other call that failed
//! with that same token waits for and shares the outcome.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use kmtracker_core::error::{AuthError, ProtocolError};
use kmtracker_core::{AccessToken, CredentialPair, CredentialStore, Error, Result};

use crate::endpoints::{RefreshRequest, RefreshResponse, TOKEN_REFRESH};
use crate::request::{ApiRequest, Attempt};
use crate::session::{EndReason, SessionInvalidator};
use crate::transport::Transport;

/// What to do with a failed dispatch.
#[derive(Debug)]
pub(crate) enum Recovery {
    /// Dispatch the call once more, as `attempt`, carrying `token`.
    Replay { attempt: Attempt, token: AccessToken },
    /// Return the error to the caller.
    Propagate(Error),
}

/// The most recent refresh and the access token it replaced.
#[derive(Debug)]
struct LastRefresh {
    replaced: AccessToken,
    outcome: Result<AccessToken>,
}

pub(crate) struct RefreshCoordinator {
    transport: Transport,
    store: Arc<dyn CredentialStore>,
    invalidator: SessionInvalidator,
    last: Mutex<Option<LastRefresh>>,
}

impl RefreshCoordinator {
    pub fn new(
        transport: Transport,
        store: Arc<dyn CredentialStore>,
        invalidator: SessionInvalidator,
    ) -> Self {
        Self {
            transport,
            store,
            invalidator,
            last: Mutex::new(None),
        }
    }

    /// Decide how to recover from `failure`.
    ///
    /// `sent_with` is the access token the failed dispatch carried.
    #[instrument(skip_all, fields(path = request.path(), ?attempt))]
    pub async fn recover(
        &self,
        request: &ApiRequest,
        attempt: Attempt,
        sent_with: Option<&AccessToken>,
        failure: Error,
    ) -> Recovery {
        let rejection = match failure {
            Error::Protocol(rejection) => rejection,
            // Timeouts and network errors never touch the session.
            other => return Recovery::Propagate(other),
        };

        if request.is_credential_exchange() {
            return Recovery::Propagate(credential_failure(rejection));
        }

        if !rejection.is_unauthorized() {
            return Recovery::Propagate(rejection.into());
        }

        let mut last = self.last.lock().await;

        let Some(next) = attempt.next() else {
            warn!("Replayed call rejected again");
            self.invalidate(&mut last, EndReason::ReplayRejected);
            return Recovery::Propagate(AuthError::SessionExpired(rejection).into());
        };

        // Another call already refreshed (or failed to refresh) this token.
        if let Some(previous) = (*last)
            .as_ref()
            .filter(|previous| Some(&previous.replaced) == sent_with)
        {
            debug!("Sharing outcome of completed refresh");
            return match &previous.outcome {
                Ok(token) => Recovery::Replay {
                    attempt: next,
                    token: token.clone(),
                },
                Err(e) => Recovery::Propagate(e.clone()),
            };
        }

        let Some(pair) = self.store.load() else {
            info!("No refresh token stored");
            self.invalidate(&mut last, EndReason::NoRefreshToken);
            return Recovery::Propagate(AuthError::SessionExpired(rejection).into());
        };

        // The store moved on since this call was dispatched (refresh by a
        // caller outside this coordinator, or a new login).
        if Some(&pair.access) != sent_with {
            debug!("Replaying with newer stored token");
            return Recovery::Replay {
                attempt: next,
                token: pair.access,
            };
        }

        let outcome = self.perform(&pair).await;
        *last = Some(LastRefresh {
            replaced: pair.access,
            outcome: outcome.clone(),
        });

        match outcome {
            Ok(token) => Recovery::Replay {
                attempt: next,
                token,
            },
            Err(e) => Recovery::Propagate(e),
        }
    }

    /// Refresh the stored session unconditionally.
    pub async fn refresh_now(&self) -> Result<AccessToken> {
        let mut last = self.last.lock().await;
        let pair = self.store.load().ok_or(AuthError::NotAuthenticated)?;

        let outcome = self.perform(&pair).await;
        *last = Some(LastRefresh {
            replaced: pair.access,
            outcome: outcome.clone(),
        });
        outcome
    }

    /// End the session after any refresh in flight has finished.
    ///
    /// The remembered outcome is dropped, so a late failure of a call sent
    /// before this point cannot replay with a token from the ended session.
    pub async fn end_session(&self, reason: EndReason) {
        let mut last = self.last.lock().await;
        self.invalidate(&mut last, reason);
    }

    fn invalidate(&self, last: &mut Option<LastRefresh>, reason: EndReason) {
        *last = None;
        self.invalidator.invalidate(reason);
    }

    /// Call the refresh endpoint with the stored refresh token. Must be
    /// called with `last` locked.
    ///
    /// On success only the access half of the store is replaced, and only if
    /// the store still holds `pair`. On failure the session is invalidated
    /// and the refresh error is returned.
    async fn perform(&self, pair: &CredentialPair) -> Result<AccessToken> {
        info!("Refreshing access token");

        let request = ApiRequest::post(TOKEN_REFRESH).json(&RefreshRequest {
            refresh: pair.refresh.as_str(),
        })?;

        match self.transport.dispatch::<RefreshResponse>(&request).await {
            Ok(response) => {
                let access = AccessToken::new(response.access);
                match self.store.replace(pair, &pair.with_access(access.clone())) {
                    Ok(true) => {
                        debug!("Access token refreshed");
                        Ok(access)
                    }
                    Ok(false) => self.superseded(),
                    Err(e) => {
                        warn!(error = %e, "Failed to persist refreshed access token");
                        Ok(access)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                self.invalidator.invalidate(EndReason::RefreshFailed);
                Err(AuthError::RefreshFailed(Box::new(e)).into())
            }
        }
    }

    /// The store changed while the refresh was running: a new login wins,
    /// and a cleared store stays cleared.
    fn superseded(&self) -> Result<AccessToken> {
        match self.store.load() {
            Some(current) => {
                debug!("Credentials replaced during refresh, keeping newer pair");
                Ok(current.access)
            }
            None => {
                info!("Session ended during refresh, discarding renewed token");
                Err(AuthError::NotAuthenticated.into())
            }
        }
    }
}

/// Login and registration rejections are credential errors; anything else
/// from those endpoints passes through unchanged.
fn credential_failure(rejection: ProtocolError) -> Error {
    match rejection.status {
        400 | 401 => AuthError::InvalidCredentials(rejection).into(),
        _ => rejection.into(),
    }
}
