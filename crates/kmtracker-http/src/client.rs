//! The authenticated API client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

use kmtracker_core::{ApiUrl, CredentialStore, Result};

use crate::augment::{augment, with_token};
use crate::config::ClientConfig;
use crate::refresh::{Recovery, RefreshCoordinator};
use crate::request::{ApiRequest, Attempt};
use crate::session::{self, EndReason, SessionEvent, SessionInvalidator};
use crate::transport::{Transport, decode};

/// Client for the kmtracker API.
///
/// All calls flow through one pipeline: the stored access token is attached,
/// the call is dispatched, and an expired-session failure triggers a single
/// token refresh and replay. Login and registration never trigger a refresh.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and share one
/// credential store and one refresh coordinator, so concurrent calls that
/// hit an expired token cause a single refresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Transport,
    store: Arc<dyn CredentialStore>,
    invalidator: SessionInvalidator,
    coordinator: RefreshCoordinator,
}

impl ApiClient {
    /// Create a client that reads and writes credentials through `store`.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let transport = Transport::new(&config)?;
        let invalidator = SessionInvalidator::new(store.clone());
        let coordinator =
            RefreshCoordinator::new(transport.clone(), store.clone(), invalidator.clone());

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                store,
                invalidator,
                coordinator,
            }),
        })
    }

    pub fn base_url(&self) -> &ApiUrl {
        self.inner.transport.base_url()
    }

    /// The credential store this client reads from.
    pub fn store(&self) -> &dyn CredentialStore {
        self.inner.store.as_ref()
    }

    /// Whether credentials are stored. Expiry is not inspected.
    pub fn is_authenticated(&self) -> bool {
        session::is_authenticated(self.store())
    }

    /// Receive [`SessionEvent`]s raised after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.invalidator.subscribe()
    }

    /// Run `request` through the authenticated pipeline and decode the
    /// response.
    ///
    /// The caller sees either the first dispatch's success, or the outcome of
    /// the single replay that follows a successful refresh, or the error that
    /// ended the pipeline. The original `401` is never returned when a replay
    /// happened.
    pub async fn execute<R>(&self, request: ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        decode(&self.execute_raw(request).await?)
    }

    /// Like [`execute`](Self::execute), but returns the undecoded response
    /// body. Used for file downloads.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn execute_raw(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let mut prepared = augment(&request, self.store())?;
        let mut attempt = Attempt::Initial;

        loop {
            let failure = match self.inner.transport.send(&prepared.request).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };

            match self
                .inner
                .coordinator
                .recover(&request, attempt, prepared.token.as_ref(), failure)
                .await
            {
                Recovery::Replay {
                    attempt: next,
                    token,
                } => {
                    debug!(?next, "Replaying call with renewed token");
                    attempt = next;
                    prepared = with_token(&request, Some(token))?;
                }
                Recovery::Propagate(e) => return Err(e),
            }
        }
    }

    /// Dispatch `request` once with the stored token, without session
    /// recovery.
    pub(crate) async fn dispatch_once<R>(&self, request: ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let prepared = augment(&request, self.store())?;
        self.inner.transport.dispatch(&prepared.request).await
    }

    /// Renew the access token now, outside of any failing call.
    ///
    /// On failure the session is invalidated, exactly as for a refresh
    /// triggered by an expired call.
    pub async fn refresh_session(&self) -> Result<()> {
        self.inner.coordinator.refresh_now().await.map(|_| ())
    }

    /// Clear credentials and raise [`SessionEvent::Ended`] once any refresh
    /// in flight has settled.
    pub(crate) async fn end_session(&self, reason: EndReason) {
        self.inner.coordinator.end_session(reason).await;
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", self.base_url())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
