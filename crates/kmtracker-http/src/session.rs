//! Session invalidation and the "session ended" signal.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use kmtracker_core::CredentialStore;

/// Capacity of the session event channel. Events are rare; a lagging
/// subscriber only loses older duplicates.
const EVENT_CAPACITY: usize = 16;

/// Signals emitted to the hosting application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Stored credentials were cleared; leave the authenticated area.
    Ended { reason: EndReason },
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The refresh endpoint rejected the refresh token or failed.
    RefreshFailed,
    /// A call was rejected and no refresh token was stored.
    NoRefreshToken,
    /// A call was rejected again after being replayed with a fresh token.
    ReplayRejected,
    /// The user logged out.
    LoggedOut,
}

/// Whether the store holds a usable session. No expiry inspection is done.
pub fn is_authenticated(store: &dyn CredentialStore) -> bool {
    store.access_token().is_some()
}

/// Clears the credential store and broadcasts [`SessionEvent::Ended`].
#[derive(Clone)]
pub(crate) struct SessionInvalidator {
    store: Arc<dyn CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionInvalidator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// End the session. Always raises the signal, even if the store was
    /// already empty.
    pub fn invalidate(&self, reason: EndReason) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear credential store");
        }

        info!(?reason, "Session ended");

        // No subscribers is fine.
        let _ = self.events.send(SessionEvent::Ended { reason });
    }
}

impl std::fmt::Debug for SessionInvalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionInvalidator")
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmtracker_core::{CredentialPair, MemoryCredentialStore};
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn invalidate_clears_store_and_signals() {
        let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new("A1", "R1")));
        let invalidator = SessionInvalidator::new(store.clone());
        let mut events = invalidator.subscribe();

        assert!(is_authenticated(store.as_ref()));
        invalidator.invalidate(EndReason::RefreshFailed);

        assert!(!is_authenticated(store.as_ref()));
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::Ended {
                reason: EndReason::RefreshFailed
            }
        );
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn invalidate_signals_even_when_already_empty() {
        let store = Arc::new(MemoryCredentialStore::new());
        let invalidator = SessionInvalidator::new(store);
        let mut events = invalidator.subscribe();

        invalidator.invalidate(EndReason::NoRefreshToken);
        invalidator.invalidate(EndReason::NoRefreshToken);

        assert!(events.try_recv().is_ok());
        assert!(events.try_recv().is_ok());
    }

    #[test]
    fn invalidate_without_subscribers_does_not_panic() {
        let invalidator = SessionInvalidator::new(Arc::new(MemoryCredentialStore::new()));
        invalidator.invalidate(EndReason::LoggedOut);
    }
}
