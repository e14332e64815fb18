//! Credential store trait.

use std::sync::{PoisonError, RwLock};

use crate::{AccessToken, CredentialPair, Result};

/// Holds the current access/refresh pair.
///
/// A store is a dumb key-value holder: it performs no expiry or integrity
/// validation. Implementations must write and clear both tokens together so
/// that readers never observe a pair with only one half set.
///
/// Methods are synchronous; they run immediately before every dispatch.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored pair, if any.
    fn load(&self) -> Option<CredentialPair>;

    /// Persist both tokens, replacing any previous pair.
    fn save(&self, pair: &CredentialPair) -> Result<()>;

    /// Remove both tokens. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;

    /// Returns only the access half of the stored pair.
    fn access_token(&self) -> Option<AccessToken> {
        self.load().map(|pair| pair.access)
    }

    /// Save `next` only if the store still holds `current`.
    ///
    /// Returns `false` without writing when the pair was cleared or replaced
    /// in the meantime.
    fn replace(&self, current: &CredentialPair, next: &CredentialPair) -> Result<bool> {
        if self.load().as_ref() != Some(current) {
            return Ok(false);
        }
        self.save(next)?;
        Ok(true)
    }
}

/// A process-local store, used for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    pair: RwLock<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `pair`.
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            pair: RwLock::new(Some(pair)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<CredentialPair> {
        self.pair
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, pair: &CredentialPair) -> Result<()> {
        *self.pair.write().unwrap_or_else(PoisonError::into_inner) = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.pair.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn replace(&self, current: &CredentialPair, next: &CredentialPair) -> Result<bool> {
        let mut pair = self.pair.write().unwrap_or_else(PoisonError::into_inner);
        if pair.as_ref() != Some(current) {
            return Ok(false);
        }
        *pair = Some(next.clone());
        Ok(true)
    }
}
