//! Bearer token types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An access token for authenticated API requests.
///
/// Access tokens are short-lived bearer credentials sent in the
/// `Authorization` header of every protected call.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token for obtaining new access tokens.
///
/// Refresh tokens are longer-lived and used solely against the token refresh
/// endpoint.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh and logout requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The access/refresh pair held by a [`CredentialStore`](crate::CredentialStore).
///
/// Both halves are always written and cleared together. The wire and on-disk
/// form is `{"access": "...", "refresh": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: AccessToken::new(access),
            refresh: RefreshToken::new(refresh),
        }
    }

    /// Returns a copy with the access half replaced and the refresh half kept.
    pub fn with_access(&self, access: AccessToken) -> Self {
        Self {
            access,
            refresh: self.refresh.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn credential_pair_hides_both_tokens_in_debug() {
        let pair = CredentialPair::new("access_value", "refresh_value");
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("access_value"));
        assert!(!debug.contains("refresh_value"));
    }

    #[test]
    fn with_access_keeps_refresh_token() {
        let pair = CredentialPair::new("A1", "R1");
        let renewed = pair.with_access(AccessToken::new("A2"));
        assert_eq!(renewed.access.as_str(), "A2");
        assert_eq!(renewed.refresh.as_str(), "R1");
    }

    #[test]
    fn pair_serializes_as_flat_strings() {
        let pair = CredentialPair::new("A1", "R1");
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({"access": "A1", "refresh": "R1"}));
    }
}
