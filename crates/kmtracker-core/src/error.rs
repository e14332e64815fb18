//! Error types for the kmtracker client.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol, and input validation failures. The authenticated request
//! pipeline resolves every call to either a value or one of these variants:
//!
//! | Outcome          | Variant                              |
//! |------------------|--------------------------------------|
//! | credential error | [`AuthError::InvalidCredentials`]    |
//! | expired session  | [`AuthError::SessionExpired`]        |
//! | refresh failure  | [`AuthError::RefreshFailed`]         |
//! | transport failure| [`Error::Transport`], [`Error::Protocol`] |

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// The unified error type for kmtracker operations.
///
/// Every variant is `Clone` so that a single refresh outcome can be handed to
/// all calls that were waiting on it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Session and credential errors.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses that are not session related.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (bad base URL, out of range month).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The credential store could not be read or written.
    #[error("credential storage error: {message}")]
    Storage { message: String },
}

impl Error {
    /// True for rejected login or registration attempts.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Error::Auth(AuthError::InvalidCredentials(_)))
    }

    /// True for a protected call that was rejected with an expired session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::Auth(AuthError::SessionExpired(_)))
    }

    /// True when the refresh endpoint itself failed.
    pub fn is_refresh_failure(&self) -> bool {
        matches!(self, Error::Auth(AuthError::RefreshFailed(_)))
    }

    /// True for timeouts, network errors and non-401 statuses.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Protocol(_))
    }

    /// HTTP status of the response that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol(e) => Some(e.status),
            Error::Auth(AuthError::InvalidCredentials(e) | AuthError::SessionExpired(e)) => {
                Some(e.status)
            }
            Error::Auth(AuthError::RefreshFailed(inner)) => inner.status(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication and session errors.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Login or registration was rejected.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(ProtocolError),

    /// A protected call was rejected and the session could not be renewed.
    #[error("session expired: {0}")]
    SessionExpired(ProtocolError),

    /// The refresh endpoint failed; the session has been invalidated.
    #[error("token refresh failed: {0}")]
    RefreshFailed(Box<Error>),

    /// The operation needs stored credentials and there are none.
    #[error("not authenticated")]
    NotAuthenticated,
}

/// A non-success HTTP response from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// The `detail` message from the server, if present.
    pub detail: Option<String>,
    /// Field-level validation messages, keyed by field name.
    pub fields: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        for (field, messages) in &self.fields {
            write!(f, " [{}: {}]", field, messages.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

/// Error body shape used by the backend.
///
/// Either `{"detail": "..."}` or a map of field names to message lists.
/// Non-list field values are kept as a single message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl ProtocolError {
    /// Create a new protocol error with only a status and optional detail.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self {
            status,
            detail,
            fields: BTreeMap::new(),
        }
    }

    /// Build a protocol error from a status code and raw response body.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
            return Self::new(status, None);
        };

        let fields = parsed
            .fields
            .into_iter()
            .map(|(field, value)| {
                let messages = match value {
                    serde_json::Value::Array(items) => items
                        .into_iter()
                        .map(|item| match item {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        })
                        .collect(),
                    serde_json::Value::String(s) => vec![s],
                    other => vec![other.to_string()],
                };
                (field, messages)
            })
            .collect();

        Self {
            status,
            detail: parsed.detail,
            fields,
        }
    }

    /// Check if this is the expired-session signature.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Input validation errors.
#[derive(Debug, Clone, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Month outside 1..=12.
    #[error("invalid month {value}: must be between 1 and 12")]
    Month { value: u32 },

    /// Token contains characters not allowed in an HTTP header.
    #[error("token is not a valid header value")]
    Token,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
