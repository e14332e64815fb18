//! Call descriptors.

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;

use kmtracker_core::Result;
use kmtracker_core::error::InvalidInputError;

use crate::endpoints::{LOGIN, REGISTER};

/// A pending outgoing call: target path, method, headers, query and body.
///
/// The descriptor itself is never mutated by the pipeline. Each dispatch
/// works on an augmented copy, and whether the call has already been
/// replayed is tracked by [`Attempt`], not by a flag on the request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request for `path`, relative to the configured base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(to_value(body)?);
        Ok(self)
    }

    /// Attach query parameters. `params` must serialize to a flat object.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        self.query = Some(to_value(params)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub(crate) fn query_params(&self) -> Option<&serde_json::Value> {
        self.query.as_ref()
    }

    pub(crate) fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// True for login and registration, whose failures are credential
    /// problems rather than expired sessions.
    pub fn is_credential_exchange(&self) -> bool {
        self.path == LOGIN || self.path == REGISTER
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| {
        InvalidInputError::Other {
            message: format!("failed to serialize request: {}", e),
        }
        .into()
    })
}

/// Which dispatch of a logical call is in progress.
///
/// A call starts as [`Attempt::Initial`]; after a successful token refresh it
/// is dispatched exactly once more as [`Attempt::Replay`]. There is no phase
/// after `Replay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Initial,
    Replay,
}

impl Attempt {
    /// The phase of the next dispatch, or `None` if the call may not be
    /// replayed again.
    pub fn next(self) -> Option<Attempt> {
        match self {
            Attempt::Initial => Some(Attempt::Replay),
            Attempt::Replay => None,
        }
    }
}
