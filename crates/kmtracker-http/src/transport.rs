//! HTTP dispatch.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use kmtracker_core::error::{ProtocolError, TransportError};
use kmtracker_core::{ApiUrl, Error, Result};

use crate::config::ClientConfig;
use crate::request::ApiRequest;

/// Sends descriptors over HTTP with a fixed timeout.
///
/// The transport knows nothing about sessions: it sends exactly the headers
/// it is given and maps every non-success status to [`ProtocolError`].
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
    base_url: ApiUrl,
    timeout: Duration,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kmtracker/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Send `request` and decode a successful JSON response.
    ///
    /// An empty success body decodes as JSON `null`, so `()` and
    /// `Option<T>` work for endpoints that return no content.
    pub async fn dispatch<R>(&self, request: &ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        decode(&self.send(request).await?)
    }

    /// Send `request` and return the raw body of a successful response.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let url = self.url_for(request.path());
        debug!(%url, "dispatching");

        let mut builder = self
            .client
            .request(request.method().clone(), &url)
            .headers(request.headers().clone());
        if let Some(params) = request.query_params() {
            trace!(?params, "query parameters");
            builder = builder.query(params);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_err(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_err(e))?;
        trace!(%status, bytes = body.len(), "response");

        if !status.is_success() {
            return Err(ProtocolError::from_body(status.as_u16(), &body).into());
        }

        Ok(body.to_vec())
    }

    /// Endpoint paths are joined to the base URL; absolute URLs (resolved
    /// media links) are used as given.
    fn url_for(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            self.base_url.endpoint(path)
        }
    }

    fn map_err(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        err.into()
    }
}

pub(crate) fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };

    serde_json::from_slice(body).map_err(|e| {
        TransportError::Decode {
            message: e.to_string(),
        }
        .into()
    })
}
