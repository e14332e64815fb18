//! Client configuration.

use std::time::Duration;

use kmtracker_core::ApiUrl;

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL that endpoint paths are appended to.
    pub base_url: ApiUrl,
    /// Timeout applied to every dispatch, including refresh calls.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default per-dispatch timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiUrl::default())
    }
}
