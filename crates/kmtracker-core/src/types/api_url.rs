//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated API base URL.
///
/// Must use HTTPS, or HTTP for loopback hosts. The path component is kept
/// (the API is typically mounted under `/api`) and any trailing slash is
/// removed so endpoint paths can be appended verbatim.
///
/// # Example
///
/// ```
/// use kmtracker_core::ApiUrl;
///
/// let api = ApiUrl::new("http://127.0.0.1:8000/api/").unwrap();
/// assert_eq!(api.endpoint("/auth/login/"), "http://127.0.0.1:8000/api/auth/login/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// The development backend address.
    pub const DEFAULT: &'static str = "http://127.0.0.1:8000/api";

    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path such as `/trips/`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Resolve a link returned by the API, such as a report's `pdf_file`,
    /// against the base URL.
    ///
    /// Root-relative paths resolve against the API host. The result must
    /// stay on the same origin, since requests to it carry the session
    /// token.
    pub fn resolve(&self, reference: &str) -> Result<String, Error> {
        let invalid = |reason: String| -> Error {
            InvalidInputError::ApiUrl {
                value: reference.to_string(),
                reason,
            }
            .into()
        };

        let url = self.0.join(reference).map_err(|e| invalid(e.to_string()))?;
        if url.origin() != self.0.origin() {
            return Err(invalid(format!(
                "not served by {}",
                self.0.origin().ascii_serialization()
            )));
        }
        Ok(url.into())
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let Some(host) = url.host_str() else {
            return Err(invalid("must have a host"));
        };

        let is_loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");
        match url.scheme() {
            "https" => Ok(()),
            "http" if is_loopback => Ok(()),
            _ => Err(invalid("must use HTTPS (HTTP allowed only for localhost)")),
        }
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(Self::DEFAULT).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
