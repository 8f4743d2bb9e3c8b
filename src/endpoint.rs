//! Validated HTTP endpoint URLs shared by the agent and tool-server registries.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned while validating an endpoint URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointUrlError {
    /// The URL is empty after trimming.
    #[error("endpoint URL must not be empty")]
    Empty,

    /// The URL does not have an `http://` or `https://` prefix.
    #[error("endpoint URL '{0}' must start with 'http://' or 'https://'")]
    UnsupportedScheme(String),
}

/// Base URL of a remote HTTP endpoint.
///
/// The value is trimmed and any trailing slashes are removed so relative
/// paths can be appended with [`EndpointUrl::join`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndpointUrl(String);

impl EndpointUrl {
    /// Creates a validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointUrlError::Empty`] for blank input and
    /// [`EndpointUrlError::UnsupportedScheme`] when the scheme is not HTTP.
    pub fn new(value: impl Into<String>) -> Result<Self, EndpointUrlError> {
        let raw = value.into();
        let normalized = raw.trim().trim_end_matches('/');

        if normalized.is_empty() {
            return Err(EndpointUrlError::Empty);
        }

        let has_valid_prefix =
            normalized.starts_with("http://") || normalized.starts_with("https://");
        if !has_valid_prefix {
            return Err(EndpointUrlError::UnsupportedScheme(raw.trim().to_owned()));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a relative path, inserting exactly one separating slash.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl TryFrom<String> for EndpointUrl {
    type Error = EndpointUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EndpointUrl> for String {
    fn from(value: EndpointUrl) -> Self {
        value.0
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
