//! Error types for page fetching.

use thiserror::Error;

/// Errors that can occur while fetching a search-results page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response other than an outright block.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The endpoint refused the request outright (HTTP 403). Retrying with
    /// the same client will not help.
    #[error("blocked by the server (HTTP {status}) fetching {url}")]
    Blocked {
        /// The URL that was blocked.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The search URL could not be constructed.
    #[error("invalid search URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a blocked error.
    pub fn blocked(url: impl Into<String>, status: u16) -> Self {
        Self::Blocked {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Whether this error means the server refused us (403, or 429 once
    /// retries are exhausted), as opposed to an ordinary transient failure.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Blocked { .. } | Self::HttpStatus { status: 429, .. }
        )
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` because the
// variants require the request URL for context, which the source error does
// not reliably provide. The helper constructors are the pattern here.
