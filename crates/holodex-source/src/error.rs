//! Error types for the remote source subsystem.

use thiserror::Error;

/// Errors that can occur while talking to the remote API.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("request to {url} failed with status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body did not match the expected shape
    #[error("failed to parse response from {url}: {message}")]
    Parse {
        /// Requested URL
        url: String,
        /// Parser message
        message: String,
    },

    /// A link or base URL could not be used as a request target
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::Status {
            url: "https://swapi.dev/api/people/?page=2".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "request to https://swapi.dev/api/people/?page=2 failed with status 503"
        );

        let err = SourceError::InvalidUrl(String::new());
        assert_eq!(err.to_string(), "invalid URL: ");
    }
}
