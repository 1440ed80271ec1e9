//! Error taxonomy for fetching, parsing and configuration.
//!
//! None of these are fatal to a batch: the worker folds each one into the
//! matching [`TitleOutcome`](crate::extraction::title::TitleOutcome) variant.

use thiserror::Error;

/// Failure to obtain a response body for an identifier.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, redirect loop).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the deadline.
    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// The response arrived but its body could not be read.
    #[error("reading body of {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other fetcher-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Failure to turn a fetched body into a document tree.
///
/// Decoding is lossy and the HTML parser recovers from bad markup, so the
/// only failure left is losing the blocking task that runs them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The blocking parse task panicked or was cancelled.
    #[error("parse task failed: {0}")]
    Task(String),
}

/// Invalid scrape configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("target tag must not be empty")]
    InvalidTag,

    #[error("target class must not be empty")]
    InvalidClass,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = FetchError::Timeout {
            url: "https://example.com/".to_string(),
            timeout_ms: 250,
        };
        assert_eq!(
            err.to_string(),
            "request to https://example.com/ timed out after 250ms"
        );
    }

    #[test]
    fn test_task_message() {
        let err = ParseError::Task("task 7 panicked".to_string());
        assert_eq!(err.to_string(), "parse task failed: task 7 panicked");
    }
}
