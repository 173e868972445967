//! Error types for weibo-timeline
//!
//! This module provides error handling for the library, including:
//! - Input validation errors (bad subject, zero count, invalid configuration)
//! - The job-level timeout error produced by the aggregation engine
//! - Remote API errors decoded from the service's error payload
//! - Transport and serialization failures

use std::time::Duration;
use thiserror::Error;

/// Result type alias for weibo-timeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for weibo-timeline
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "page_size")
        key: Option<String>,
    },

    /// Subject identifier is unusable (e.g., empty screen name)
    #[error("invalid subject: {0}")]
    InvalidSubject(String),

    /// Requested status count was zero
    #[error("requested status count must be greater than zero")]
    InvalidCount,

    /// The aggregation job exceeded its deadline; partial data is discarded
    #[error("timeline fetch timed out after {elapsed:?} (limit {limit:?})")]
    Timeout {
        /// Wall-clock time elapsed when the deadline check fired
        elapsed: Duration,
        /// The configured deadline
        limit: Duration,
    },

    /// Error payload returned by the remote API
    #[error("API error {code} [{request}]: {message}")]
    Api {
        /// Numeric error code from the service (e.g., 10023 for rate limiting)
        code: i64,
        /// Human-readable message from the service
        message: String,
        /// The request path the service reports the error for
        request: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL construction failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}
