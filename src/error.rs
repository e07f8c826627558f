//! Host error types.
//!
//! Nothing here is fatal once the window is up: fetch and payload errors are
//! logged by the completion router and the affected widget keeps its last
//! state until the next tick.

use thiserror::Error;

use crate::backend::Endpoint;

/// A request that produced no usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },
}

/// A response body that could not be decoded for its widget.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a number, got {0:?}")]
    NotANumber(String),

    #[error("malformed scan entry {key:?}: {reason}")]
    ScanEntry { key: String, reason: &'static str },
}

/// An environment variable that is set but unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{key}={value} is below the minimum of {min}")]
    TooSmall { key: &'static str, value: u64, min: u64 },
}
