//! Error taxonomy for upstream marine-data calls.

use thiserror::Error;

/// Result type alias using UpstreamError.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Failure kinds for calls to external marine-data services.
///
/// Every variant is recoverable by the caller: the aggregator degrades to
/// simulated output and the sea locator skips the failing grid candidate.
/// "Zero usable records" is intentionally not a variant here: an empty but
/// well-formed response is an `Ok` value, and the aggregator decides what
/// emptiness means (it caches that outcome, unlike these errors).
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else if err.is_decode() {
            UpstreamError::Malformed(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Malformed(err.to_string())
    }
}
