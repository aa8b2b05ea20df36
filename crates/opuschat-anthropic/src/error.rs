//! Provider error surface.

use std::time::Duration;

use thiserror::Error;

/// Every way a completion call can fail
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The conversation has a structural tool-sequence defect the repair
    /// engine does not fix. Raised before any network I/O.
    #[error("tool sequence error: {0}")]
    ToolSequence(String),

    /// The vendor returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The vendor call exceeded the configured timeout; no partial response
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure, passed through unmodified
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
