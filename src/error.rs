//! Error taxonomy for the aggregation core.
//!
//! A single upstream failure is terminal for the whole request: nothing is
//! retried and no partial result is returned. The variants keep "upstream
//! rejected the request" distinguishable from "upstream is unreachable or
//! timed out".

use thiserror::Error;

/// Errors surfaced by the aggregation core and its GitHub collaborator.
#[derive(Debug, Error)]
pub enum RecapError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("github api unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("github api returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The GraphQL endpoint answered 200 but attached an error list.
    #[error("graphql query failed: {0}")]
    Query(String),

    /// Caller-supplied parameters that cannot be used.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A spawned repository walk did not complete.
    #[error("repository walk failed: {0}")]
    Task(String),
}

impl RecapError {
    /// Build a status error from an upstream response, keeping whatever body
    /// detail the API attached.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let detail = if detail.is_empty() {
            "github api error".to_string()
        } else {
            detail
        };
        Self::Status { status, detail }
    }
}
