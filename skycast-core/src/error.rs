use reqwest::StatusCode;
use thiserror::Error;

/// The single message shown to the user when a lookup fails, regardless of
/// the underlying cause. The cause itself goes to the logs.
pub const LOOKUP_FAILED_MESSAGE: &str = "location not found";

/// Everything that can go wrong between submitting a query and holding a
/// valid snapshot.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Query was empty after trimming. The interactive controller treats
    /// this as a silent no-op; the one-shot path reports it.
    #[error("query is empty")]
    EmptyQuery,

    /// Network/DNS-level failure reaching the provider.
    #[error("transport failure talking to the weather provider")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status (unknown location,
    /// bad API key, rate limit).
    #[error("weather provider rejected the request with status {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// Response body was not valid JSON for the expected shape.
    #[error("failed to decode the weather provider response")]
    Decode(#[from] serde_json::Error),

    /// Response decoded, but a required field is absent.
    #[error("malformed payload: missing or invalid `{field}`")]
    MalformedPayload { field: &'static str },
}
