use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the HTTP client and accessors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` comes from the
    /// error body's `message` field when the server supplied one.
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
        body: Option<Value>,
    },

    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A 2xx body that did not parse as the caller's declared type.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A structurally valid payload that violates the domain mapping,
    /// e.g. an unrecognized question type.
    #[error("contract violation: {0}")]
    Contract(String),
}

impl ApiError {
    /// Build a `Status` error from a response's status and parsed error body.
    #[must_use]
    pub(crate) fn from_error_body(status: reqwest::StatusCode, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(Value::as_str)
            .map_or_else(
                || format!("request failed with status {status}"),
                str::to_owned,
            );
        ApiError::Status {
            status,
            message,
            body,
        }
    }

    /// The HTTP status code, or `0` for anything that never got a status
    /// line (transport, decode, and contract failures).
    #[must_use]
    pub fn status_u16(&self) -> u16 {
        match self {
            ApiError::Status { status, .. } => status.as_u16(),
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::Contract(_) => 0,
        }
    }
}
