use thiserror::Error;

/// Failure of a single request against the POS backend.
///
/// The variants follow what the caller can still know about the exchange:
/// whether a response arrived at all, and if so what it said.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request was sent but no response came back (connect, timeout, reset).
    #[error("could not reach server: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        /// Human-readable `error` field from the JSON body, if any.
        message: Option<String>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The request could not be built, so nothing was sent.
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Pull the backend's `error` string out of a failure body.
///
/// Blank strings count as absent so callers fall back to their fixed message.
pub fn extract_error_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToString::to_string)
}
