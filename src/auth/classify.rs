#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

use thiserror::Error;

use super::messages::Messages;
use crate::api::ApiError;

/// Failure classes surfaced to session consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was sent.
    LocalValidation,
    /// Request sent, no response.
    Network,
    /// 401 or 403.
    Auth,
    /// 404.
    NotFound,
    /// 422 with optional server detail.
    Validation,
    /// 5xx.
    Server,
    /// Any other status.
    UnknownHttp,
    /// Neither a request nor a response is involved.
    Other,
}

/// Structured failure returned by every session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::LocalValidation,
            message: message.into(),
        }
    }
}

/// Map a backend failure to exactly one non-empty user-facing message.
///
/// `default_message` is the calling operation's fallback and must not be empty.
pub fn classify(err: &ApiError, default_message: &str, messages: &Messages) -> SessionError {
    let (kind, message) = match err {
        ApiError::Network(_) => (ErrorKind::Network, messages.network.to_string()),
        ApiError::Status { status, message } => match *status {
            401 => (ErrorKind::Auth, messages.invalid_credentials.to_string()),
            403 => (ErrorKind::Auth, messages.forbidden.to_string()),
            404 => (ErrorKind::NotFound, messages.not_found.to_string()),
            422 => (
                ErrorKind::Validation,
                server_text_or(message, messages.invalid_input),
            ),
            s if s >= 500 => (ErrorKind::Server, messages.server_error.to_string()),
            _ => (ErrorKind::UnknownHttp, server_text_or(message, default_message)),
        },
        // Parser and builder text is not localized; keep it in the log.
        ApiError::Decode(detail) | ApiError::Request(detail) => {
            log::warn!("{}: {}", default_message, detail.trim());
            (ErrorKind::Other, default_message.to_string())
        }
    };
    SessionError { kind, message }
}

fn server_text_or(text: &Option<String>, fallback: &str) -> String {
    text.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
