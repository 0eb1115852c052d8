// ================================================================
// File: autostylist-common/src/error.rs
// ================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Uniform error shape handed to callers: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }

    /// Normalizes a raw backend body. Prefers `detail`, then `error`, then `fallback`.
    pub fn from_response(body: &str, fallback: &str) -> Self {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| Self::from_json(&v))
            .unwrap_or_else(|| Self::new(fallback))
    }

    /// Extracts the message from a structured error payload, if there is one.
    ///
    /// FastAPI validation failures arrive as `{"detail": [{"msg": ..}, ..]}`;
    /// those messages are joined with "; ".
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        match obj.get("detail") {
            Some(Value::String(s)) if !s.is_empty() => return Some(Self::new(s.clone())),
            Some(Value::Array(entries)) => {
                let msgs: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(Value::as_str))
                    .collect();
                if !msgs.is_empty() {
                    return Some(Self::new(msgs.join("; ")));
                }
            }
            _ => {}
        }

        match obj.get("error") {
            Some(Value::String(s)) if !s.is_empty() => Some(Self::new(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

/// Error taxonomy seen by callers of the API facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Transport,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 409 | 413 | 415 | 422 => ErrorKind::Validation,
            401 | 403 => ErrorKind::Auth,
            404 => ErrorKind::NotFound,
            _ => ErrorKind::Transport,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(ErrorBody),

    #[error("Authentication error: {0}")]
    Auth(ErrorBody),

    #[error("Not found error: {0}")]
    NotFound(ErrorBody),

    #[error("Transport error: {0}")]
    Transport(ErrorBody),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    pub fn from_kind(kind: ErrorKind, body: ErrorBody) -> Self {
        match kind {
            ErrorKind::Validation => Error::Validation(body),
            ErrorKind::Auth => Error::Auth(body),
            ErrorKind::NotFound => Error::NotFound(body),
            ErrorKind::Transport => Error::Transport(body),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(ErrorBody::new(msg))
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Error::Auth(ErrorBody::new(msg))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(ErrorBody::new(msg))
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(ErrorBody::new(msg))
    }

    /// Local failures (I/O, keyring, config) are reported as transport problems.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Auth(_) => ErrorKind::Auth,
            Error::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Transport,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// The `{error}` payload for this failure, whatever its origin.
    pub fn body(&self) -> ErrorBody {
        match self {
            Error::Validation(b) | Error::Auth(b) | Error::NotFound(b) | Error::Transport(b) => {
                b.clone()
            }
            other => ErrorBody::new(other.to_string()),
        }
    }
}

impl From<keyring::Error> for Error {
    fn from(err: keyring::Error) -> Self {
        Error::Keyring(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}
