use std::error::Error;
use std::fmt;

/// Failures talking to an HTTP collaborator (listings backend, geocoder).
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Network(String),
    /// Non-2xx answer. `detail` is the server's own message, when it sent one.
    Http { status: u16, detail: Option<String> },
    Decode(String),
    Config(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::Http {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {status}: {detail}"),
            ApiError::Http {
                status,
                detail: None,
            } => write!(f, "HTTP {status}"),
            ApiError::Decode(msg) => write!(f, "Response decode error: {msg}"),
            ApiError::Config(msg) => write!(f, "Client config error: {msg}"),
        }
    }
}

impl Error for ApiError {}
