//! Search API error types.

use std::fmt;

/// Broad class of an API failure, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got a response (connection, DNS, timeout).
    NetworkFailure,
    /// The server answered, but with an error status or an unreadable body.
    ServerError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NetworkFailure => f.write_str("network failure"),
            ErrorKind::ServerError => f.write_str("server error"),
        }
    }
}

/// Errors that can occur when talking to the search API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Http { .. } => ErrorKind::NetworkFailure,
            ApiError::Status { .. } | ApiError::Json { .. } => ErrorKind::ServerError,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Json {
                message: err.to_string(),
                body: None,
            };
        }

        match err.status() {
            Some(status) => ApiError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => ApiError::Http {
                message: err.to_string(),
            },
        }
    }
}
