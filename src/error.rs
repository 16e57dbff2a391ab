/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use reqwest::StatusCode;
use std::fmt;

/// Main error type for the library
///
/// Every failure of a request, from building it to decoding the response, is
/// reported through this type. Nothing is retried by the client.
#[derive(Debug)]
pub enum AppError {
    /// Request parameters could not be serialized; the request was not sent
    Encoding(String),
    /// No access token is stored for an endpoint that requires one
    Unauthenticated,
    /// Transport level failure
    Network(String),
    /// The request was cancelled before it completed
    Cancelled,
    /// Non-2xx response; carries the vendor error payload
    Server {
        /// HTTP status returned by the API
        status: StatusCode,
        /// Raw response body
        body: String,
    },
    /// The response body is not valid JSON
    Decoding(String),
    /// Invalid argument supplied by the caller
    InvalidInput(String),
    /// Filesystem error
    Io(std::io::Error),
    /// JSON error outside of request encoding or response decoding
    Json(serde_json::Error),
}

impl AppError {
    /// Returns the HTTP status for server errors
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Encoding(msg) => write!(f, "encoding error: {msg}"),
            AppError::Unauthenticated => write!(f, "unauthenticated"),
            AppError::Network(msg) => write!(f, "network error: {msg}"),
            AppError::Cancelled => write!(f, "request cancelled"),
            AppError::Server { status, body } => write!(f, "server error {status}: {body}"),
            AppError::Decoding(msg) => write!(f, "decoding error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
