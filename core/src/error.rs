//! Error types for the Foreman API client.
//!
//! # Design
//! Every failure a call can produce maps to exactly one variant, so callers
//! can branch on the category: the request never completed (`Network`), the
//! server answered with a non-2xx status (`Status`), the body was not JSON
//! (`Decode`), or the JSON did not have the expected shape (`Shape`).
//! Messages never include request headers, so credentials cannot leak
//! through `Display` or `Debug`.

use thiserror::Error;

/// Errors returned by `ForemanClient` parse methods and `Foreman` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The connection could not be established or was interrupted
    /// (DNS, refused connection, TLS handshake, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server returned a status outside 200..=299. The body is discarded.
    #[error("HTTP error {status} {reason}")]
    Status { status: u16, reason: String },

    /// The response body is not valid JSON.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The JSON is valid but not shaped as expected: the top level is not an
    /// object, or a required field is missing or has the wrong type.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status code, if this is a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
