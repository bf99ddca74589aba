//! API client error types.

use thiserror::Error;

/// Errors from a single backend call.
///
/// `Request` and `Response` are transport-tier failures; `Api` carries the
/// message of a `success: false` envelope and is shown to the user verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The body was not a valid envelope or lacked the expected payload.
    #[error("Invalid response: {0}")]
    Response(String),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Api(String),
}

impl ApiError {
    /// Whether this error carries a backend-reported message.
    #[must_use]
    pub const fn is_application(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}
