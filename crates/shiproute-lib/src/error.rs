use thiserror::Error;

/// Convenient result alias for the ship route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant describes a failure between submitting a valid query and
/// holding a well-formed route. Input problems live in
/// [`ValidationError`](crate::ValidationError) instead, since they never reach
/// the network.
#[derive(Debug, Error)]
pub enum Error {
    /// The routing service answered with a non-success HTTP status.
    #[error("HTTP error! Status: {status}")]
    HttpStatus { status: u16 },

    /// The response body decoded but did not describe a usable route.
    #[error("malformed route response: {message}")]
    MalformedResponse { message: String },

    /// Raised when a found route carries no ports at all.
    #[error("route response contained no ports")]
    EmptyRoute,

    /// Wrapper for HTTP client errors (connection refused, timeouts, TLS).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON decoding errors on the response payload.
    #[error("malformed route response: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedResponse {
            message: message.into(),
        }
    }
}
