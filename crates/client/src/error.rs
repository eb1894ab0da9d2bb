//! Client error types.

use thiserror::Error;

/// Failure to get any usable answer from the server.
///
/// A server that answers with an error envelope is not a `ClientError`; that
/// arrives as an `ApiResponse` with `success: false`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL could not be joined with an endpoint path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The body was not the expected JSON shape.
    #[error("Unexpected response ({status}): {message}")]
    Decode { status: u16, message: String },
}
