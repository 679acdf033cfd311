//! Error types for the vehicle API client.
//!
//! `NotFound` is split out because a stale listing commonly points at a
//! record someone else already removed. Every other non-2xx lands in
//! `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors produced while building, executing or parsing a vehicle request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The host could not complete the round-trip (connect, TLS, timeout...).
    #[error("transport failed: {0}")]
    Transport(String),
}
