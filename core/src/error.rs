//! Error types for the todo API client.
//!
//! # Design
//! The two failures the server reports on purpose get their own variants:
//! `Validation` (400, with the server's message) and `NotFound` (404).
//! Any other non-2xx response lands in `HttpError` with the raw status code
//! and body for debugging.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request input (400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 400 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
