//! Error types for the store and its HTTP surface.
//!
//! # Design
//! `StoreError` is what the store itself can report: bad input or a missing
//! record. It has no transient variants because the store performs no I/O.
//! `ApiError` is the HTTP-facing form; it also absorbs extractor rejections
//! so every failure leaves the server as the same JSON envelope:
//! `{"error": "<kind>", "message": "<text>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::model::TodoId;

/// Errors reported by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("todo {0} not found")]
    NotFound(TodoId),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not acceptable JSON for the endpoint.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The `{id}` path segment is not a todo id.
    #[error("no todo matches id {0:?}")]
    UnknownId(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Validation(_)) | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::NotFound(_)) | ApiError::UnknownId(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "not_found",
            _ => "validation",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
