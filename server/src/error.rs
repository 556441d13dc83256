//! Client-facing errors for the todo API.
//!
//! # Design
//! Every variant is a client error; the store cannot fail, so there is no
//! server-fault variant. `NotFound` maps to 404 and everything else to 400.
//! The `Display` text becomes the `error` field of the JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer `>= 1`.
    #[error("invalid id")]
    InvalidId,

    /// A create body without a usable, non-empty `title`.
    #[error("title is required")]
    TitleRequired,

    /// An update body that is not valid JSON of the expected shape.
    #[error("invalid payload")]
    InvalidPayload,

    /// An update body with neither `title` nor `completed`.
    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("todo not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidId
            | ApiError::TitleRequired
            | ApiError::InvalidPayload
            | ApiError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, error = %self, "rejecting request");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
