//! JSON error responses.
//!
//! Every failure leaving the server is rendered as `{ "error": string }`.

use std::any::Any;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::analysis::InputError;
use crate::models::UploadError;

/// Message for failures whose details stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Request body must be valid JSON")]
    InvalidBody,

    /// An extractor rejected the request (bad multipart framing, body too large).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Too many requests, please try again later.")]
    TooManyRequests,

    #[error("Not found")]
    NotFound,

    #[error("Something went wrong. Please try again later.")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) | ApiError::Upload(_) | ApiError::InvalidBody => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Rejected { status, .. } => *status,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<axum::extract::multipart::MultipartRejection> for ApiError {
    fn from(err: axum::extract::multipart::MultipartRejection) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<axum::extract::rejection::BytesRejection> for ApiError {
    fn from(err: axum::extract::rejection::BytesRejection) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Convert a panic inside a handler into the generic 500 body.
///
/// The payload is not logged here; the process panic hook already recorded it.
pub fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    ApiError::Internal.into_response()
}
