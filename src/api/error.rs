//! HTTP mapping for directory errors
//!
//! Every handler returns [`crate::error::Error`] on failure; this is the one
//! place those errors become responses. Storage and other unexpected failures
//! are logged and answered with a generic 500 whose detail is only attached in
//! debug builds. Panics inside handlers are caught by the layer built from
//! [`handle_panic`] and get the same body.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryErrorTrait, Error, ErrorCategory};

/// Message returned for any 5xx outcome
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            field: None,
            error: None,
        }
    }

    /// Attach the offending field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Generic internal error, carrying `detail` only in debug builds
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        let mut response = Self::new(INTERNAL_ERROR_MESSAGE);
        if cfg!(debug_assertions) {
            response.error = Some(detail.to_string());
        }
        response
    }
}

/// Map an error category to its HTTP status
pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Storage | ErrorCategory::Other => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let category = self.category();
        let status = status_for(category);

        let body = match &self {
            Error::Validation(v) => ErrorResponse::new(v.message.clone()).with_field(v.field.clone()),
            _ if category.is_client_error() => ErrorResponse::new(self.to_string()),
            _ => {
                tracing::error!(error = %self, "Request failed with internal error");
                ErrorResponse::internal(&self)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a panic caught while serving a request
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(detail)),
    )
        .into_response()
}
