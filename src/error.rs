//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// One violated constraint from payload validation: the field, the rule that
/// tripped, and a readable message.
#[derive(Clone, Debug, Serialize)]
pub struct Violation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("reserved path segment: {0}")]
    ReservedPathSegment(String),
    #[error("duplicate id prefix: {0}")]
    DuplicateIdPrefix(String),
    #[error("invalid id prefix for {segment}: '{prefix}'")]
    InvalidIdPrefix { segment: String, prefix: String },
    #[error("invalid rule for {segment}.{field}: {reason}")]
    InvalidRule { segment: String, field: String, reason: String },
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed")]
    Validation(Vec<Violation>),
    #[error("unsupported bulk operation: {0}")]
    UnsupportedOperation(String),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Stable machine-readable code, also used for per-item bulk errors.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::UnsupportedOperation(_) => "unsupported_operation",
            AppError::Store(_) => "store_error",
            AppError::BadRequest(_) => "bad_request",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedOperation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        // 5xx details stay in the log, not the body.
        let message = if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
            "internal error".to_string()
        } else {
            self.to_string()
        };
        let details = match self {
            AppError::Validation(violations) => serde_json::to_value(&violations).ok(),
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            message,
            error: ErrorDetail { code: code.to_string(), details },
        };
        (status, Json(body)).into_response()
    }
}
