//! Error handling module for the storefront backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const STORAGE_READ_ERROR: &str = "STORAGE_READ_ERROR";
    pub const STORAGE_WRITE_ERROR: &str = "STORAGE_WRITE_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const AUTH_ERROR: &str = "AUTH_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// No session token stored
    Unauthorized(String),
    /// Durable storage read failure
    StorageRead(String),
    /// Durable storage write failure
    StorageWrite(String),
    /// Malformed stored blob
    Parse(String),
    /// A product with the same name already exists
    DuplicateName(String),
    /// Validation error
    Validation(String),
    /// Remote auth endpoint rejected the login or returned garbage
    Auth(String),
    /// Remote auth endpoint unreachable
    Network(String),
    /// Malformed request body or path segment
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::StorageRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StorageWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DuplicateName(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::StorageRead(_) => codes::STORAGE_READ_ERROR,
            AppError::StorageWrite(_) => codes::STORAGE_WRITE_ERROR,
            AppError::Parse(_) => codes::PARSE_ERROR,
            AppError::DuplicateName(_) => codes::DUPLICATE_NAME,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Auth(_) => codes::AUTH_ERROR,
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::StorageRead(msg)
            | AppError::StorageWrite(msg)
            | AppError::Parse(msg)
            | AppError::DuplicateName(msg)
            | AppError::Validation(msg)
            | AppError::Auth(msg)
            | AppError::Network(msg)
            | AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("Malformed stored blob: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(format!("Auth endpoint unreachable: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every error crossing the API boundary is logged exactly once here.
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
