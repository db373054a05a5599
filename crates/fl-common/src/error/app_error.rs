//! Application error types
//!
//! Unified error handling for the entire application.

use fl_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Message returned to clients for any server-side failure.
///
/// Internal detail is logged, never sent.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Rate limiting
    #[error("{message}")]
    RateLimitExceeded {
        message: String,
        retry_after_secs: u64,
    },

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) | Self::InvalidInput(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 429 Too Many Requests
            Self::RateLimitExceeded { .. } => 429,

            // 500 Internal Server Error
            Self::Database(_)
            | Self::Cache(_)
            | Self::ExternalService(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Message safe to show to the client.
    ///
    /// Client errors carry a localized description, server errors collapse to
    /// [`INTERNAL_ERROR_MESSAGE`].
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }

        match self {
            Self::InvalidCredentials => "Credenciales incorrectas".to_string(),
            Self::Validation(msg) | Self::InvalidInput(msg) => msg.clone(),
            Self::NotFound(what) => format!("{what} no encontrado"),
            Self::RateLimitExceeded { message, .. } => message.clone(),
            Self::Domain(e) => localized_domain_message(e),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Seconds a rate-limited client should wait, if any
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimitExceeded {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

fn localized_domain_message(err: &DomainError) -> String {
    match err {
        DomainError::ReviewNotFound(_) => "Reseña no encontrada".to_string(),
        DomainError::ProductNotFound(_) => "Producto no encontrado".to_string(),
        DomainError::MissingFields(fields) => {
            format!("Faltan campos obligatorios: {}", fields.join(", "))
        }
        DomainError::InvalidRating => {
            "La calificación debe ser un número entero entre 1 y 5".to_string()
        }
        DomainError::InvalidStatus(_) => {
            "Estado inválido. Use pending, approved o rejected".to_string()
        }
        DomainError::MissingVisitorId => "visitorId es obligatorio".to_string(),
        DomainError::ValidationError(msg) => msg.clone(),
        DomainError::DatabaseError(_)
        | DomainError::CacheError(_)
        | DomainError::StorageError(_)
        | DomainError::InternalError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let details = match err {
            AppError::Domain(DomainError::MissingFields(fields)) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        };

        Self {
            code: err.error_code().to_string(),
            message: err.public_message(),
            details,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
