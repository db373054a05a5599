//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use fl_common::AppError;
use fl_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    Domain(DomainError),

    /// Application error (credentials, config, etc.)
    App(AppError),

    /// Validation error
    Validation(String),

    /// Caller is throttled; `message` is shown to the client
    RateLimited {
        message: String,
        retry_after_secs: u64,
    },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::RateLimited {
                retry_after_secs, ..
            } => write!(f, "Rate limited for {retry_after_secs}s"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a rate-limit rejection
    pub fn rate_limited(message: impl Into<String>, retry_after_secs: u64) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_secs,
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::RateLimited { .. } => 429,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is a throttling rejection
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::RateLimited {
                message,
                retry_after_secs,
            } => AppError::RateLimitExceeded {
                message,
                retry_after_secs,
            },
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_not_found_error() {
        let err = ServiceError::from(DomainError::ReviewNotFound("abc".to_string()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_REVIEW");
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("El archivo debe ser una imagen");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ServiceError::rate_limited("Intenta de nuevo en 5 minutos", 300);
        assert!(err.is_rate_limited());
        assert_eq!(err.status_code(), 429);

        let app_err: AppError = err.into();
        assert_eq!(app_err.status_code(), 429);
        assert_eq!(app_err.retry_after_secs(), Some(300));
    }

    #[test]
    fn test_infrastructure_errors_are_500() {
        let err = ServiceError::from(DomainError::DatabaseError("down".to_string()));
        assert_eq!(err.status_code(), 500);

        let app_err: AppError = ServiceError::internal("boom").into();
        assert_eq!(app_err.status_code(), 500);
    }

    #[test]
    fn test_credentials_error_is_401() {
        let err = ServiceError::from(AppError::InvalidCredentials);
        assert_eq!(err.status_code(), 401);
    }
}
