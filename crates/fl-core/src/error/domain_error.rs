//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Review not found: {0}")]
    /// Carries the identifier as requested, which may not even parse
    ReviewNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Rating must be a whole number between 1 and 5")]
    InvalidRating,

    #[error("Invalid review status: {0}")]
    InvalidStatus(String),

    #[error("visitorId is required")]
    MissingVisitorId,

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::ProductNotFound(_) => "UNKNOWN_PRODUCT",

            // Validation
            Self::MissingFields(_) => "MISSING_FIELDS",
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::MissingVisitorId => "MISSING_VISITOR_ID",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ReviewNotFound(_) | Self::ProductNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFields(_)
                | Self::InvalidRating
                | Self::InvalidStatus(_)
                | Self::MissingVisitorId
                | Self::ValidationError(_)
        )
    }

    /// Check if this error comes from infrastructure rather than the caller
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_)
                | Self::CacheError(_)
                | Self::StorageError(_)
                | Self::InternalError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{ProductId, ReviewId};

    #[test]
    fn test_error_codes() {
        let err = DomainError::ReviewNotFound(ReviewId::generate().to_string());
        assert_eq!(err.code(), "UNKNOWN_REVIEW");

        let err = DomainError::InvalidStatus("archived".to_string());
        assert_eq!(err.code(), "INVALID_STATUS");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ReviewNotFound(ReviewId::generate().to_string()).is_not_found());
        assert!(DomainError::ProductNotFound(ProductId::generate().to_string()).is_not_found());
        assert!(!DomainError::InvalidRating.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::InvalidRating.is_validation());
        assert!(DomainError::MissingVisitorId.is_validation());
        assert!(DomainError::MissingFields(vec!["comment"]).is_validation());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::MissingFields(vec!["customerName", "rating"]);
        assert_eq!(err.to_string(), "Missing required fields: customerName, rating");

        let err = DomainError::InvalidStatus("archived".to_string());
        assert_eq!(err.to_string(), "Invalid review status: archived");
    }
}
