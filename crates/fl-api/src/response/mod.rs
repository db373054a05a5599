//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting.

use axum::{
    extract::multipart::MultipartError,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use fl_common::{AppError, ErrorResponse};
use fl_core::DomainError;
use fl_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => status_from(e.status_code()),
            Self::Service(e) => status_from(e.status_code()),
            Self::Domain(e) => {
                if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if e.is_validation() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Map a multipart failure, keeping the body limit distinguishable
    pub fn from_multipart(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidBody(err.body_text())
        }
    }

    /// Fold into the application taxonomy where one exists
    fn into_app_error(self) -> Result<AppError, Self> {
        match self {
            Self::App(e) => Ok(e),
            Self::Service(e) => Ok(e.into()),
            Self::Domain(e) => Ok(AppError::Domain(e)),
            other => Err(other),
        }
    }
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// First validation message, in field order
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("Campo inválido: {field}"), ToString::to_string)
            })
        })
        .unwrap_or_else(|| "Datos inválidos".to_string())
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<ErrorResponse> for ErrorDetail {
    fn from(response: ErrorResponse) -> Self {
        Self {
            code: response.code,
            message: response.message,
            details: response.details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server errors are logged in full and answered generically
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let (detail, retry_after) = match self.into_app_error() {
            Ok(app) => (ErrorDetail::from(ErrorResponse::from(&app)), app.retry_after_secs()),
            Err(other) => {
                let code = other.error_code().to_string();
                let detail = match &other {
                    Self::Validation(errors) => ErrorDetail {
                        code,
                        message: validation_message(errors),
                        details: serde_json::to_value(errors).ok(),
                    },
                    Self::InvalidPath(msg) | Self::InvalidBody(msg) => ErrorDetail {
                        code,
                        message: msg.clone(),
                        details: None,
                    },
                    Self::PayloadTooLarge => ErrorDetail {
                        code,
                        message: "El archivo supera el tamaño máximo permitido".to_string(),
                        details: None,
                    },
                    _ => ErrorDetail {
                        code,
                        message: fl_common::INTERNAL_ERROR_MESSAGE.to_string(),
                        details: None,
                    },
                };
                (detail, None)
            }
        };

        let mut response = (status, Json(ErrorBody { error: detail })).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rate_limited_sets_retry_after() {
        let err = ApiError::from(ServiceError::rate_limited("Intenta de nuevo en 14 segundos.", 14));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "14");
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
        assert_eq!(body["error"]["message"], "Intenta de nuevo en 14 segundos.");
    }

    #[tokio::test]
    async fn test_server_errors_are_generic() {
        let err = ApiError::from(DomainError::DatabaseError("password=hunter2".to_string()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], fl_common::INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_missing_fields_details() {
        let err = ApiError::from(ServiceError::from(DomainError::MissingFields(vec![
            "rating", "comment",
        ])));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_FIELDS");
        assert_eq!(body["error"]["details"]["fields"][1], "comment");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::invalid_path("id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AppError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(DomainError::ReviewNotFound("x".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::PayloadTooLarge.error_code(), "PAYLOAD_TOO_LARGE");
    }
}
