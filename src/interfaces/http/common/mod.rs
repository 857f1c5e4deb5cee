//! Shared HTTP response types and error mapping

pub mod form;

pub use form::{field_messages, FormJson, FormJsonRejection};

use axum::http::{StatusCode, Uri};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Failure that still carries a payload, e.g. a form to re-render.
    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

/// Map a read-path domain error onto a status code.
pub fn domain_error(e: DomainError) -> ApiError {
    match e {
        DomainError::NotFound { .. } => api_error(StatusCode::NOT_FOUND, e.to_string()),
        DomainError::Storage(ref reason) => {
            error!(error = %reason, "Storage failure while serving request");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal storage error")
        }
    }
}

/// Route ids must be numeric; anything else reads as a missing record.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| api_error(StatusCode::NOT_FOUND, format!("No record with id '{}'", raw)))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_maps_to_404() {
        let (status, Json(body)) = domain_error(DomainError::NotFound {
            entity: "Student",
            field: "id",
            value: "7".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.as_deref(), Some("Not found: Student with id=7"));
    }

    #[test]
    fn storage_failure_hides_the_reason() {
        let (status, Json(body)) = domain_error(DomainError::Storage("disk I/O error".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Internal storage error"));
    }
}
