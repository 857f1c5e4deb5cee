//! Form body extractor and field-error flattening
//!
//! `FormJson<T>` works like `axum::Json<T>` but answers malformed bodies
//! with the standard `ApiResponse` envelope. Field rules are checked later
//! by the service so the form can be re-rendered with every message.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::ValidationErrors;

use super::ApiResponse;

/// JSON body of a form post.
///
/// ```ignore
/// async fn handler(FormJson(body): FormJson<StudentFormRequest>) { /* ... */ }
/// ```
pub struct FormJson<T>(pub T);

/// Rejection returned when the body is not the expected JSON.
pub struct FormJsonRejection(JsonRejection);

impl IntoResponse for FormJsonRejection {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(format!("Invalid form body: {}", self.0.body_text()));
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for FormJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(FormJsonRejection)?;
        Ok(FormJson(value))
    }
}

/// Field name → messages, in field order.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
