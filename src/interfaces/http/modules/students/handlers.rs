//! Student REST handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use tracing::warn;

use super::dto::{
    DeleteConfirmationView, DeleteParams, StudentDetailsView, StudentFormRequest, StudentFormView,
    StudentListParams, StudentsIndexView,
};
use crate::application::students::{DELETE_FAILED_MESSAGE, SAVE_FAILED_MESSAGE};
use crate::application::{DeleteOutcome, StudentListRequest, StudentService, StudentWriteError};
use crate::interfaces::http::common::{
    api_error, domain_error, field_messages, parse_id, ApiError, ApiResponse, FormJson,
};
use crate::interfaces::http::middleware::CsrfToken;

const INDEX: &str = "/Students";

/// Shared state for the student routes
#[derive(Clone)]
pub struct StudentsState {
    pub service: Arc<StudentService>,
}

/// Re-render a posted form with a status and messages.
fn form_failure(
    status: StatusCode,
    form: StudentFormRequest,
    token: String,
    error: StudentWriteError,
) -> Response {
    let mut view = StudentFormView::from_request(form, token);
    let message = match error {
        StudentWriteError::Validation(errors) => {
            view.errors = field_messages(&errors);
            "Validation failed".to_string()
        }
        StudentWriteError::NotFound(id) => format!("Student {} not found", id),
        StudentWriteError::SaveFailed(_) => {
            view.form_error = Some(SAVE_FAILED_MESSAGE.to_string());
            SAVE_FAILED_MESSAGE.to_string()
        }
    };
    (status, Json(ApiResponse::failure(view, message))).into_response()
}

#[utoipa::path(
    get,
    path = "/Students",
    tag = "Students",
    params(StudentListParams),
    responses(
        (status = 200, description = "Filtered, sorted page of students", body = ApiResponse<StudentsIndexView>)
    )
)]
pub async fn list_students(
    State(state): State<StudentsState>,
    Query(params): Query<StudentListParams>,
) -> Result<Json<ApiResponse<StudentsIndexView>>, ApiError> {
    let request = StudentListRequest {
        sort_order: params.sort_order,
        search_string: params.search_string,
        current_filter: params.current_filter,
        page_number: params.page_number,
    };

    let view = state.service.list(&request).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(view.into())))
}

#[utoipa::path(
    get,
    path = "/Students/Details/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student with enrollments", body = ApiResponse<StudentDetailsView>),
        (status = 404, description = "Not found")
    )
)]
pub async fn student_details(
    State(state): State<StudentsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StudentDetailsView>>, ApiError> {
    let id = parse_id(&id)?;
    let details = state.service.details(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/Students/Create",
    tag = "Students",
    responses(
        (status = 200, description = "Empty form with anti-forgery token", body = ApiResponse<StudentFormView>)
    )
)]
pub async fn create_form(
    Extension(CsrfToken(token)): Extension<CsrfToken>,
) -> Json<ApiResponse<StudentFormView>> {
    Json(ApiResponse::success(StudentFormView::empty(token)))
}

#[utoipa::path(
    post,
    path = "/Students/Create",
    tag = "Students",
    request_body = StudentFormRequest,
    params(("X-CSRF-Token" = String, Header, description = "Value of the csrf_token cookie")),
    responses(
        (status = 303, description = "Created, redirect to the list"),
        (status = 400, description = "Missing or mismatched anti-forgery token"),
        (status = 422, description = "Validation failed", body = ApiResponse<StudentFormView>),
        (status = 500, description = "Write failed", body = ApiResponse<StudentFormView>)
    )
)]
pub async fn create_student(
    State(state): State<StudentsState>,
    Extension(CsrfToken(token)): Extension<CsrfToken>,
    FormJson(form): FormJson<StudentFormRequest>,
) -> Response {
    match state.service.create(form.to_input()).await {
        Ok(_) => Redirect::to(INDEX).into_response(),
        Err(e @ StudentWriteError::Validation(_)) => {
            form_failure(StatusCode::UNPROCESSABLE_ENTITY, form, token, e)
        }
        Err(e) => form_failure(StatusCode::INTERNAL_SERVER_ERROR, form, token, e),
    }
}

#[utoipa::path(
    get,
    path = "/Students/Edit/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Filled form with anti-forgery token", body = ApiResponse<StudentFormView>),
        (status = 404, description = "Not found")
    )
)]
pub async fn edit_form(
    State(state): State<StudentsState>,
    Extension(CsrfToken(token)): Extension<CsrfToken>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StudentFormView>>, ApiError> {
    let id = parse_id(&id)?;
    let student = state.service.find(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(StudentFormView::for_student(
        student, token,
    ))))
}

#[utoipa::path(
    post,
    path = "/Students/Edit/{id}",
    tag = "Students",
    request_body = StudentFormRequest,
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("X-CSRF-Token" = String, Header, description = "Value of the csrf_token cookie")
    ),
    responses(
        (status = 303, description = "Saved, redirect to the list"),
        (status = 400, description = "Missing or mismatched anti-forgery token"),
        (status = 404, description = "Unknown student or id mismatch"),
        (status = 422, description = "Validation failed", body = ApiResponse<StudentFormView>),
        (status = 500, description = "Write failed", body = ApiResponse<StudentFormView>)
    )
)]
pub async fn edit_student(
    State(state): State<StudentsState>,
    Extension(CsrfToken(token)): Extension<CsrfToken>,
    Path(id): Path<String>,
    FormJson(form): FormJson<StudentFormRequest>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    if form.id != Some(id) {
        return api_error(StatusCode::NOT_FOUND, "Student id does not match the route")
            .into_response();
    }

    match state.service.edit(id, form.to_input()).await {
        Ok(()) => Redirect::to(INDEX).into_response(),
        Err(StudentWriteError::NotFound(id)) => {
            api_error(StatusCode::NOT_FOUND, format!("Student {} not found", id)).into_response()
        }
        Err(e @ StudentWriteError::Validation(_)) => {
            form_failure(StatusCode::UNPROCESSABLE_ENTITY, form, token, e)
        }
        Err(e) => form_failure(StatusCode::INTERNAL_SERVER_ERROR, form, token, e),
    }
}

#[utoipa::path(
    get,
    path = "/Students/Delete/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID"), DeleteParams),
    responses(
        (status = 200, description = "Delete confirmation", body = ApiResponse<DeleteConfirmationView>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_confirmation(
    State(state): State<StudentsState>,
    Extension(CsrfToken(token)): Extension<CsrfToken>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse<DeleteConfirmationView>>, ApiError> {
    let id = parse_id(&id)?;
    let student = state.service.find(id).await.map_err(domain_error)?;

    let error_message = params
        .save_changes_error
        .unwrap_or(false)
        .then(|| DELETE_FAILED_MESSAGE.to_string());

    Ok(Json(ApiResponse::success(DeleteConfirmationView {
        student: student.into(),
        error_message,
        csrf_token: token,
    })))
}

#[utoipa::path(
    post,
    path = "/Students/Delete/{id}",
    tag = "Students",
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("X-CSRF-Token" = String, Header, description = "Value of the csrf_token cookie")
    ),
    responses(
        (status = 303, description = "Redirect to the list, or back to the confirmation with saveChangesError=true"),
        (status = 400, description = "Missing or mismatched anti-forgery token")
    )
)]
pub async fn delete_student(
    State(state): State<StudentsState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.service.delete(id).await {
        Ok(DeleteOutcome::Deleted) | Ok(DeleteOutcome::Missing) => {
            Redirect::to(INDEX).into_response()
        }
        Err(e) => {
            warn!(student_id = id, error = %e, "Delete failed, returning to confirmation");
            Redirect::to(&format!("/Students/Delete/{}?saveChangesError=true", id)).into_response()
        }
    }
}
