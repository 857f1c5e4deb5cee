//! Home and About handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{AboutView, EnrollmentDateGroupDto};
use crate::application::SchoolStatisticsService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};

#[derive(Clone)]
pub struct HomeState {
    pub statistics: Arc<SchoolStatisticsService>,
}

#[utoipa::path(
    get,
    path = "/Home/About",
    tag = "Home",
    responses(
        (status = 200, description = "Student counts per enrollment date", body = ApiResponse<AboutView>)
    )
)]
pub async fn about(
    State(state): State<HomeState>,
) -> Result<Json<ApiResponse<AboutView>>, ApiError> {
    let groups = state
        .statistics
        .enrollment_date_groups()
        .await
        .map_err(domain_error)?;

    let total_students = groups.iter().map(|g| g.student_count).sum();
    let groups: Vec<EnrollmentDateGroupDto> = groups.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(AboutView {
        groups,
        total_students,
    })))
}
