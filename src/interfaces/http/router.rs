//! HTTP router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{SchoolStatisticsService, StudentService};
use crate::interfaces::http::common::{not_found, ApiResponse};
use crate::interfaces::http::middleware::csrf_middleware;
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::home::{self, HomeState};
use crate::interfaces::http::modules::metrics::{self as metrics_module, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::students::{self, StudentsState};

/// Everything the handlers need, built once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<StudentService>,
    pub statistics: Arc<SchoolStatisticsService>,
    pub db: DatabaseConnection,
    pub metrics: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Students
        students::list_students,
        students::student_details,
        students::create_form,
        students::create_student,
        students::edit_form,
        students::edit_student,
        students::delete_confirmation,
        students::delete_student,
        // Home
        home::about,
        // Health
        health::health_check,
        metrics_module::prometheus_metrics,
    ),
    components(
        schemas(
            ApiResponse<String>,
            students::StudentDto,
            students::StudentPageDto,
            students::StudentsIndexView,
            students::EnrollmentDto,
            students::StudentDetailsView,
            students::StudentFormView,
            students::StudentFormRequest,
            students::DeleteConfirmationView,
            home::EnrollmentDateGroupDto,
            home::AboutView,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Students", description = "Student list, details and create/edit/delete forms. Posts need the X-CSRF-Token header."),
        (name = "Home", description = "School statistics"),
        (name = "Health", description = "Service health and Prometheus metrics"),
    ),
    info(
        title = "Contoso University API",
        version = "1.0.0",
        description = "Student records for Contoso University",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let student_routes = Router::new()
        .route("/Students", get(students::list_students))
        .route("/Students/Details/{id}", get(students::student_details))
        .route(
            "/Students/Create",
            get(students::create_form).post(students::create_student),
        )
        .route(
            "/Students/Edit/{id}",
            get(students::edit_form).post(students::edit_student),
        )
        .route(
            "/Students/Delete/{id}",
            get(students::delete_confirmation).post(students::delete_student),
        )
        .layer(middleware::from_fn(csrf_middleware))
        .with_state(StudentsState {
            service: state.students.clone(),
        });

    let home_routes = Router::new()
        .route("/", get(home::about))
        .route("/Home/About", get(home::about))
        .with_state(HomeState {
            statistics: state.statistics.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: state.db.clone(),
            started_at: state.started_at.clone(),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_module::prometheus_metrics))
        .with_state(MetricsState {
            handle: state.metrics.clone(),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(student_routes)
        .merge(home_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(metrics_module::http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::students::{DELETE_FAILED_MESSAGE, SAVE_FAILED_MESSAGE};
    use crate::application::MutationStrategy;
    use crate::domain::repositories::testing::{conflict, storage_error, FailingRepositories};
    use crate::domain::{DomainResult, RepositoryProvider, WriteOutcome};
    use crate::infrastructure::database::testing::{empty_database, seeded_database};
    use crate::infrastructure::SeaOrmRepositoryProvider;
    use crate::interfaces::http::middleware::CSRF_HEADER;

    async fn app(strategy: MutationStrategy) -> Router {
        let db = seeded_database().await;
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        create_router(AppState {
            students: Arc::new(StudentService::new(
                repos.clone(),
                strategy,
                NonZeroU64::new(3).unwrap(),
            )),
            statistics: Arc::new(SchoolStatisticsService::new(repos)),
            db,
            metrics: PrometheusBuilder::new().build_recorder().handle(),
            started_at: Arc::new(Instant::now()),
        })
    }

    /// Router over repositories whose writes answer with `write`.
    async fn failing_app(write: fn() -> DomainResult<WriteOutcome>) -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(FailingRepositories::new(write));
        create_router(AppState {
            students: Arc::new(StudentService::new(
                repos.clone(),
                MutationStrategy::Optimistic,
                NonZeroU64::new(3).unwrap(),
            )),
            statistics: Arc::new(SchoolStatisticsService::new(repos)),
            db: empty_database().await,
            metrics: PrometheusBuilder::new().build_recorder().handle(),
            started_at: Arc::new(Instant::now()),
        })
    }

    async fn get(app: &Router, uri: &str) -> Response<Body> {
        app.clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn location(resp: &Response<Body>) -> &str {
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    /// Fetch a form page and pull the anti-forgery token out of its cookie.
    async fn csrf_token(app: &Router) -> String {
        let resp = get(app, "/Students/Create").await;
        let cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        let (_, rest) = cookie.split_once('=').unwrap();
        rest.split(';').next().unwrap().to_string()
    }

    async fn post(app: &Router, uri: &str, body: Option<Value>) -> Response<Body> {
        let token = csrf_token(app).await;
        let builder = Request::post(uri)
            .header(header::COOKIE, format!("csrf_token={token}"))
            .header(CSRF_HEADER, token);
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(req).await.unwrap()
    }

    fn last_names(view: &Value) -> Vec<String> {
        view["data"]["students"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["last_name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn seven_students_second_page() {
        let app = app(MutationStrategy::Optimistic).await;
        let resp = post(&app, "/Students/Delete/8", None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let view = json_body(get(&app, "/Students?pageNumber=2").await).await;

        assert_eq!(last_names(&view), ["Barzdukas", "Justice", "Li"]);
        let page = &view["data"]["students"];
        assert_eq!(page["page_index"], 2);
        assert_eq!(page["total_pages"], 3);
        assert_eq!(page["has_previous_page"], true);
        assert_eq!(page["has_next_page"], true);
    }

    #[tokio::test]
    async fn filter_without_matches_is_empty() {
        let app = app(MutationStrategy::Optimistic).await;
        let view = json_body(get(&app, "/Students?searchString=zzz").await).await;

        assert!(last_names(&view).is_empty());
        assert_eq!(view["data"]["students"]["total_pages"], 0);
        assert_eq!(view["data"]["students"]["has_next_page"], false);
    }

    #[tokio::test]
    async fn new_search_resets_page() {
        let app = app(MutationStrategy::Optimistic).await;
        let view = json_body(get(&app, "/Students?searchString=a&pageNumber=3").await).await;

        assert_eq!(view["data"]["students"]["page_index"], 1);
        assert_eq!(view["data"]["current_filter"], "a");
    }

    #[tokio::test]
    async fn malformed_page_number_means_first_page() {
        let app = app(MutationStrategy::Optimistic).await;

        for uri in [
            "/Students?pageNumber=",
            "/Students?pageNumber=abc",
            "/Students?sortOrder=&pageNumber=%20",
        ] {
            let resp = get(&app, uri).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            let view = json_body(resp).await;
            assert_eq!(view["data"]["students"]["page_index"], 1, "{uri}");
            assert_eq!(last_names(&view), ["Alexander", "Alonso", "Anand"], "{uri}");
        }
    }

    #[tokio::test]
    async fn search_with_blank_page_number_is_served() {
        let app = app(MutationStrategy::Optimistic).await;
        let resp = get(&app, "/Students?searchString=al&pageNumber=").await;

        assert_eq!(resp.status(), StatusCode::OK);
        let view = json_body(resp).await;
        assert_eq!(view["data"]["current_filter"], "al");
        assert_eq!(last_names(&view), ["Alexander", "Alonso"]);
    }

    #[tokio::test]
    async fn blank_save_changes_flag_shows_no_message() {
        let app = app(MutationStrategy::Optimistic).await;
        let resp = get(&app, "/Students/Delete/1?saveChangesError=").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(json_body(resp).await["data"]["error_message"].is_null());
    }

    #[tokio::test]
    async fn sort_change_keeps_filter() {
        let app = app(MutationStrategy::Optimistic).await;
        let view = json_body(get(&app, "/Students?sortOrder=date_asc&currentFilter=an").await).await;

        assert_eq!(last_names(&view), ["Alexander", "Li", "Anand"]);
        assert_eq!(view["data"]["students"]["total_count"], 4);
        assert_eq!(view["data"]["current_filter"], "an");
        assert_eq!(view["data"]["date_sort_param"], "date_desc");
        assert_eq!(view["data"]["name_sort_param"], "");
    }

    #[tokio::test]
    async fn details_include_enrollments() {
        let app = app(MutationStrategy::Optimistic).await;

        let view = json_body(get(&app, "/Students/Details/1").await).await;
        assert_eq!(view["data"]["student"]["full_name"], "Alexander, Carson");
        assert_eq!(view["data"]["enrollments"].as_array().unwrap().len(), 3);
        assert_eq!(view["data"]["enrollments"][0]["course_title"], "Chemistry");
        assert_eq!(view["data"]["enrollments"][0]["grade"], "A");

        assert_eq!(get(&app, "/Students/Details/abc").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/Students/Details/404").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_form_carries_token() {
        let app = app(MutationStrategy::Optimistic).await;
        let resp = get(&app, "/Students/Create").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let view = json_body(resp).await;
        assert_eq!(view["data"]["csrf_token"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn create_with_empty_last_name_is_rejected() {
        let app = app(MutationStrategy::Optimistic).await;
        let body = json!({
            "last_name": "",
            "first_mid_name": "Ada",
            "enrollment_date": "2024-09-01"
        });

        let resp = post(&app, "/Students/Create", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let view = json_body(resp).await;
        assert!(view["data"]["errors"]["last_name"].is_array());
        assert_eq!(view["data"]["first_mid_name"], "Ada");

        let list = json_body(get(&app, "/Students").await).await;
        assert_eq!(list["data"]["students"]["total_count"], 8);
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let app = app(MutationStrategy::Optimistic).await;
        let body = json!({
            "id": 1,
            "last_name": "Lovelace",
            "first_mid_name": "Ada",
            "enrollment_date": "2024-09-01"
        });

        let resp = post(&app, "/Students/Create", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/Students");

        let first = json_body(get(&app, "/Students/Details/1").await).await;
        assert_eq!(first["data"]["student"]["last_name"], "Alexander");
        let found = json_body(get(&app, "/Students?searchString=Lovelace").await).await;
        assert_eq!(last_names(&found), ["Lovelace"]);
    }

    #[tokio::test]
    async fn post_without_token_is_rejected() {
        let app = app(MutationStrategy::Optimistic).await;
        let req = Request::post("/Students/Delete/1").body(Body::empty()).unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get(&app, "/Students/Details/1").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn edit_with_mismatched_id_is_not_found() {
        let app = app(MutationStrategy::Optimistic).await;
        let body = json!({
            "id": 2,
            "last_name": "Alonso",
            "first_mid_name": "Meredith",
            "enrollment_date": "2012-09-01"
        });

        let resp = post(&app, "/Students/Edit/1", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_saves_and_redirects() {
        let app = app(MutationStrategy::Optimistic).await;
        let body = json!({
            "id": 5,
            "last_name": "Li",
            "first_mid_name": "Yan Mei",
            "enrollment_date": "2012-09-01"
        });

        let resp = post(&app, "/Students/Edit/5", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let view = json_body(get(&app, "/Students/Edit/5").await).await;
        assert_eq!(view["data"]["first_mid_name"], "Yan Mei");
    }

    #[tokio::test]
    async fn edit_of_missing_student_depends_on_strategy() {
        let body = json!({
            "id": 999,
            "last_name": "Ghost",
            "first_mid_name": "Casper",
            "enrollment_date": "2012-09-01"
        });

        let optimistic = app(MutationStrategy::Optimistic).await;
        let resp = post(&optimistic, "/Students/Edit/999", Some(body.clone())).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let view = json_body(resp).await;
        assert_eq!(view["data"]["form_error"], SAVE_FAILED_MESSAGE);

        let read_first = app(MutationStrategy::ReadThenWrite).await;
        let resp = post(&read_first, "/Students/Edit/999", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn optimistic_delete_of_missing_id_flags_error() {
        let app = app(MutationStrategy::Optimistic).await;

        let resp = post(&app, "/Students/Delete/999", None).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/Students/Delete/999?saveChangesError=true");
    }

    #[tokio::test]
    async fn read_then_write_delete_of_missing_id_returns_to_list() {
        let app = app(MutationStrategy::ReadThenWrite).await;

        let resp = post(&app, "/Students/Delete/999", None).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/Students");
    }

    #[tokio::test]
    async fn failed_delete_write_flags_error() {
        let writes: [fn() -> DomainResult<WriteOutcome>; 2] = [storage_error, conflict];
        for write in writes {
            let app = failing_app(write).await;

            let resp = post(&app, "/Students/Delete/1", None).await;

            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&resp), "/Students/Delete/1?saveChangesError=true");
        }
    }

    #[tokio::test]
    async fn failed_edit_write_shows_generic_message() {
        let writes: [fn() -> DomainResult<WriteOutcome>; 2] = [storage_error, conflict];
        for write in writes {
            let app = failing_app(write).await;
            let body = json!({
                "id": 1,
                "last_name": "Alexander",
                "first_mid_name": "Carson",
                "enrollment_date": "2010-09-01"
            });

            let resp = post(&app, "/Students/Edit/1", Some(body)).await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let view = json_body(resp).await;
            assert_eq!(view["error"], SAVE_FAILED_MESSAGE);
            assert_eq!(view["data"]["form_error"], SAVE_FAILED_MESSAGE);
            assert!(!view.to_string().contains("disk I/O"));
            assert!(!view.to_string().contains("FOREIGN KEY"));
        }
    }

    #[tokio::test]
    async fn failed_create_write_shows_generic_message() {
        let app = failing_app(storage_error).await;
        let body = json!({
            "last_name": "Hopper",
            "first_mid_name": "Grace",
            "enrollment_date": "2019-09-01"
        });

        let resp = post(&app, "/Students/Create", Some(body)).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(resp).await["data"]["form_error"], SAVE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn delete_confirmation_shows_error_flag() {
        let app = app(MutationStrategy::Optimistic).await;

        let plain = json_body(get(&app, "/Students/Delete/1").await).await;
        assert!(plain["data"]["error_message"].is_null());

        let flagged = json_body(get(&app, "/Students/Delete/1?saveChangesError=true").await).await;
        assert_eq!(flagged["data"]["error_message"], DELETE_FAILED_MESSAGE);
        assert_eq!(flagged["data"]["student"]["last_name"], "Alexander");
    }

    #[tokio::test]
    async fn about_groups_by_enrollment_date() {
        let app = app(MutationStrategy::Optimistic).await;
        let view = json_body(get(&app, "/Home/About").await).await;

        let groups = view["data"]["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[3]["enrollment_date"], "2012-09-01");
        assert_eq!(groups[3]["student_count"], 3);
        assert_eq!(view["data"]["total_students"], 8);
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let app = app(MutationStrategy::Optimistic).await;
        let resp = get(&app, "/Courses").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(resp).await["success"], false);
    }

    #[tokio::test]
    async fn health_reports_database() {
        let app = app(MutationStrategy::Optimistic).await;
        let resp = get(&app, "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["database"]["status"], "ok");
        assert_eq!(body["schema"]["status"], "ok");
        assert_eq!(body["students"], 8);
    }
}
