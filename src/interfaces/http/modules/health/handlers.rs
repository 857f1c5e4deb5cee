//! Health check handler
//!
//! Two checks: a round trip on the pool, and a count on the `Student`
//! table, which fails until migrations have run.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Statement};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::infrastructure::database::entities::student;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every component is ok, otherwise `degraded`
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
    pub schema: ComponentHealth,
    /// Rows in the student table, when the schema check succeeded
    pub students: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

impl ComponentHealth {
    fn ok(started: Instant) -> Self {
        Self {
            status: "ok".to_string(),
            latency_ms: Some(started.elapsed().as_millis() as u64),
        }
    }

    fn failed() -> Self {
        Self {
            status: "error".to_string(),
            latency_ms: None,
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

async fn ping(db: &DatabaseConnection) -> ComponentHealth {
    let started = Instant::now();
    let statement = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    match db.execute(statement).await {
        Ok(_) => ComponentHealth::ok(started),
        Err(e) => {
            error!(error = %e, "Health check: database ping failed");
            ComponentHealth::failed()
        }
    }
}

async fn count_students(db: &DatabaseConnection) -> (ComponentHealth, Option<u64>) {
    let started = Instant::now();
    match student::Entity::find().count(db).await {
        Ok(count) => (ComponentHealth::ok(started), Some(count)),
        Err(e) => {
            error!(error = %e, "Health check: student table unavailable");
            (ComponentHealth::failed(), None)
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable and schema in place", body = HealthResponse),
        (status = 503, description = "Database unreachable or schema missing", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ping(&state.db).await;
    let (schema, students) = count_students(&state.db).await;

    let (status, http_status) = if database.is_ok() && schema.is_ok() {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
            schema,
            students,
        }),
    )
}
