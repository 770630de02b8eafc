//! Liveness and readiness probes

use aitopia_db::{DbPool, MIGRATOR};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ErrorResponse;
use crate::state::AppState;

const SERVICE_NAME: &str = "aitopia-api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: &'static str,
    pub database: &'static str,
    /// Latest migration applied to the database
    pub schema_version: i64,
    pub pool_size: u32,
    pub idle_connections: usize,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /ready
///
/// Ready once the database answers and carries every embedded migration.
pub async fn ready(State(state): State<AppState>) -> Response {
    let applied = match applied_schema_version(&state.pool).await {
        Ok(version) => version,
        Err(e) => {
            tracing::error!(error = ?e, "Database readiness check failed");
            return not_ready("Database unavailable", "DATABASE_UNAVAILABLE");
        }
    };

    let expected = expected_schema_version();
    if applied < expected {
        tracing::warn!(applied, expected, "Database schema is behind");
        return not_ready("Database schema is behind", "SCHEMA_PENDING");
    }

    Json(ReadyResponse {
        status: "ready",
        database: "connected",
        schema_version: applied,
        pool_size: state.pool.size(),
        idle_connections: state.pool.num_idle(),
    })
    .into_response()
}

async fn applied_schema_version(pool: &DbPool) -> Result<i64, sqlx::Error> {
    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await?;
    Ok(version.unwrap_or(0))
}

fn expected_schema_version() -> i64 {
    MIGRATOR.iter().map(|m| m.version).max().unwrap_or(0)
}

fn not_ready(message: &str, code: &str) -> Response {
    let body = ErrorResponse {
        message: message.to_string(),
        code: code.to_string(),
    };
    (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
}
