//! Service Endpoint Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: &'static str,
}

/// GET / - service banner
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Mesa - restaurant reservation service",
    })
}

/// GET /version
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health - liveness plus a `SELECT 1` database probe
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health probe failed");
            "error"
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
