use axum::Json;
use serde::Serialize;

/// Plain-text liveness probe kept at the root path.
pub async fn liveness() -> &'static str {
    "API is working"
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "rescue-reports",
        version: env!("CARGO_PKG_VERSION"),
    })
}
