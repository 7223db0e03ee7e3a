//! Health endpoint: service liveness plus a knowledge-base probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub symptom_count: i64,
    pub active_sessions: usize,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let symptom_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM symptoms", [], |row| row.get(0))
        .map_err(crate::db::DatabaseError::from)?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
        symptom_count,
        active_sessions: ctx.core.session_count()?,
    }))
}
