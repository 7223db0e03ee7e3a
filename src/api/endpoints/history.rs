//! Consultation history endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::ConsultationRecord;

const DEFAULT_LIMIT: u32 = 50;

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub consultations: Vec<ConsultationRecord>,
}

/// `GET /api/history` — recent completed consultations, newest first.
pub async fn recent(
    State(ctx): State<ApiContext>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let consultations =
        db::list_consultations(&conn, params.limit.unwrap_or(DEFAULT_LIMIT))?;
    Ok(Json(HistoryResponse { consultations }))
}
