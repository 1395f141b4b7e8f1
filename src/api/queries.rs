use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_limit, validate_status_filter};
use super::{ApiError, AppState, QueryHistoryResponse, QueryLogDto};
use crate::constants::limits::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub status: Option<String>,
}

const fn default_limit() -> u64 {
    DEFAULT_HISTORY_LIMIT
}

/// `GET /queries?limit=20&status=error`
///
/// Newest lookups first. `total` counts every stored record, unfiltered.
pub async fn list_queries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<QueryHistoryResponse>, ApiError> {
    let limit = validate_limit(query.limit)?;
    let status = query
        .status
        .as_deref()
        .map(validate_status_filter)
        .transpose()?;

    let store = state.store();
    let entries = store
        .recent_queries(limit, status.map(|s| s.as_str()))
        .await
        .map_err(ApiError::database)?;
    let total = store.count_queries().await.map_err(ApiError::database)?;

    let queries = entries.into_iter().map(QueryLogDto::from).collect();
    Ok(Json(QueryHistoryResponse::new(total, queries)))
}
