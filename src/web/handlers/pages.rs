// Tracked page handlers.
//
// GET /api/pages                    — every page with its latest score
// GET /api/pages/{page_id}/report   — most recent full report
// GET /api/pages/{page_id}/history  — snapshots plus trend, ?limit= runs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::trends::{category_trends, summarize_trend, DEFAULT_STABLE_BAND};
use crate::web::{api_error, AppState};

/// Default and maximum number of runs returned by the history endpoint.
const DEFAULT_HISTORY_LIMIT: u32 = 30;
const MAX_HISTORY_LIMIT: u32 = 365;

#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

pub async fn list_pages(State(state): State<AppState>) -> Response {
    match state.db.list_pages().await {
        Ok(pages) => Json(serde_json::json!({ "pages": pages })).into_response(),
        Err(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list pages"),
    }
}

pub async fn get_report(State(state): State<AppState>, Path(page_id): Path<String>) -> Response {
    match state.db.get_latest_report(&page_id).await {
        Ok(Some(report)) => Json(report).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "No analysis stored for this page"),
        Err(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load report"),
    }
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    match state.db.get_history(&page_id, limit).await {
        Ok(history) if history.is_empty() => {
            api_error(StatusCode::NOT_FOUND, "No analysis stored for this page")
        }
        Ok(history) => Json(serde_json::json!({
            "page_id": page_id,
            "snapshots": history,
            "trend": summarize_trend(&history, DEFAULT_STABLE_BAND),
            "categories": category_trends(&history),
        }))
        .into_response(),
        Err(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load history"),
    }
}
