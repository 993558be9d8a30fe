// GET /api/alerts — most recent alerts, optional ?page_id= and ?limit=.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct AlertsQuery {
    pub page_id: Option<String>,
    /// Default 50, max 500
    pub limit: Option<u32>,
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertsQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    match state
        .db
        .get_recent_alerts(params.page_id.as_deref(), limit)
        .await
    {
        Ok(alerts) => Json(serde_json::json!({
            "count": alerts.len(),
            "alerts": alerts,
        }))
        .into_response(),
        Err(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load alerts"),
    }
}
