// POST /api/analyze — run and store an analysis for a posted snapshot.
//
// The body is a `PageMetrics` JSON document. The response carries the full
// report plus any alerts raised against the page's previous run.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::error;

use crate::metrics::PageMetrics;
use crate::pipeline::process_metrics;
use crate::web::{api_error, AppState};

pub async fn analyze_page(
    State(state): State<AppState>,
    Json(mut metrics): Json<PageMetrics>,
) -> Response {
    if metrics.page_id.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "page_id must not be empty");
    }
    if metrics.industry.is_none() {
        metrics.industry = state.config.industry.clone();
    }

    match process_metrics(
        state.db.as_ref(),
        &metrics,
        &state.config.alert_thresholds,
        Utc::now(),
    )
    .await
    {
        Ok(outcome) => Json(serde_json::json!({
            "analysis_id": outcome.analysis_id,
            "report": outcome.report,
            "alerts": outcome.alerts,
        }))
        .into_response(),
        Err(e) => {
            error!(page_id = metrics.page_id.as_str(), error = %e, "Analysis failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
        }
    }
}
