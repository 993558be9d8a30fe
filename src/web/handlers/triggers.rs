// GET /api/triggers — the static trigger catalog.

use axum::response::IntoResponse;
use axum::Json;

use crate::triggers::catalog;

pub async fn list_triggers() -> impl IntoResponse {
    let definitions: Vec<_> = catalog::definitions().collect();
    Json(serde_json::json!({
        "count": definitions.len(),
        "triggers": definitions,
    }))
}
