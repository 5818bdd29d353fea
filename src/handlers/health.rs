use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, AppError> {
    let active_sessions = {
        let db = state.db.lock().unwrap();
        queries::count_active_sessions(&db)?
    };

    Ok(Json(serde_json::json!({
        "status": "ok",
        "active_sessions": active_sessions,
    })))
}
