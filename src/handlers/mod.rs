pub mod api;
pub mod health;
pub mod pages;
pub mod session;

use std::sync::Arc;

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(pages::home_page))
        .route("/agent", get(pages::agent_page).post(pages::agent_send))
        .route("/agent/clear", post(pages::agent_clear))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/roi", get(pages::roi_page))
        .route("/book", get(pages::book_page).post(pages::book_submit))
        .route("/api/chat", get(api::get_transcript).post(api::send_chat))
        .route("/api/chat/clear", post(api::clear_chat))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/roi", post(api::calculate_roi))
        .route("/api/leads", post(api::submit_lead))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
