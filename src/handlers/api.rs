use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ChatMessage, ContactForm, DashboardSnapshot, RoiInputs, RoiReport, SampleMetricSeries};
use crate::services::{chat, leads, roi};
use crate::state::AppState;

use super::pages::fresh_dashboard;
use super::session::SessionId;

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
    pub lead_captured: bool,
}

// GET /api/chat
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session_id = SessionId::from_headers(&headers);
    let session = chat::load_session(&state, &session_id.id)?;

    let body = TranscriptResponse {
        session_id: session.id,
        messages: session.messages,
        lead_captured: session.lead_captured,
    };
    Ok(session_id.attach(Json(body).into_response()))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

// POST /api/chat
pub async fn send_chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let session_id = SessionId::from_headers(&headers);

    let outcome = chat::process_message(&state, &session_id.id, &payload.message)?
        .ok_or_else(|| AppError::Validation("message is required".to_string()))?;

    Ok(session_id.attach(Json(outcome).into_response()))
}

// POST /api/chat/clear
pub async fn clear_chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session_id = SessionId::from_headers(&headers);
    chat::clear_session(&state, &session_id.id)?;
    Ok(session_id.attach(Json(serde_json::json!({"ok": true})).into_response()))
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub snapshot: DashboardSnapshot,
    pub series: SampleMetricSeries,
}

// GET /api/dashboard
pub async fn get_dashboard() -> Json<DashboardResponse> {
    let (series, snapshot) = fresh_dashboard();
    Json(DashboardResponse { snapshot, series })
}

// POST /api/roi
pub async fn calculate_roi(
    inputs: Result<Json<RoiInputs>, JsonRejection>,
) -> Result<Json<RoiReport>, AppError> {
    let Json(inputs) = inputs?;
    Ok(Json(roi::calculate(&inputs)?))
}

// POST /api/leads
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    form: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(form) = form?;
    leads::submit(&state, &form).await?;
    Ok(Json(serde_json::json!({"ok": true})))
}
