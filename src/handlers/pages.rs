use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ContactForm, DashboardSnapshot, RoiInputs, SampleMetricSeries};
use crate::services::{chat, dashboard, leads, roi};
use crate::state::AppState;
use crate::web::{self, BookStatus};

use super::session::SessionId;

pub async fn home_page() -> Html<String> {
    Html(web::home())
}

// GET /agent
pub async fn agent_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session_id = SessionId::from_headers(&headers);
    let session = chat::load_session(&state, &session_id.id)?;
    Ok(session_id.attach(Html(web::agent(&session)).into_response()))
}

#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

// POST /agent
pub async fn agent_send(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Result<Response, AppError> {
    let session_id = SessionId::from_headers(&headers);
    chat::process_message(&state, &session_id.id, &form.message)?;
    Ok(session_id.attach(Redirect::to("/agent").into_response()))
}

// POST /agent/clear
pub async fn agent_clear(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session_id = SessionId::from_headers(&headers);
    chat::clear_session(&state, &session_id.id)?;
    Ok(session_id.attach(Redirect::to("/agent").into_response()))
}

pub(crate) fn fresh_dashboard() -> (SampleMetricSeries, DashboardSnapshot) {
    let mut rng = rand::thread_rng();
    let series = dashboard::sample_series(&mut rng, Utc::now().date_naive());
    let snapshot = dashboard::snapshot(&series);
    (series, snapshot)
}

// GET /dashboard
pub async fn dashboard_page() -> Html<String> {
    let (series, snapshot) = fresh_dashboard();
    Html(web::dashboard(&series, &snapshot))
}

/// Raw calculator fields; blank fields fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct RoiQuery {
    pub monthly_leads: Option<String>,
    pub conversion_rate: Option<String>,
    pub avg_deal_value: Option<String>,
    pub after_hours_pct: Option<String>,
    pub monthly_cost: Option<String>,
}

fn parse_field(name: &str, raw: &Option<String>, default: f64) -> Result<f64, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| format!("{name} must be a number")),
    }
}

impl RoiQuery {
    pub fn is_empty(&self) -> bool {
        [
            &self.monthly_leads,
            &self.conversion_rate,
            &self.avg_deal_value,
            &self.after_hours_pct,
            &self.monthly_cost,
        ]
        .iter()
        .all(|f| f.is_none())
    }

    pub fn to_inputs(&self) -> Result<RoiInputs, String> {
        let d = RoiInputs::default();
        Ok(RoiInputs {
            monthly_leads: parse_field("monthly_leads", &self.monthly_leads, d.monthly_leads)?,
            conversion_rate: parse_field("conversion_rate", &self.conversion_rate, d.conversion_rate)?,
            avg_deal_value: parse_field("avg_deal_value", &self.avg_deal_value, d.avg_deal_value)?,
            after_hours_pct: parse_field("after_hours_pct", &self.after_hours_pct, d.after_hours_pct)?,
            monthly_cost: parse_field("monthly_cost", &self.monthly_cost, d.monthly_cost)?,
        })
    }
}

// GET /roi
pub async fn roi_page(Query(query): Query<RoiQuery>) -> Html<String> {
    if query.is_empty() {
        return Html(web::roi(&RoiInputs::default(), None));
    }

    match query.to_inputs() {
        Ok(inputs) => {
            let outcome = roi::calculate(&inputs).map_err(|e| match e {
                AppError::Validation(msg) => msg,
                other => other.to_string(),
            });
            Html(web::roi(&inputs, Some(outcome)))
        }
        Err(msg) => Html(web::roi(&RoiInputs::default(), Some(Err(msg)))),
    }
}

// GET /book
pub async fn book_page() -> Html<String> {
    Html(web::book(BookStatus::Blank))
}

// POST /book
pub async fn book_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    match leads::submit(&state, &form).await {
        Ok(lead) => Ok(Html(web::book(BookStatus::Submitted { name: &lead.name })).into_response()),
        Err(AppError::Validation(error)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(web::book(BookStatus::Invalid {
                error: &error,
                form: &form,
            })),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}
