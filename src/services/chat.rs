use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::db::queries;
use crate::models::{ChatMessage, ChatSession};
use crate::services::matcher::LEAD_CAPTURED_SUFFIX;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub reply: String,
    pub lead_captured: bool,
    pub newly_captured: bool,
}

fn session_ttl(state: &AppState) -> Duration {
    Duration::minutes(state.config.session_ttl_minutes)
}

pub fn load_session(state: &Arc<AppState>, session_id: &str) -> anyhow::Result<ChatSession> {
    let existing = {
        let db = state.db.lock().unwrap();
        queries::get_session(&db, session_id)?
    };

    Ok(existing.unwrap_or_else(|| {
        ChatSession::new(session_id, Utc::now().naive_utc(), session_ttl(state))
    }))
}

/// Appends the user message and the canned reply. Blank input leaves the
/// session untouched and returns `None`.
pub fn process_message(
    state: &Arc<AppState>,
    session_id: &str,
    message: &str,
) -> anyhow::Result<Option<ChatOutcome>> {
    if message.trim().is_empty() {
        return Ok(None);
    }

    let mut session = load_session(state, session_id)?;
    session.messages.push(ChatMessage::user(message));

    let catalog = &state.catalog;
    let mut reply = catalog.respond(message).to_string();

    let newly_captured = !session.lead_captured && catalog.is_booking_intent(message);
    if newly_captured {
        reply.push_str(LEAD_CAPTURED_SUFFIX);
        session.lead_captured = true;
    }

    tracing::info!(
        session = session_id,
        keyword = catalog.matched_keyword(message).unwrap_or("default"),
        newly_captured,
        "chat message"
    );

    session.messages.push(ChatMessage::bot(reply.clone()));
    session.touch(Utc::now().naive_utc(), session_ttl(state));

    {
        let db = state.db.lock().unwrap();
        queries::save_session(&db, &session)?;
    }

    Ok(Some(ChatOutcome {
        reply,
        lead_captured: session.lead_captured,
        newly_captured,
    }))
}

pub fn clear_session(state: &Arc<AppState>, session_id: &str) -> anyhow::Result<ChatSession> {
    let mut session = load_session(state, session_id)?;
    session.clear();
    session.touch(Utc::now().naive_utc(), session_ttl(state));

    {
        let db = state.db.lock().unwrap();
        queries::save_session(&db, &session)?;
    }

    tracing::info!(session = session_id, "chat cleared");
    Ok(session)
}
