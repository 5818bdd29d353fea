use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{ChatMessage, ChatSession};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_str() -> String {
    Utc::now().naive_utc().format(TS_FORMAT).to_string()
}

fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

// ── Chat sessions ──

pub fn get_session(conn: &Connection, id: &str) -> anyhow::Result<Option<ChatSession>> {
    let mut stmt = conn.prepare(
        "SELECT id, messages, lead_captured, last_activity, expires_at
         FROM chat_sessions WHERE id = ?1 AND expires_at > ?2",
    )?;

    let result = stmt.query_row(params![id, now_str()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, bool>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    });

    match result {
        Ok((id, messages_json, lead_captured, last_activity, expires_at)) => {
            let messages: Vec<ChatMessage> = match serde_json::from_str(&messages_json) {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!(session = %id, error = %e, "unreadable chat transcript, starting empty");
                    Vec::new()
                }
            };

            Ok(Some(ChatSession {
                id,
                messages,
                lead_captured,
                last_activity: parse_ts(&last_activity),
                expires_at: parse_ts(&expires_at),
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_session(conn: &Connection, session: &ChatSession) -> anyhow::Result<()> {
    let messages_json = serde_json::to_string(&session.messages)?;
    let last_activity = session.last_activity.format(TS_FORMAT).to_string();
    let expires_at = session.expires_at.format(TS_FORMAT).to_string();

    conn.execute(
        "INSERT INTO chat_sessions (id, messages, lead_captured, last_activity, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
           messages = excluded.messages,
           lead_captured = excluded.lead_captured,
           last_activity = excluded.last_activity,
           expires_at = excluded.expires_at",
        params![
            session.id,
            messages_json,
            session.lead_captured,
            last_activity,
            expires_at
        ],
    )?;
    Ok(())
}

pub fn expire_old_sessions(conn: &Connection) -> anyhow::Result<usize> {
    let count = conn.execute(
        "DELETE FROM chat_sessions WHERE expires_at <= ?1",
        params![now_str()],
    )?;
    Ok(count)
}

pub fn count_active_sessions(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM chat_sessions WHERE expires_at > ?1",
        params![now_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}
