use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    /// Transcript label shown next to each message.
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "You",
            ChatRole::Bot => "Frontier Agent",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub messages: Vec<ChatMessage>,
    pub lead_captured: bool,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl ChatSession {
    pub fn new(id: &str, now: NaiveDateTime, ttl: chrono::Duration) -> Self {
        Self {
            id: id.to_string(),
            messages: Vec::new(),
            lead_captured: false,
            last_activity: now,
            expires_at: now + ttl,
        }
    }

    pub fn touch(&mut self, now: NaiveDateTime, ttl: chrono::Duration) {
        self.last_activity = now;
        self.expires_at = now + ttl;
    }

    pub fn clear(&mut self) {
        self.messages = Vec::new();
        self.lead_captured = false;
    }
}
