use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column order of the lead file.
pub const LEAD_CSV_HEADER: [&str; 5] = ["timestamp", "name", "email", "phone", "message"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl LeadRecord {
    pub fn from_form(form: &ContactForm, at: DateTime<Utc>) -> Self {
        let message = match form.business.as_deref().map(str::trim) {
            Some(business) if !business.is_empty() => {
                format!("[{business}] {}", form.message.trim())
            }
            _ => form.message.trim().to_string(),
        };

        Self {
            timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            message,
        }
    }

    pub fn as_row(&self) -> [&str; 5] {
        [
            self.timestamp.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.message.as_str(),
        ]
    }
}
