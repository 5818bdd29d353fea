use std::env;

#[derive(Clone, Debug, PartialEq)]
pub enum LeadStoreKind {
    /// Append every accepted lead to a CSV file.
    Csv,
    /// Accept the form and show the confirmation, store nothing.
    None,
}

impl LeadStoreKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "display" => LeadStoreKind::None,
            _ => LeadStoreKind::Csv,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub lead_store: LeadStoreKind,
    pub leads_csv_path: String,
    pub session_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparseable values
    /// take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "kinetic_flow.db".to_string()),
            lead_store: lookup("LEAD_STORE")
                .map(|v| LeadStoreKind::parse(&v))
                .unwrap_or(LeadStoreKind::Csv),
            leads_csv_path: lookup("LEADS_CSV_PATH").unwrap_or_else(|| "leads.csv".to_string()),
            session_ttl_minutes: lookup("SESSION_TTL_MINUTES")
                .and_then(|v| v.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(120),
        }
    }
}
