use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::{ContactForm, LeadRecord, LEAD_CSV_HEADER};
use crate::state::AppState;

#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn record(&self, lead: &LeadRecord) -> anyhow::Result<()>;
}

/// Appends one row per lead; the file and its header are created on first
/// write. Writes run on the blocking pool, one at a time.
pub struct CsvLeadStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvLeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

fn append_row(path: &Path, lead: &LeadRecord) -> anyhow::Result<()> {
    let needs_header = std::fs::metadata(path)
        .map(|m| m.len() == 0)
        .unwrap_or(true);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open lead file {}", path.display()))?;

    let mut writer = csv::Writer::from_writer(file);
    if needs_header {
        writer.write_record(LEAD_CSV_HEADER)?;
    }
    writer.write_record(lead.as_row())?;
    writer.flush().context("failed to flush lead file")?;
    Ok(())
}

#[async_trait]
impl LeadSink for CsvLeadStore {
    async fn record(&self, lead: &LeadRecord) -> anyhow::Result<()> {
        let path = self.path.clone();
        let lock = Arc::clone(&self.write_lock);
        let lead = lead.clone();

        tokio::task::spawn_blocking(move || {
            // The header check and the append must not interleave with another write.
            let _guard = lock
                .lock()
                .map_err(|_| anyhow::anyhow!("lead file lock poisoned"))?;
            append_row(&path, &lead)
        })
        .await
        .context("lead writer task failed")?
    }
}

/// Accepts every lead and stores nothing.
pub struct ConfirmOnlySink;

#[async_trait]
impl LeadSink for ConfirmOnlySink {
    async fn record(&self, lead: &LeadRecord) -> anyhow::Result<()> {
        tracing::debug!(email = %lead.email, "lead accepted without storage");
        Ok(())
    }
}

pub fn validate(form: &ContactForm) -> Result<(), AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if form.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }
    Ok(())
}

/// Validates and records the lead. Storage failures are logged and
/// otherwise ignored so the visitor still gets the confirmation.
pub async fn submit(state: &Arc<AppState>, form: &ContactForm) -> Result<LeadRecord, AppError> {
    validate(form)?;

    let lead = LeadRecord::from_form(form, Utc::now());

    match state.leads.record(&lead).await {
        Ok(()) => tracing::info!(email = %lead.email, "lead captured"),
        Err(e) => tracing::warn!(error = %e, email = %lead.email, "failed to store lead"),
    }

    Ok(lead)
}
