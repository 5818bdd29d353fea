use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use kinetic_flow::config::{AppConfig, LeadStoreKind};
use kinetic_flow::db;
use kinetic_flow::handlers;
use kinetic_flow::services::leads::{ConfirmOnlySink, CsvLeadStore, LeadSink};
use kinetic_flow::services::matcher::ResponseCatalog;
use kinetic_flow::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let expired = db::queries::expire_old_sessions(&conn)?;
    if expired > 0 {
        tracing::info!("removed {expired} expired chat sessions");
    }

    let leads: Box<dyn LeadSink> = match config.lead_store {
        LeadStoreKind::Csv => {
            tracing::info!("storing leads in {}", config.leads_csv_path);
            Box::new(CsvLeadStore::new(&config.leads_csv_path))
        }
        LeadStoreKind::None => {
            tracing::info!("lead storage disabled, form submissions are confirmed only");
            Box::new(ConfirmOnlySink)
        }
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        catalog: ResponseCatalog::default(),
        leads,
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
