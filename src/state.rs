use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::leads::LeadSink;
use crate::services::matcher::ResponseCatalog;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub catalog: ResponseCatalog,
    pub leads: Box<dyn LeadSink>,
}
