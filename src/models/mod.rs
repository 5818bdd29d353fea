pub mod chat;
pub mod lead;
pub mod metrics;
pub mod roi;

pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use lead::{ContactForm, LeadRecord, LEAD_CSV_HEADER};
pub use metrics::{DashboardSnapshot, FunnelStage, SampleMetricSeries};
pub use roi::{RoiInputs, RoiReport};
