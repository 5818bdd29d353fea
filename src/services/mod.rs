pub mod chat;
pub mod dashboard;
pub mod leads;
pub mod matcher;
pub mod roi;
