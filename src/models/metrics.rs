use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SampleMetricSeries {
    pub dates: Vec<NaiveDate>,
    pub leads: Vec<u32>,
    pub bookings: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FunnelStage {
    pub label: &'static str,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub total_leads: u32,
    pub total_bookings: u32,
    pub conversion_pct: f64,
    pub avg_response: &'static str,
    pub funnel: Vec<FunnelStage>,
}
