use serde::{Deserialize, Serialize};

fn default_monthly_cost() -> f64 {
    699.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiInputs {
    pub monthly_leads: f64,
    /// Percent, 0-100.
    pub conversion_rate: f64,
    pub avg_deal_value: f64,
    /// Percent of leads arriving outside business hours, 0-100.
    pub after_hours_pct: f64,
    #[serde(default = "default_monthly_cost")]
    pub monthly_cost: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            monthly_leads: 100.0,
            conversion_rate: 15.0,
            avg_deal_value: 1500.0,
            after_hours_pct: 35.0,
            monthly_cost: default_monthly_cost(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiReport {
    pub after_hours_leads: f64,
    pub recovered_bookings: f64,
    pub additional_revenue: f64,
    pub annual_revenue: f64,
    pub net_monthly_gain: f64,
    pub roi_pct: f64,
    pub roi_multiple: f64,
}
