use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::{DashboardSnapshot, FunnelStage, SampleMetricSeries};

pub const SERIES_DAYS: usize = 30;
pub const AVG_RESPONSE: &str = "8 sec";

/// Thirty days of made-up lead counts ending on `end_date`.
pub fn sample_series<R: Rng>(rng: &mut R, end_date: NaiveDate) -> SampleMetricSeries {
    let dates: Vec<NaiveDate> = (0..SERIES_DAYS)
        .rev()
        .map(|offset| end_date - Duration::days(offset as i64))
        .collect();

    let leads: Vec<u32> = (0..SERIES_DAYS).map(|_| rng.gen_range(5..=20)).collect();

    let bookings = leads
        .iter()
        .map(|&l| (l as f64 * rng.gen_range(0.15..0.25)).floor() as u32)
        .collect();

    SampleMetricSeries {
        dates,
        leads,
        bookings,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn snapshot(series: &SampleMetricSeries) -> DashboardSnapshot {
    let total_leads: u32 = series.leads.iter().sum();
    let total_bookings: u32 = series.bookings.iter().sum();

    let conversion_pct = if total_leads == 0 {
        0.0
    } else {
        round1(total_bookings as f64 / total_leads as f64 * 100.0)
    };

    let funnel = vec![
        FunnelStage {
            label: "Leads",
            value: total_leads,
            color: "#00ff9d",
        },
        FunnelStage {
            label: "Conversations",
            value: (total_leads as f64 * 0.8) as u32,
            color: "#00b8ff",
        },
        FunnelStage {
            label: "Qualified",
            value: (total_leads as f64 * 0.4) as u32,
            color: "#8b5cf6",
        },
        FunnelStage {
            label: "Booked",
            value: total_bookings,
            color: "#ff6b6b",
        },
    ];

    DashboardSnapshot {
        total_leads,
        total_bookings,
        conversion_pct,
        avg_response: AVG_RESPONSE,
        funnel,
    }
}
