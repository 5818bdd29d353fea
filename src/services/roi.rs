use crate::errors::AppError;
use crate::models::{RoiInputs, RoiReport};

fn check_non_negative(name: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{name} must be a non-negative number"
        )));
    }
    Ok(())
}

fn check_percent(name: &str, value: f64) -> Result<(), AppError> {
    check_non_negative(name, value)?;
    if value > 100.0 {
        return Err(AppError::Validation(format!("{name} must be at most 100")));
    }
    Ok(())
}

pub fn validate(inputs: &RoiInputs) -> Result<(), AppError> {
    check_non_negative("monthly_leads", inputs.monthly_leads)?;
    check_percent("conversion_rate", inputs.conversion_rate)?;
    check_non_negative("avg_deal_value", inputs.avg_deal_value)?;
    check_percent("after_hours_pct", inputs.after_hours_pct)?;
    check_non_negative("monthly_cost", inputs.monthly_cost)?;
    if inputs.monthly_cost == 0.0 {
        return Err(AppError::Validation(
            "monthly_cost must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Revenue recovered by answering the leads that arrive outside business
/// hours. Call [`validate`] first; this does no checking of its own.
pub fn compute(inputs: &RoiInputs) -> RoiReport {
    let after_hours_leads = inputs.monthly_leads * inputs.after_hours_pct / 100.0;
    let recovered_bookings = after_hours_leads * inputs.conversion_rate / 100.0;
    let additional_revenue = recovered_bookings * inputs.avg_deal_value;
    let net_monthly_gain = additional_revenue - inputs.monthly_cost;

    RoiReport {
        after_hours_leads,
        recovered_bookings,
        additional_revenue,
        annual_revenue: additional_revenue * 12.0,
        net_monthly_gain,
        roi_pct: net_monthly_gain / inputs.monthly_cost * 100.0,
        roi_multiple: additional_revenue / inputs.monthly_cost,
    }
}

pub fn calculate(inputs: &RoiInputs) -> Result<RoiReport, AppError> {
    validate(inputs)?;
    Ok(compute(inputs))
}
