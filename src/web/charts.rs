use std::fmt::Write;

use crate::models::{FunnelStage, SampleMetricSeries};

const WIDTH: f64 = 520.0;
const HEIGHT: f64 = 260.0;
const PAD: f64 = 30.0;

/// Leads per day as an SVG polyline with point markers.
pub fn line_chart(series: &SampleMetricSeries) -> String {
    let max = series.leads.iter().copied().max().unwrap_or(0).max(1) as f64;
    let steps = series.leads.len().saturating_sub(1).max(1) as f64;

    let points: Vec<(f64, f64)> = series
        .leads
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = PAD + (WIDTH - 2.0 * PAD) * i as f64 / steps;
            let y = HEIGHT - PAD - (HEIGHT - 2.0 * PAD) * v as f64 / max;
            (x, y)
        })
        .collect();

    let mut svg = format!(
        "<svg class=\"chart\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" width=\"100%\" role=\"img\" aria-label=\"Leads over time\">"
    );

    let polyline: Vec<String> = points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    let _ = write!(
        svg,
        "<polyline fill=\"none\" stroke=\"#00ff9d\" stroke-width=\"2\" points=\"{}\"/>",
        polyline.join(" ")
    );

    for ((x, y), (date, value)) in points.iter().zip(series.dates.iter().zip(&series.leads)) {
        let _ = write!(
            svg,
            "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"3\" fill=\"#00ff9d\"><title>{}: {value}</title></circle>",
            date.format("%b %d")
        );
    }

    if let (Some(first), Some(last)) = (series.dates.first(), series.dates.last()) {
        let _ = write!(
            svg,
            "<text x=\"{PAD}\" y=\"{}\" fill=\"#aaa\" font-size=\"11\">{}</text><text x=\"{}\" y=\"{}\" fill=\"#aaa\" font-size=\"11\" text-anchor=\"end\">{}</text>",
            HEIGHT - 8.0,
            first.format("%b %d"),
            WIDTH - PAD,
            HEIGHT - 8.0,
            last.format("%b %d"),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Centered horizontal bars, widest first.
pub fn funnel_chart(stages: &[FunnelStage]) -> String {
    let max = stages.iter().map(|s| s.value).max().unwrap_or(0).max(1) as f64;
    let row = (HEIGHT - PAD) / stages.len().max(1) as f64;

    let mut svg = format!(
        "<svg class=\"chart\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" width=\"100%\" role=\"img\" aria-label=\"Conversion funnel\">"
    );

    for (i, stage) in stages.iter().enumerate() {
        let width = (WIDTH - 2.0 * PAD) * stage.value as f64 / max;
        let x = (WIDTH - width) / 2.0;
        let y = PAD / 2.0 + row * i as f64;
        let _ = write!(
            svg,
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{width:.1}\" height=\"{:.1}\" rx=\"4\" fill=\"{}\"/><text x=\"{}\" y=\"{:.1}\" fill=\"#000\" font-size=\"13\" font-weight=\"bold\" text-anchor=\"middle\">{}: {}</text>",
            row - 6.0,
            stage.color,
            WIDTH / 2.0,
            y + row / 2.0,
            stage.label,
            stage.value,
        );
    }

    svg.push_str("</svg>");
    svg
}
