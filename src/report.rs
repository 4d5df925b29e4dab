//! Report text for the CLI. The suggestion line formats are stable
//! output, not debug prints; tests pin them.

use serde::Serialize;

use crate::data_models::{DailySeries, MetricAverages};
use crate::score::ComfortScore;
use crate::session::{CityAnalysis, ComparisonAnalysis};

/// Textual livability suggestion for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub summary: String,
    pub details: String,
}

/// Builds the two suggestion lines. Averages render with one decimal
/// place; absent averages render as an em dash placeholder.
pub fn build_suggestion(city: &str, averages: &MetricAverages, score: &ComfortScore) -> Suggestion {
    let summary = format!("{}: overall {}/100 — {}.", city, score.overall, score.label);
    let details = format!(
        "Temp: {} °C (score {}). Hum: {} % (score {}). AQI: {} (score {}). PM2.5: {} (score {}).",
        format_average(averages.temperature),
        score.temperature,
        format_average(averages.humidity),
        score.humidity,
        format_average(averages.aqi),
        score.aqi,
        format_average(averages.pm25),
        score.pm25,
    );
    Suggestion { summary, details }
}

fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "—".to_string(),
    }
}

/// The notice surfaced when the window filter had to widen the selection.
pub fn fallback_notice(city: &str, shown: usize) -> String {
    format!(
        "No rows in the chosen time range for {}. Showing the {} most recent observations instead.",
        city, shown
    )
}

fn daily_table(series: &DailySeries) -> Vec<String> {
    series
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            format!(
                "  {}  temp {}  hum {}  pm2.5 {}  aqi {}",
                label,
                format_average(series.temperature[i]),
                format_average(series.humidity[i]),
                format_average(series.pm25[i]),
                format_average(series.aqi[i]),
            )
        })
        .collect()
}

/// Plain-text report for a single-city analysis.
pub fn render_city_report(analysis: &CityAnalysis) -> String {
    let mut lines = Vec::new();
    lines.push(format!("--- {} ---", analysis.city));
    lines.push(format!(
        "Rows: {} matched, {} in window",
        analysis.rows_matched, analysis.rows_used
    ));
    if analysis.window_fallback {
        lines.push(fallback_notice(&analysis.city, analysis.rows_used));
    }
    match (analysis.series.labels.first(), analysis.series.labels.last()) {
        (Some(start), Some(end)) => {
            lines.push(format!(
                "Daily series: {} days, {} to {}",
                analysis.series.len(),
                start,
                end
            ));
            lines.extend(daily_table(&analysis.series));
        }
        _ => lines.push("Daily series: no rows with a usable time".to_string()),
    }
    let suggestion = build_suggestion(&analysis.city, &analysis.averages, &analysis.score);
    lines.push(suggestion.summary);
    lines.push(suggestion.details);
    lines.join("\n")
}

/// Plain-text report for a two-city comparison.
pub fn render_comparison_report(analysis: &ComparisonAnalysis) -> String {
    let first = &analysis.first;
    let second = &analysis.second;
    let mut lines = Vec::new();
    lines.push(format!("--- {} vs {} ---", first.city, second.city));
    for side in [first, second] {
        lines.push(format!(
            "{}: {} rows matched, {} in window",
            side.city, side.rows_matched, side.rows_used
        ));
        if side.window_fallback {
            lines.push(fallback_notice(&side.city, side.rows_used));
        }
    }
    lines.push(format!(
        "Shared date axis: {} days",
        analysis.series.dates.len()
    ));
    for (i, label) in analysis.series.labels.iter().enumerate() {
        lines.push(format!(
            "  {}  {} {} °C  {} {} °C",
            label,
            first.city,
            format_average(analysis.series.first.temperature[i]),
            second.city,
            format_average(analysis.series.second.temperature[i]),
        ));
    }
    for side in [first, second] {
        let suggestion = build_suggestion(&side.city, &side.averages, &side.score);
        lines.push(suggestion.summary);
        lines.push(suggestion.details);
    }
    lines.push(format!(
        "Temperature higher: {}",
        analysis
            .facts
            .higher_temperature
            .verdict(&first.city, &second.city)
    ));
    lines.push(format!(
        "Cleaner air (lower AQI): {}",
        analysis.facts.cleaner_air.verdict(&first.city, &second.city)
    ));
    lines.push(format!(
        "Lower PM2.5: {}",
        analysis.facts.lower_pm25.verdict(&first.city, &second.city)
    ));
    lines.join("\n")
}
