use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data_models::{DailySeries, FieldMap, MetricAverages, ObservationRow};
use crate::parse::{extract_numeric, normalize_time_ms, utc_date_of_ms};

/// Values of one UTC calendar day, per metric, before averaging.
#[derive(Default)]
struct DayBucket {
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    pm25: Vec<f64>,
    aqi: Vec<f64>,
}

/// Buckets rows by UTC calendar date and averages each metric per day.
///
/// Rows whose time cannot be normalized are skipped. A metric with no
/// valid contribution on a day yields `None` for that day, never zero.
/// Pure over (rows, fields): repeated runs produce identical output.
pub fn build_daily_series(rows: &[&ObservationRow], fields: &FieldMap) -> DailySeries {
    let time_key = match fields.time_key.as_deref() {
        Some(key) => key,
        None => return DailySeries::default(),
    };

    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for row in rows {
        let date = match row
            .get(time_key)
            .and_then(normalize_time_ms)
            .and_then(utc_date_of_ms)
        {
            Some(date) => date,
            None => continue,
        };
        let bucket = buckets.entry(date).or_default();
        add_contribution(&mut bucket.temperature, row, fields.temp_key.as_deref());
        add_contribution(&mut bucket.humidity, row, fields.hum_key.as_deref());
        add_contribution(&mut bucket.pm25, row, fields.pm_key.as_deref());
        add_contribution(&mut bucket.aqi, row, fields.aqi_key.as_deref());
    }

    let mut series = DailySeries::default();
    for (date, bucket) in buckets {
        series.dates.push(date);
        series.labels.push(day_label(date));
        series.temperature.push(mean_of(&bucket.temperature));
        series.humidity.push(mean_of(&bucket.humidity));
        series.pm25.push(mean_of(&bucket.pm25));
        series.aqi.push(mean_of(&bucket.aqi));
    }
    series
}

/// Human-readable day label, e.g. "01 Jan 2023".
pub(crate) fn day_label(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

fn add_contribution(bucket: &mut Vec<f64>, row: &ObservationRow, key: Option<&str>) {
    if let Some(value) = key.and_then(|k| row.get(k)) {
        if let Some(number) = extract_numeric(value) {
            bucket.push(number);
        }
    }
}

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    mean_of(&present)
}

impl MetricAverages {
    /// Whole-series mean per metric, ignoring absent days.
    pub fn from_series(series: &DailySeries) -> Self {
        Self {
            temperature: mean_present(&series.temperature),
            humidity: mean_present(&series.humidity),
            pm25: mean_present(&series.pm25),
            aqi: mean_present(&series.aqi),
        }
    }
}
