//! Schema detection over arbitrary observation exports. Datasets arrive
//! with no declared schema; the pipeline infers one from field names and
//! shares it dataset-wide.

use crate::data_models::{FieldMap, ObservationRow};

const TIME_CANDIDATES: &[&str] = &["time", "timestamp", "date", "obs", "datetime"];
const CITY_CANDIDATES: &[&str] = &["city", "location", "place", "site", "station"];
const TEMP_CANDIDATES: &[&str] = &["temp", "temperature", "temperature_2m", "temperaturec"];
const HUM_CANDIDATES: &[&str] = &["hum", "humidity", "relative_humidity", "relative_humidity_2m"];
const PM_CANDIDATES: &[&str] = &["pm2.5", "pm25", "pm_2_5", "pm2"];
const AQI_CANDIDATES: &[&str] = &["aqi", "airquality", "aqi_index"];

/// First key, in the row's own key order, whose lowercased name contains
/// any candidate substring.
fn find_key(row: &ObservationRow, candidates: &[&str]) -> Option<String> {
    row.keys()
        .find(|key| {
            let lower = key.to_lowercase();
            candidates.iter().any(|candidate| lower.contains(candidate))
        })
        .cloned()
}

/// Detects the dataset's field mapping from one sampled row.
///
/// The time key falls back to the row's first key, so it is only
/// undetected when the sample has no fields at all. Metric keys without a
/// match stay `None` and their series stay empty; that is data absence,
/// not an error.
pub fn detect_fields(sample: &ObservationRow) -> FieldMap {
    FieldMap {
        time_key: find_key(sample, TIME_CANDIDATES)
            .or_else(|| sample.first_key().map(str::to_string)),
        city_key: find_key(sample, CITY_CANDIDATES),
        temp_key: find_key(sample, TEMP_CANDIDATES),
        hum_key: find_key(sample, HUM_CANDIDATES),
        pm_key: find_key(sample, PM_CANDIDATES),
        aqi_key: find_key(sample, AQI_CANDIDATES),
    }
}
