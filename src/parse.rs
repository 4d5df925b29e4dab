//! Best-effort value parsing shared by the aggregation stages. Every
//! function here is total: failures yield `None`, never defaults.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::data_models::EpochMs;

/// Numeric epoch values below this are taken as seconds, at or above as
/// milliseconds. 1e12 ms is 2001-09-09, well past any plausible
/// seconds-resolution observation.
const EPOCH_MS_THRESHOLD: i64 = 1_000_000_000_000;

/// Naive date-time layouts accepted once the zone-aware parses fail.
/// Naive values are interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalizes one raw timestamp value to epoch milliseconds.
///
/// Accepts epoch numbers (seconds or milliseconds, disambiguated by
/// magnitude), all-digit strings, and calendar date/time strings. Anything
/// unparseable is absent, not defaulted.
pub fn normalize_time_ms(value: &Value) -> Option<EpochMs> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(scale_epoch_int(i))
            } else {
                let f = n.as_f64()?;
                f.is_finite().then(|| scale_epoch_float(f))
            }
        }
        Value::String(s) => normalize_time_str(s.trim()),
        _ => None,
    }
}

fn normalize_time_str(s: &str) -> Option<EpochMs> {
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().map(scale_epoch_int);
    }
    parse_datetime_ms(s).or_else(|| {
        // "YYYY-MM-DD HH:MM:SS" exports: retry with the first space as 'T'.
        s.contains(' ')
            .then(|| parse_datetime_ms(&s.replacen(' ', "T", 1)))
            .flatten()
    })
}

fn scale_epoch_int(value: i64) -> EpochMs {
    if value < EPOCH_MS_THRESHOLD {
        value.saturating_mul(1000)
    } else {
        value
    }
}

fn scale_epoch_float(value: f64) -> EpochMs {
    if value < EPOCH_MS_THRESHOLD as f64 {
        (value * 1000.0) as EpochMs
    } else {
        value as EpochMs
    }
}

fn parse_datetime_ms(s: &str) -> Option<EpochMs> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive).timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, NAIVE_DATE_FORMAT) {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight).timestamp_millis());
    }
    None
}

/// UTC calendar date of an epoch-ms instant. `None` for instants chrono
/// cannot represent; such rows are skipped by the aggregator.
pub fn utc_date_of_ms(ms: EpochMs) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(ms).single().map(|dt| dt.date_naive())
}

/// Best-effort numeric extraction: coerce to text, strip everything that
/// is not a digit, dot, or minus, then parse. Unit suffixes like
/// `"21.5 °C"` survive; values with no parseable number are dropped, never
/// zeroed.
pub fn extract_numeric(value: &Value) -> Option<f64> {
    if let Some(f) = value.as_f64() {
        return Some(f);
    }
    if value.is_null() {
        return None;
    }
    let cleaned: String = coerce_to_string(value)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Display coercion for raw JSON values, used for city matching. Missing
/// and null values coerce to the empty string.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
