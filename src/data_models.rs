use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Milliseconds since the Unix epoch, UTC. The canonical normalized time.
pub type EpochMs = i64;

/// A single observation record exactly as it appeared in the dataset
/// document. Key order is the document's own order, which field detection
/// relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationRow {
    fields: Map<String, Value>,
}

impl ObservationRow {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn first_key(&self) -> Option<&str> {
        self.fields.keys().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for ObservationRow {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Rows are whatever the document contains; non-object elements become
/// empty rows and simply contribute nothing downstream.
impl From<Value> for ObservationRow {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/// Mapping from the logical fields the pipeline understands to the actual
/// key names of the loaded dataset. Detected once per load and shared by
/// every downstream stage; never re-detected per row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMap {
    /// Never `None` while the sampled row has any field at all (falls back
    /// to the row's first key).
    pub time_key: Option<String>,
    pub city_key: Option<String>,
    pub temp_key: Option<String>,
    pub hum_key: Option<String>,
    pub pm_key: Option<String>,
    pub aqi_key: Option<String>,
}

/// Per-city daily time series. Parallel vectors indexed by day: `dates`
/// ascending, `labels` human-readable ("01 Jan 2023"), metric entries
/// `None` where a day had no valid contributions (absent, never zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub labels: Vec<String>,
    pub temperature: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
    pub pm25: Vec<Option<f64>>,
    pub aqi: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Whole-series arithmetic means, one per metric. `None` when the series
/// holds no values for that metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricAverages {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pm25: Option<f64>,
    pub aqi: Option<f64>,
}
