use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::aggregate::build_daily_series;
use crate::compare::{align_series, ComparativeFacts, ComparisonSeries};
use crate::data_models::{DailySeries, FieldMap, MetricAverages, ObservationRow};
use crate::errors::{AnalysisError, LoadError};
use crate::filters::{apply_window, filter_by_city, WindowSpec};
use crate::schema::detect_fields;
use crate::score::ComfortScore;

/// A loaded dataset: the raw rows plus the field mapping detected from
/// them. Immutable once constructed; reloading builds a new value.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<ObservationRow>,
    fields: FieldMap,
}

impl Dataset {
    /// Builds a dataset from a parsed JSON document. Accepts a top-level
    /// array of records or an object carrying a `records` array; anything
    /// else is an empty dataset. Non-object records become empty rows.
    pub fn from_value(document: Value) -> Result<Self, LoadError> {
        let raw = match document {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("records") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        if raw.is_empty() {
            return Err(LoadError::EmptyDataset);
        }
        let rows: Vec<ObservationRow> = raw.into_iter().map(ObservationRow::from).collect();

        // Field detection samples the first row that has any fields.
        let sample = rows.iter().find(|row| !row.is_empty()).or_else(|| rows.first());
        let fields = sample.map(detect_fields).unwrap_or_default();
        debug!("Detected fields: {:?}", fields);
        Ok(Self { rows, fields })
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(document)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_reader(BufReader::new(file))?;
        let dataset = Self::from_value(document)?;
        info!("Loaded {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the single-city pipeline produces for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityAnalysis {
    pub city: String,
    pub rows_matched: usize,
    pub rows_used: usize,
    pub window_fallback: bool,
    pub series: DailySeries,
    pub averages: MetricAverages,
    pub score: ComfortScore,
}

/// Two single-city analyses joined on a union date axis, with headline
/// comparative facts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonAnalysis {
    pub first: CityAnalysis,
    pub second: CityAnalysis,
    pub series: ComparisonSeries,
    pub facts: ComparativeFacts,
}

/// Explicit session state: one loaded dataset at a time, replaced
/// wholesale on reload. Analyses borrow it read-only, so repeated queries
/// against the same session see identical data.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    dataset: Dataset,
}

impl AnalysisSession {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Replaces the loaded dataset wholesale.
    pub fn reload(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Full single-city pipeline: city filter, trailing window, daily
    /// aggregation, whole-series averages, comfort score. A city with no
    /// matching rows is an informational outcome, not a crash.
    pub fn analyze_city(
        &self,
        city: &str,
        window: WindowSpec,
    ) -> Result<CityAnalysis, AnalysisError> {
        let matched = filter_by_city(self.dataset.rows(), self.dataset.fields(), city);
        if matched.is_empty() {
            return Err(AnalysisError::CityNotFound {
                city: city.to_string(),
            });
        }
        Ok(self.analyze_rows(city, matched, window))
    }

    /// Two-city comparison. Each city runs the single-city pipeline over
    /// its own window, then the daily series join on the union date axis.
    pub fn compare(
        &self,
        first: &str,
        second: &str,
        window: WindowSpec,
    ) -> Result<ComparisonAnalysis, AnalysisError> {
        let first_matched = filter_by_city(self.dataset.rows(), self.dataset.fields(), first);
        let second_matched = filter_by_city(self.dataset.rows(), self.dataset.fields(), second);

        let mut missing = Vec::new();
        if first_matched.is_empty() {
            missing.push(first.to_string());
        }
        if second_matched.is_empty() {
            missing.push(second.to_string());
        }
        if !missing.is_empty() {
            return Err(AnalysisError::MissingCities { cities: missing });
        }

        let first_analysis = self.analyze_rows(first, first_matched, window);
        let second_analysis = self.analyze_rows(second, second_matched, window);
        let series = align_series(&first_analysis.series, &second_analysis.series);
        let facts =
            ComparativeFacts::from_averages(&first_analysis.averages, &second_analysis.averages);
        Ok(ComparisonAnalysis {
            first: first_analysis,
            second: second_analysis,
            series,
            facts,
        })
    }

    fn analyze_rows(
        &self,
        city: &str,
        matched: Vec<&ObservationRow>,
        window: WindowSpec,
    ) -> CityAnalysis {
        debug!("{} rows match city '{}'", matched.len(), city);
        let windowed = apply_window(&matched, self.dataset.fields(), window);
        if windowed.fallback_used {
            warn!(
                "No rows for '{}' in the chosen window; widened to the {} most recent",
                city,
                windowed.rows.len()
            );
        }
        let series = build_daily_series(&windowed.rows, self.dataset.fields());
        let averages = MetricAverages::from_series(&series);
        let score = ComfortScore::from_averages(&averages);
        CityAnalysis {
            city: city.to_string(),
            rows_matched: matched.len(),
            rows_used: windowed.rows.len(),
            window_fallback: windowed.fallback_used,
            series,
            averages,
            score,
        }
    }
}
