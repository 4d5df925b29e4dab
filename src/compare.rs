use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::day_label;
use crate::data_models::{DailySeries, MetricAverages};

/// One city's metrics re-aligned to the union date axis, `None` where the
/// city has no bucket for a date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedMetrics {
    pub temperature: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
    pub pm25: Vec<Option<f64>>,
    pub aqi: Vec<Option<f64>>,
}

/// Two daily series joined on one ascending union date axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub dates: Vec<NaiveDate>,
    pub labels: Vec<String>,
    pub first: AlignedMetrics,
    pub second: AlignedMetrics,
}

/// Joins two daily series on the union of their date axes. Dates covered
/// by only one side leave gaps on the other, so both cities keep their
/// full extent.
pub fn align_series(first: &DailySeries, second: &DailySeries) -> ComparisonSeries {
    let axis: BTreeSet<NaiveDate> = first
        .dates
        .iter()
        .chain(second.dates.iter())
        .copied()
        .collect();
    let first_index: HashMap<NaiveDate, usize> =
        first.dates.iter().copied().zip(0..).collect();
    let second_index: HashMap<NaiveDate, usize> =
        second.dates.iter().copied().zip(0..).collect();

    let mut joined = ComparisonSeries::default();
    for date in axis {
        joined.dates.push(date);
        joined.labels.push(day_label(date));
        push_aligned(&mut joined.first, first, first_index.get(&date).copied());
        push_aligned(&mut joined.second, second, second_index.get(&date).copied());
    }
    joined
}

fn push_aligned(target: &mut AlignedMetrics, source: &DailySeries, index: Option<usize>) {
    target
        .temperature
        .push(value_at(&source.temperature, index));
    target.humidity.push(value_at(&source.humidity, index));
    target.pm25.push(value_at(&source.pm25, index));
    target.aqi.push(value_at(&source.aqi, index));
}

fn value_at(values: &[Option<f64>], index: Option<usize>) -> Option<f64> {
    index.and_then(|i| values.get(i)).copied().flatten()
}

/// Which side a comparative fact favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricComparison {
    First,
    Second,
    Similar,
    NotApplicable,
}

impl MetricComparison {
    /// Resolves the verdict to display text: the favored city's name,
    /// `"Both similar"` on ties, `"N/A"` when a side had no data.
    pub fn verdict<'a>(&self, first: &'a str, second: &'a str) -> &'a str {
        match self {
            Self::First => first,
            Self::Second => second,
            Self::Similar => "Both similar",
            Self::NotApplicable => "N/A",
        }
    }
}

/// Headline facts for the comparison view. Strict comparisons on the
/// whole-series averages: ties are `Similar`, and a side without data
/// makes the fact `NotApplicable` rather than treating absence as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparativeFacts {
    pub higher_temperature: MetricComparison,
    pub cleaner_air: MetricComparison,
    pub lower_pm25: MetricComparison,
}

impl ComparativeFacts {
    pub fn from_averages(first: &MetricAverages, second: &MetricAverages) -> Self {
        Self {
            higher_temperature: favors_higher(first.temperature, second.temperature),
            cleaner_air: favors_lower(first.aqi, second.aqi),
            lower_pm25: favors_lower(first.pm25, second.pm25),
        }
    }
}

fn favors_higher(first: Option<f64>, second: Option<f64>) -> MetricComparison {
    match (first, second) {
        (Some(a), Some(b)) if a > b => MetricComparison::First,
        (Some(a), Some(b)) if b > a => MetricComparison::Second,
        (Some(_), Some(_)) => MetricComparison::Similar,
        _ => MetricComparison::NotApplicable,
    }
}

fn favors_lower(first: Option<f64>, second: Option<f64>) -> MetricComparison {
    match (first, second) {
        (Some(a), Some(b)) if a < b => MetricComparison::First,
        (Some(a), Some(b)) if b < a => MetricComparison::Second,
        (Some(_), Some(_)) => MetricComparison::Similar,
        _ => MetricComparison::NotApplicable,
    }
}
