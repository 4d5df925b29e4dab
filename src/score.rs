//! Rule-based comfort scoring over the per-metric averages. Curves are
//! fixed bands and steps, not tunables.

use std::fmt;

use serde::Serialize;

use crate::data_models::MetricAverages;

/// Sub-score assigned when a metric has no data at all. Neutral rather
/// than penalizing: a missing metric pulls the overall toward the middle.
const NEUTRAL_SCORE: f64 = 50.0;

/// Temperature comfort, °C. 100 inside the 18..=28 band, a ramp from 60
/// with a floor of 30 below it, a 4-points-per-degree falloff above it.
pub fn score_temperature(avg: Option<f64>) -> f64 {
    let x = match avg {
        Some(x) => x,
        None => return NEUTRAL_SCORE,
    };
    if (18.0..=28.0).contains(&x) {
        100.0
    } else if x < 18.0 {
        (60.0 + (x / 18.0) * 40.0).max(30.0)
    } else {
        (100.0 - (x - 28.0) * 4.0).max(0.0)
    }
}

/// Relative humidity comfort, %. Band 40..=70, same ramp/floor shape as
/// temperature below, 2-points-per-percent falloff above.
pub fn score_humidity(avg: Option<f64>) -> f64 {
    let x = match avg {
        Some(x) => x,
        None => return NEUTRAL_SCORE,
    };
    if (40.0..=70.0).contains(&x) {
        100.0
    } else if x < 40.0 {
        (60.0 + (x / 40.0) * 40.0).max(30.0)
    } else {
        (100.0 - (x - 70.0) * 2.0).max(0.0)
    }
}

/// AQI comfort steps at the standard index breakpoints.
pub fn score_aqi(avg: Option<f64>) -> f64 {
    match avg {
        None => NEUTRAL_SCORE,
        Some(x) if x <= 50.0 => 100.0,
        Some(x) if x <= 100.0 => 80.0,
        Some(x) if x <= 200.0 => 60.0,
        Some(x) if x <= 300.0 => 40.0,
        Some(_) => 20.0,
    }
}

/// PM2.5 comfort steps, µg/m³.
pub fn score_pm25(avg: Option<f64>) -> f64 {
    match avg {
        None => NEUTRAL_SCORE,
        Some(x) if x <= 12.0 => 100.0,
        Some(x) if x <= 35.0 => 80.0,
        Some(x) if x <= 55.0 => 60.0,
        Some(x) if x <= 150.0 => 40.0,
        Some(_) => 20.0,
    }
}

/// Tier assigned from the rounded overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComfortLabel {
    Good,
    Moderate,
    Poor,
}

impl ComfortLabel {
    pub fn from_overall(overall: u8) -> Self {
        if overall >= 80 {
            Self::Good
        } else if overall >= 60 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for ComfortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four sub-scores, the overall, and its tier. Sub-scores are rounded
/// individually first; the overall is the rounded mean of the rounded
/// sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComfortScore {
    pub temperature: u8,
    pub humidity: u8,
    pub aqi: u8,
    pub pm25: u8,
    pub overall: u8,
    pub label: ComfortLabel,
}

impl ComfortScore {
    pub fn from_averages(averages: &MetricAverages) -> Self {
        let temperature = score_temperature(averages.temperature).round() as u8;
        let humidity = score_humidity(averages.humidity).round() as u8;
        let aqi = score_aqi(averages.aqi).round() as u8;
        let pm25 = score_pm25(averages.pm25).round() as u8;
        let sum = u16::from(temperature) + u16::from(humidity) + u16::from(aqi) + u16::from(pm25);
        let overall = (f64::from(sum) / 4.0).round() as u8;
        Self {
            temperature,
            humidity,
            aqi,
            pm25,
            overall,
            label: ComfortLabel::from_overall(overall),
        }
    }
}
