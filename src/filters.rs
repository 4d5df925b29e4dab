use std::cmp::Reverse;

use chrono::Duration;

use crate::data_models::{EpochMs, FieldMap, ObservationRow};
use crate::parse::{coerce_to_string, normalize_time_ms};

/// Minimum row count the window fallback widens to.
const FALLBACK_MIN_ROWS: usize = 7;

/// Trailing-window selection, parsed leniently from the externally
/// supplied selector value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowSpec {
    #[default]
    All,
    Days(u32),
}

impl WindowSpec {
    /// `"all"` (any case), junk, and non-positive counts all mean no
    /// windowing; only a positive integer day count selects a window.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        match trimmed.parse::<u32>() {
            Ok(days) if days > 0 => Self::Days(days),
            _ => Self::All,
        }
    }
}

/// Rows surviving a window, plus whether the most-recent-rows fallback
/// widened the selection. Surfacing the notice is the caller's job.
#[derive(Debug)]
pub struct WindowOutcome<'a> {
    pub rows: Vec<&'a ObservationRow>,
    pub fallback_used: bool,
}

/// Case-insensitive substring match on the detected city field.
///
/// With no detected city key every query matches nothing; that is an
/// empty result, not an error. Missing city values coerce to the empty
/// string, so only an empty query matches them.
pub fn filter_by_city<'a>(
    rows: &'a [ObservationRow],
    fields: &FieldMap,
    query: &str,
) -> Vec<&'a ObservationRow> {
    let city_key = match fields.city_key.as_deref() {
        Some(key) => key,
        None => return Vec::new(),
    };
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            let value = row.get(city_key).map(coerce_to_string).unwrap_or_default();
            value.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Keeps rows inside the trailing `days`-day window anchored at the
/// maximum observed time of `rows` (not wall-clock now).
///
/// Rows without a parseable time are excluded while a window is active;
/// if no row has a parseable time there is nothing to anchor on and the
/// selection is returned unchanged. Should the cutoff exclude every row,
/// the selection widens to the `max(7, days)` most recent rows and the
/// outcome reports `fallback_used`.
pub fn apply_window<'a>(
    rows: &[&'a ObservationRow],
    fields: &FieldMap,
    window: WindowSpec,
) -> WindowOutcome<'a> {
    let days = match window {
        WindowSpec::All => {
            return WindowOutcome {
                rows: rows.to_vec(),
                fallback_used: false,
            }
        }
        WindowSpec::Days(days) => days,
    };

    let time_key = fields.time_key.as_deref();
    let timed: Vec<(EpochMs, &ObservationRow)> = rows
        .iter()
        .filter_map(|row| {
            time_key
                .and_then(|key| row.get(key))
                .and_then(normalize_time_ms)
                .map(|ms| (ms, *row))
        })
        .collect();

    let max_ms = match timed.iter().map(|(ms, _)| *ms).max() {
        Some(ms) => ms,
        None => {
            return WindowOutcome {
                rows: rows.to_vec(),
                fallback_used: false,
            }
        }
    };

    let cutoff = max_ms - Duration::days(i64::from(days)).num_milliseconds();
    let kept: Vec<&ObservationRow> = timed
        .iter()
        .filter(|(ms, _)| *ms >= cutoff)
        .map(|(_, row)| *row)
        .collect();
    if kept.is_empty() {
        let want = timed.len().min(FALLBACK_MIN_ROWS.max(days as usize));
        return WindowOutcome {
            rows: most_recent(timed, want),
            fallback_used: true,
        };
    }
    WindowOutcome {
        rows: kept,
        fallback_used: false,
    }
}

/// Top `want` rows by time, newest first. Ties keep their input order.
pub(crate) fn most_recent(
    mut timed: Vec<(EpochMs, &ObservationRow)>,
    want: usize,
) -> Vec<&ObservationRow> {
    timed.sort_by_key(|(ms, _)| Reverse(*ms));
    timed.into_iter().take(want).map(|(_, row)| row).collect()
}
