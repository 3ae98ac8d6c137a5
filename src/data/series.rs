//! Series formatting: raw API points into a sorted, display-ready sequence.
//!
//! The API reports timestamps as `"YYYY-MM-DD HH:MM:SS"` (or ISO-8601).
//! Each point gets a display label and a numeric sort key (epoch millis).
//! Points whose timestamp fails to parse are kept, not dropped: they fall
//! back to their original index as the sort key and a synthetic
//! `Invalid-<index>` label, which keeps the ordering total and stable.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime};

use crate::fetch::RawPoint;

/// A single reading, normalized for display and ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedPoint {
    /// Timestamp string exactly as received from the API.
    pub timestamp: String,
    pub internal_temp_c: f64,
    pub external_temp_c: f64,
    /// Human label, e.g. "Jan 5, 14:00", or "Invalid-<index>" on parse failure.
    pub display_label: String,
    /// Epoch milliseconds, or the original index when the timestamp is invalid.
    pub sort_key: i64,
    /// Position of the point in the raw response array.
    pub sequence_index: usize,
    /// Parsed timestamp; `None` when parsing failed.
    pub parsed: Option<NaiveDateTime>,
}

/// A full formatted series, sorted ascending by `sort_key`.
#[derive(Debug, Clone, Default)]
pub struct SeriesData {
    pub points: Vec<FormattedPoint>,
    /// Number of distinct calendar dates among points with valid timestamps.
    pub day_count: usize,
}

impl SeriesData {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Parse an API timestamp, accepting `"YYYY-MM-DD HH:MM:SS"` and ISO-8601.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    // Substitute the separator to get an ISO-compatible string.
    let iso = raw.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&iso) {
        return Some(dt.naive_local());
    }
    iso.parse::<NaiveDateTime>().ok()
}

/// Format and sort a raw point array for display.
///
/// Output length always equals input length; the sort is stable, so points
/// with equal sort keys keep their original relative order.
pub fn format_series(raw: Vec<RawPoint>) -> SeriesData {
    let mut points: Vec<FormattedPoint> = raw
        .into_iter()
        .enumerate()
        .map(|(index, point)| match parse_timestamp(&point.timestamp) {
            Some(dt) => FormattedPoint {
                display_label: dt.format("%b %-d, %H:%M").to_string(),
                sort_key: dt.and_utc().timestamp_millis(),
                sequence_index: index,
                parsed: Some(dt),
                timestamp: point.timestamp,
                internal_temp_c: point.internal_temp_c,
                external_temp_c: point.external_temp_c,
            },
            None => FormattedPoint {
                // Index guarantees label uniqueness for invalid timestamps.
                display_label: format!("Invalid-{}", index),
                sort_key: index as i64,
                sequence_index: index,
                parsed: None,
                timestamp: point.timestamp,
                internal_temp_c: point.internal_temp_c,
                external_temp_c: point.external_temp_c,
            },
        })
        .collect();

    points.sort_by_key(|p| p.sort_key);

    let days: HashSet<_> = points.iter().filter_map(|p| p.parsed).map(|dt| dt.date()).collect();

    SeriesData {
        day_count: days.len(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ts: &str, internal: f64, external: f64) -> RawPoint {
        RawPoint {
            timestamp: ts.to_string(),
            internal_temp_c: internal,
            external_temp_c: external,
        }
    }

    #[test]
    fn sorts_ascending_and_keeps_every_point() {
        let series = format_series(vec![
            raw("2024-01-02 00:00:00", 3.0, 1.0),
            raw("2024-01-01 00:00:00", 1.0, 2.0),
            raw("2024-01-01 12:00:00", 2.0, 3.0),
        ]);

        assert_eq!(series.len(), 3);
        assert!(series.points.windows(2).all(|w| w[0].sort_key <= w[1].sort_key));
        assert_eq!(series.points[0].internal_temp_c, 1.0);
        assert_eq!(series.points[2].internal_temp_c, 3.0);
    }

    #[test]
    fn formatting_is_idempotent_on_sorted_input() {
        let first = format_series(vec![
            raw("2024-01-02 06:00:00", 1.0, 1.0),
            raw("2024-01-01 06:00:00", 2.0, 2.0),
            raw("2024-01-03 06:00:00", 3.0, 3.0),
        ]);

        let resubmitted: Vec<RawPoint> = first
            .points
            .iter()
            .map(|p| raw(&p.timestamp, p.internal_temp_c, p.external_temp_c))
            .collect();
        let second = format_series(resubmitted);

        let order = |s: &SeriesData| s.points.iter().map(|p| p.timestamp.clone()).collect::<Vec<_>>();
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn invalid_timestamp_falls_back_to_index() {
        let series = format_series(vec![
            raw("2024-01-01 00:00:00", 5.0, 5.0),
            raw("not a timestamp", 6.0, 6.0),
        ]);

        assert_eq!(series.len(), 2);
        let invalid = series.points.iter().find(|p| p.parsed.is_none()).unwrap();
        assert_eq!(invalid.display_label, "Invalid-1");
        assert_eq!(invalid.sort_key, 1);
        assert_eq!(invalid.sequence_index, 1);
        // Index-based keys are tiny compared to epoch millis, so the invalid
        // point sorts first.
        assert_eq!(series.points[0].display_label, "Invalid-1");
    }

    #[test]
    fn accepts_iso_8601_timestamps() {
        let series = format_series(vec![raw("2024-01-05T14:00:00Z", 1.0, 2.0)]);
        assert!(series.points[0].parsed.is_some());
        assert_eq!(series.points[0].display_label, "Jan 5, 14:00");
    }

    #[test]
    fn labels_are_short_month_day_and_time() {
        let series = format_series(vec![raw("2024-01-05 14:00:00", 1.0, 2.0)]);
        assert_eq!(series.points[0].display_label, "Jan 5, 14:00");
    }

    #[test]
    fn day_count_counts_distinct_valid_dates() {
        let series = format_series(vec![
            raw("2024-01-01 00:00:00", 1.0, 1.0),
            raw("2024-01-01 23:00:00", 2.0, 2.0),
            raw("2024-01-02 00:00:00", 3.0, 3.0),
            raw("garbage", 4.0, 4.0),
        ]);
        assert_eq!(series.day_count, 2);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let series = format_series(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.day_count, 0);
    }
}
