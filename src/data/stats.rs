//! Summary statistics over the full (never zoomed) formatted series.

use super::series::FormattedPoint;

/// Min/max/average/current for one temperature channel, in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    /// Value on the most recent reading (greatest sort key), which is not
    /// necessarily the last element of the raw response array.
    pub current: f64,
}

/// Statistics for both channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub internal: ChannelStats,
    pub external: ChannelStats,
}

/// Compute statistics over a formatted series.
///
/// Returns `None` for an empty series; the UI renders a placeholder instead.
pub fn compute(points: &[FormattedPoint]) -> Option<Statistics> {
    if points.is_empty() {
        return None;
    }

    let latest = points.iter().max_by(|a, b| a.sort_key.cmp(&b.sort_key))?;

    Some(Statistics {
        internal: channel_stats(points.iter().map(|p| p.internal_temp_c), latest.internal_temp_c),
        external: channel_stats(points.iter().map(|p| p.external_temp_c), latest.external_temp_c),
    })
}

fn channel_stats(values: impl Iterator<Item = f64>, current: f64) -> ChannelStats {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }

    ChannelStats {
        min,
        max,
        avg: sum / count as f64,
        current,
    }
}

/// Celsius to Fahrenheit, for display only.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::format_series;
    use crate::fetch::RawPoint;

    fn raw(ts: &str, internal: f64, external: f64) -> RawPoint {
        RawPoint {
            timestamp: ts.to_string(),
            internal_temp_c: internal,
            external_temp_c: external,
        }
    }

    #[test]
    fn two_point_scenario() {
        let series = format_series(vec![
            raw("2024-01-01 00:00:00", 10.0, 8.0),
            raw("2024-01-01 01:00:00", 12.0, 9.0),
        ]);
        let stats = compute(&series.points).unwrap();

        assert_eq!(stats.internal.min, 10.0);
        assert_eq!(stats.internal.max, 12.0);
        assert_eq!(stats.internal.avg, 11.0);
        assert_eq!(stats.internal.current, 12.0);
        assert_eq!(stats.external.min, 8.0);
        assert_eq!(stats.external.max, 9.0);
        assert_eq!(stats.external.avg, 8.5);
        assert_eq!(stats.external.current, 9.0);
    }

    #[test]
    fn min_avg_max_are_ordered() {
        let series = format_series(vec![
            raw("2024-01-01 00:00:00", -3.5, 2.0),
            raw("2024-01-01 01:00:00", 7.25, -1.0),
            raw("2024-01-01 02:00:00", 0.0, 4.5),
        ]);
        let stats = compute(&series.points).unwrap();

        for channel in [stats.internal, stats.external] {
            assert!(channel.min <= channel.avg);
            assert!(channel.avg <= channel.max);
        }
    }

    #[test]
    fn current_follows_greatest_sort_key_not_array_order() {
        // Out-of-order response: the most recent reading arrives first.
        let series = format_series(vec![
            raw("2024-01-02 00:00:00", 20.0, 15.0),
            raw("2024-01-01 00:00:00", 10.0, 5.0),
        ]);
        let stats = compute(&series.points).unwrap();

        assert_eq!(stats.internal.current, 20.0);
        assert_eq!(stats.external.current, 15.0);
    }

    #[test]
    fn empty_series_has_no_stats() {
        assert!(compute(&[]).is_none());
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert!((celsius_to_fahrenheit(4.44) - 39.992).abs() < 1e-9);
    }
}
