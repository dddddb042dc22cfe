//! Chart data shaping - maps history into plottable series

use crate::constants::CHART_WINDOW;
use crate::models::HistoryItem;
use crate::stats::Statistics;

/// The most recent `CHART_WINDOW` values, oldest first, as `(x, y)` points.
///
/// History arrives newest first, so the window is the head of the slice
/// reversed. The window is always the newest entries, never the tail of
/// the newest-first list. `x` runs from 1 to the number of points.
pub fn value_series(history: &[HistoryItem]) -> Vec<(f64, f64)> {
    history
        .iter()
        .take(CHART_WINDOW)
        .rev()
        .enumerate()
        .map(|(i, h)| ((i + 1) as f64, h.count_value as f64))
        .collect()
}

/// Y-axis bounds for a series, padded so a flat line is still visible
pub fn value_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, y) in points {
        min = min.min(*y);
        max = max.max(*y);
    }
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

/// Per-action totals in a fixed order
pub fn action_breakdown(stats: &Statistics) -> [(&'static str, u64); 3] {
    [
        ("increment", stats.increment_count as u64),
        ("decrement", stats.decrement_count as u64),
        ("reset", stats.reset_count as u64),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: i64) -> Vec<HistoryItem> {
        // newest first, like the API returns it
        (1..=n)
            .rev()
            .map(|i| HistoryItem {
                id: i,
                count_value: i,
                action: "increment".into(),
                timestamp: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_series_is_capped_and_oldest_first() {
        let points = value_series(&history(30));
        assert_eq!(points.len(), CHART_WINDOW);
        assert_eq!(points.first(), Some(&(1.0, 11.0)));
        assert_eq!(points.last(), Some(&(20.0, 30.0)));
    }

    #[test]
    fn test_short_history_keeps_every_point() {
        let points = value_series(&history(3));
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_flat_series_bounds_are_padded() {
        assert_eq!(value_bounds(&[(1.0, 5.0), (2.0, 5.0)]), [4.0, 6.0]);
        assert_eq!(value_bounds(&[]), [0.0, 1.0]);
        assert_eq!(value_bounds(&[(1.0, -2.0), (2.0, 7.0)]), [-2.0, 7.0]);
    }
}
