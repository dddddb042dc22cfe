//! Aggregates over the action history

use serde::{Deserialize, Serialize};

use crate::models::HistoryItem;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_actions: usize,
    /// Mean of `count_value`, rounded to two decimals
    pub average_value: f64,
    pub increment_count: usize,
    pub decrement_count: usize,
    pub reset_count: usize,
}

impl Statistics {
    pub fn from_history(history: &[HistoryItem]) -> Self {
        if history.is_empty() {
            return Statistics::default();
        }

        let sum: i64 = history.iter().map(|h| h.count_value).sum();
        let mean = sum as f64 / history.len() as f64;

        Statistics {
            total_actions: history.len(),
            average_value: (mean * 100.0).round() / 100.0,
            increment_count: history.iter().filter(|h| h.is_increment()).count(),
            decrement_count: history.iter().filter(|h| h.is_decrement()).count(),
            reset_count: history.iter().filter(|h| h.is_reset()).count(),
        }
    }
}
