//! JSON and CSV export of the local state
//!
//! Files are written into the configured export directory and named after
//! the export date, e.g. `counter-data-2025-03-01.json`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Checkpoint, HistoryItem};
use crate::stats::Statistics;

/// Full state dump written by the JSON export
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub count: i64,
    pub history: &'a [HistoryItem],
    pub checkpoints: &'a [Checkpoint],
    pub statistics: Statistics,
    pub timestamp: String,
}

pub fn to_json(doc: &ExportDocument<'_>) -> Result<String> {
    serde_json::to_string_pretty(doc).context("Failed to serialize export")
}

/// One header row plus one row per history item, in the order given
pub fn to_csv(history: &[HistoryItem]) -> String {
    let mut lines = Vec::with_capacity(history.len() + 1);
    lines.push(String::from("action,value,timestamp"));
    for item in history {
        lines.push(format!(
            "{},{},{}",
            csv_field(&item.action),
            item.count_value,
            csv_field(&item.timestamp)
        ));
    }
    lines.join("\n")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn json_file_name(date: NaiveDate) -> String {
    format!("counter-data-{}.json", date.format("%Y-%m-%d"))
}

pub fn csv_file_name(date: NaiveDate) -> String {
    format!("counter-history-{}.csv", date.format("%Y-%m-%d"))
}

pub fn write_json(dir: &Path, doc: &ExportDocument<'_>, date: NaiveDate) -> Result<PathBuf> {
    let content = to_json(doc)?;
    write_file(dir, &json_file_name(date), &content)
}

pub fn write_csv(dir: &Path, history: &[HistoryItem], date: NaiveDate) -> Result<PathBuf> {
    write_file(dir, &csv_file_name(date), &to_csv(history))
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }
    let path = dir.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_history() -> Vec<HistoryItem> {
        vec![
            HistoryItem {
                id: 2,
                count_value: 0,
                action: "reset".into(),
                timestamp: "2025-03-01T10:00:05".into(),
            },
            HistoryItem {
                id: 1,
                count_value: 1,
                action: "increment".into(),
                timestamp: "2025-03-01T10:00:00".into(),
            },
        ]
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_item() {
        let csv = to_csv(&sample_history());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "action,value,timestamp");
        assert_eq!(lines[1], "reset,0,2025-03-01T10:00:05");
        assert_eq!(lines[2], "increment,1,2025-03-01T10:00:00");
    }

    #[test]
    fn test_csv_of_empty_history_is_header_only() {
        assert_eq!(to_csv(&[]), "action,value,timestamp");
    }

    #[test]
    fn test_csv_quotes_awkward_fields() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_json_export_contains_full_state() {
        let history = sample_history();
        let checkpoints = vec![Checkpoint {
            id: 10,
            count: 7,
            timestamp: "2025-03-01T09:00:00Z".into(),
            name: "before lunch".into(),
        }];
        let doc = ExportDocument {
            count: 7,
            history: &history,
            checkpoints: &checkpoints,
            statistics: Statistics::from_history(&history),
            timestamp: "2025-03-01T11:00:00Z".into(),
        };

        let value: serde_json::Value = serde_json::from_str(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(value["count"], 7);
        assert_eq!(value["history"].as_array().unwrap().len(), 2);
        assert_eq!(value["checkpoints"][0]["name"], "before lunch");
        assert_eq!(value["statistics"]["reset_count"], 1);
    }

    #[test]
    fn test_write_csv_creates_dated_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("exports");
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let path = write_csv(&target, &sample_history(), date).unwrap();

        assert_eq!(path.file_name().unwrap(), "counter-history-2025-03-01.csv");
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("action,value,timestamp"));
    }
}
