use serde::{Deserialize, Serialize};
use std::time::Instant;

/// `GET /count`, and the body of every mutating call except increment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// `POST /count/increment` also carries a confirmation message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountIncrementResponse {
    pub count: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /count/custom`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomDeltaRequest {
    pub value: i64,
}

/// One entry of the remote action log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i64,
    pub count_value: i64,
    pub action: String,
    pub timestamp: String,
}

impl HistoryItem {
    /// Timestamp formatted for display, or the raw value if it does not parse
    pub fn display_time(&self) -> String {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.timestamp) {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        self.timestamp.clone()
    }

    pub fn is_increment(&self) -> bool {
        self.action.contains("increment")
    }

    pub fn is_decrement(&self) -> bool {
        self.action.contains("decrement")
    }

    pub fn is_reset(&self) -> bool {
        self.action == "reset"
    }
}

/// `GET /count/history`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

/// A count-changing call against the API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountAction {
    Increment,
    Decrement,
    Custom(i64),
    Reset,
}

impl CountAction {
    pub fn path(&self) -> &'static str {
        match self {
            CountAction::Increment => "/count/increment",
            CountAction::Decrement => "/count/decrement",
            CountAction::Custom(_) => "/count/custom",
            CountAction::Reset => "/count/reset",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountAction::Increment => "increment",
            CountAction::Decrement => "decrement",
            CountAction::Custom(_) => "custom",
            CountAction::Reset => "reset",
        }
    }

    /// JSON body to send, if the call takes one
    pub fn body(&self) -> Option<CustomDeltaRequest> {
        match self {
            CountAction::Custom(value) => Some(CustomDeltaRequest { value: *value }),
            _ => None,
        }
    }
}

/// Result of a successful mutating call
#[derive(Clone, Debug, PartialEq)]
pub struct CountOutcome {
    pub count: i64,
    pub message: Option<String>,
}

/// Client-side named snapshot of the count, never sent to the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: i64,
    pub count: i64,
    pub timestamp: String,
    pub name: String,
}

/// Chart rendering mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    /// Per-action totals instead of the value series
    Breakdown,
}

impl ChartType {
    pub const ALL: [ChartType; 3] = [ChartType::Line, ChartType::Bar, ChartType::Breakdown];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Bar => "Bar",
            ChartType::Breakdown => "Breakdown",
        }
    }

    pub fn next(&self) -> ChartType {
        match self {
            ChartType::Line => ChartType::Bar,
            ChartType::Bar => ChartType::Breakdown,
            ChartType::Breakdown => ChartType::Line,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ChartType::Line => 0,
            ChartType::Bar => 1,
            ChartType::Breakdown => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Transient notification
#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
