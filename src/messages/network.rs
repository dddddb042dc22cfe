//! Network messages - communication between App and Network layers

use crate::models::{CountAction, HistoryItem};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// `GET /count`
    FetchCount { id: u64 },
    /// One of the mutating `POST /count/...` calls
    Apply { id: u64, action: CountAction },
    /// `GET /count/history`
    FetchHistory { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Which call a response or failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    FetchCount,
    Apply(CountAction),
    FetchHistory,
}

impl RequestKind {
    pub fn describe(&self) -> String {
        match self {
            RequestKind::FetchCount => String::from("Loading the count"),
            RequestKind::Apply(action) => format!("The {} request", action.label()),
            RequestKind::FetchHistory => String::from("Loading the history"),
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Current count from `GET /count`
    Count { id: u64, count: i64 },
    /// A mutating call succeeded
    Applied {
        id: u64,
        action: CountAction,
        count: i64,
        message: Option<String>,
    },
    /// Full history, newest first
    History { id: u64, items: Vec<HistoryItem> },
    /// Transport, status or decoding failure
    Error {
        id: u64,
        kind: RequestKind,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Count { id, .. } => *id,
            NetworkResponse::Applied { id, .. } => *id,
            NetworkResponse::History { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    /// Whether this response settles a mutating call
    pub fn is_apply(&self) -> bool {
        matches!(
            self,
            NetworkResponse::Applied { .. }
                | NetworkResponse::Error { kind: RequestKind::Apply(_), .. }
        )
    }
}
