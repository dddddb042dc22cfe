//! # Counter TUI
//!
//! A terminal client for a remote counter API.
//!
//! ## Features
//! - Increment, decrement, reset and custom deltas through the REST API
//! - Action history and statistics
//! - Line / bar / breakdown charts of recent values
//! - 30 second click-rate minigame
//! - In-memory checkpoints
//! - JSON and CSV export
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine + game timer)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod config;
pub mod ui;
pub mod chart;
pub mod export;
pub mod game;
pub mod stats;
pub mod messages;
pub mod app;
pub mod network;
pub mod constants;

// Re-export commonly used types
pub use models::{Checkpoint, CountAction, CountOutcome, HistoryItem};
pub use config::{CliArgs, Config};
pub use game::GameSession;
pub use stats::Statistics;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{CounterClient, NetworkActor};
