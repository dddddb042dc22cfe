//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the counter API
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "COUNTER_API_URL";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "counter-tui.log";

/// Number of history entries shown in the history panel by default
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Number of most recent history entries plotted in the chart
pub const CHART_WINDOW: usize = 20;

/// Length of a minigame round
pub const DEFAULT_GAME_DURATION_SECS: u32 = 30;

/// Clicks needed per game level
pub const POINTS_PER_LEVEL: u32 = 10;

/// A finished round above this score is celebrated
pub const EXCELLENT_SCORE: u32 = 20;

/// Increment results that are positive multiples of this are milestones
pub const MILESTONE_STEP: i64 = 10;

/// Default toast lifetime
pub const DEFAULT_TOAST_TTL_MS: u64 = 3_000;

/// Celebration banner after reaching a milestone
pub const MILESTONE_CELEBRATION_MS: u64 = 3_000;

/// Celebration banner after an excellent game
pub const GAME_CELEBRATION_MS: u64 = 5_000;

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Characters of an undecodable body kept in the error message
pub const MAX_BODY_PREVIEW: usize = 200;

/// How often the app expires toasts and celebrations
pub const HOUSEKEEPING_INTERVAL_MS: u64 = 250;

/// Application name
pub const APP_NAME: &str = "Counter TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
