//! App state - pure data structure with no I/O logic

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::chart;
use crate::config::Config;
use crate::game::GameSession;
use crate::messages::ui_events::{InputField, InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{ChartType, Checkpoint, HistoryItem, Toast, ToastKind};
use crate::stats::Statistics;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub api_url: String,
    pub export_dir: PathBuf,
    pub history_limit: usize,
    pub toast_ttl: Duration,

    // Local mirror of the remote count
    pub count: i64,
    pub next_request_id: u64,
    /// Mutating calls still waiting for an answer
    pub in_flight: HashSet<u64>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub custom_input: String,
    pub checkpoint_input: String,

    // History
    pub history: Vec<HistoryItem>,
    pub history_scroll: u16,
    pub show_history: bool,

    // Chart
    pub show_chart: bool,
    pub chart_type: ChartType,

    // Minigame
    pub game_mode: bool,
    pub game: GameSession,

    // Checkpoints (memory only)
    pub checkpoints: Vec<Checkpoint>,
    pub selected_checkpoint: usize,
    pub last_checkpoint_id: i64,

    // Notifications
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
    pub celebration_until: Option<Instant>,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            api_url: config.api_url.clone(),
            export_dir: config.export_dir.clone(),
            history_limit: config.history_limit,
            toast_ttl: Duration::from_millis(config.toast_ttl_ms),
            count: 0,
            next_request_id: 1,
            in_flight: HashSet::new(),
            active_panel: Panel::Counter,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            custom_input: String::from("1"),
            checkpoint_input: String::new(),
            history: Vec::new(),
            history_scroll: 0,
            show_history: true,
            show_chart: false,
            chart_type: ChartType::Line,
            game_mode: false,
            game: GameSession::new(config.game_duration_secs),
            checkpoints: Vec::new(),
            selected_checkpoint: 0,
            last_checkpoint_id: 0,
            toasts: Vec::new(),
            next_toast_id: 1,
            celebration_until: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Parsed custom delta; anything that is not an integer counts as 0
    pub fn custom_value(&self) -> i64 {
        self.custom_input.trim().parse().unwrap_or(0)
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.input_mode {
            InputMode::Editing(InputField::CustomValue) => &self.custom_input,
            InputMode::Editing(InputField::CheckpointName) => &self.checkpoint_input,
            InputMode::Normal => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.input_mode {
            InputMode::Editing(InputField::CustomValue) => Some(&mut self.custom_input),
            InputMode::Editing(InputField::CheckpointName) => Some(&mut self.checkpoint_input),
            InputMode::Normal => None,
        }
    }

    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            expires_at: Instant::now() + self.toast_ttl,
        });
    }

    pub fn celebrate(&mut self, duration: Duration) {
        let until = Instant::now() + duration;
        self.celebration_until = Some(match self.celebration_until {
            Some(current) if current > until => current,
            _ => until,
        });
    }

    pub fn is_celebrating(&self, now: Instant) -> bool {
        self.celebration_until.is_some_and(|until| now < until)
    }

    /// Drop expired toasts and celebrations. Returns true if anything changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        let mut changed = self.toasts.len() != before;

        if self.celebration_until.is_some() && !self.is_celebrating(now) {
            self.celebration_until = None;
            changed = true;
        }
        changed
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            api_url: self.api_url.clone(),
            count: self.count,
            is_loading: self.is_loading(),
            custom_input: self.custom_input.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            history: self.history.iter().take(self.history_limit).cloned().collect(),
            history_total: self.history.len(),
            history_scroll: self.history_scroll,
            show_history: self.show_history,
            statistics: Statistics::from_history(&self.history),
            show_chart: self.show_chart,
            chart_type: self.chart_type,
            chart_points: chart::value_series(&self.history),
            game_mode: self.game_mode,
            game: self.game.clone(),
            checkpoints: self.checkpoints.clone(),
            selected_checkpoint: self.selected_checkpoint,
            checkpoint_input: self.checkpoint_input.clone(),
            toasts: self.toasts.clone(),
            celebrating: self.is_celebrating(Instant::now()),
            show_help: self.show_help,
        }
    }
}
