//! Render state - data structure sent from App layer to UI for rendering

use crate::game::GameSession;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{ChartType, Checkpoint, HistoryItem, Toast};
use crate::stats::Statistics;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub api_url: String,

    // Counter
    pub count: i64,
    pub is_loading: bool,
    pub custom_input: String,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // History, newest first, already cut to the display limit
    pub history: Vec<HistoryItem>,
    pub history_total: usize,
    pub history_scroll: u16,
    pub show_history: bool,
    pub statistics: Statistics,

    // Chart
    pub show_chart: bool,
    pub chart_type: ChartType,
    pub chart_points: Vec<(f64, f64)>,

    // Minigame
    pub game_mode: bool,
    pub game: GameSession,

    // Checkpoints
    pub checkpoints: Vec<Checkpoint>,
    pub selected_checkpoint: usize,
    pub checkpoint_input: String,

    // Notifications
    pub toasts: Vec<Toast>,
    pub celebrating: bool,

    // Popups
    pub show_help: bool,
}
