//! Command handlers - business logic for processing UI events

use chrono::Utc;

use crate::app::AppState;
use crate::constants::{GAME_CELEBRATION_MS, MILESTONE_CELEBRATION_MS, MILESTONE_STEP};
use crate::export::{self, ExportDocument};
use crate::game::{ClickResult, GameOutcome};
use crate::messages::ui_events::{InputField, InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Checkpoint, CountAction, ToastKind};
use crate::stats::Statistics;
use std::time::Duration;

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn select_up(&mut self) {
        match self.active_panel {
            Panel::Checkpoints => {
                if !self.checkpoints.is_empty() {
                    self.selected_checkpoint = self
                        .selected_checkpoint
                        .checked_sub(1)
                        .unwrap_or(self.checkpoints.len() - 1);
                }
            }
            Panel::History => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            Panel::Counter => {}
        }
    }

    pub fn select_down(&mut self) {
        match self.active_panel {
            Panel::Checkpoints => {
                if !self.checkpoints.is_empty() {
                    self.selected_checkpoint = (self.selected_checkpoint + 1) % self.checkpoints.len();
                }
            }
            Panel::History => {
                let shown = self.history.len().min(self.history_limit) as u16;
                if self.history_scroll + 1 < shown {
                    self.history_scroll += 1;
                }
            }
            Panel::Counter => {}
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn edit_custom_value(&mut self) {
        self.input_mode = InputMode::Editing(InputField::CustomValue);
        self.cursor_position = self.custom_input.len();
    }

    pub fn new_checkpoint(&mut self) {
        self.checkpoint_input.clear();
        self.input_mode = InputMode::Editing(InputField::CheckpointName);
        self.cursor_position = 0;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.input_mode == InputMode::Editing(InputField::CustomValue)
            && !(c.is_ascii_digit() || c == '-')
        {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    /// Finish editing. Committing a checkpoint name saves the checkpoint.
    pub fn commit_input(&mut self) {
        let field = self.input_mode;
        self.input_mode = InputMode::Normal;
        if field == InputMode::Editing(InputField::CheckpointName) {
            let name = std::mem::take(&mut self.checkpoint_input);
            self.save_checkpoint(&name);
        }
    }

    pub fn cancel_input(&mut self) {
        if self.input_mode == InputMode::Editing(InputField::CheckpointName) {
            self.checkpoint_input.clear();
        }
        self.input_mode = InputMode::Normal;
    }

    // ========================
    // Counter calls
    // ========================

    /// Issue one mutating call. Overlapping calls are allowed.
    pub fn request(&mut self, action: CountAction) -> NetworkCommand {
        let id = self.next_id();
        self.in_flight.insert(id);
        NetworkCommand::Apply { id, action }
    }

    pub fn increment(&mut self) -> NetworkCommand {
        self.request(CountAction::Increment)
    }

    pub fn decrement(&mut self) -> NetworkCommand {
        self.request(CountAction::Decrement)
    }

    pub fn reset(&mut self) -> NetworkCommand {
        self.request(CountAction::Reset)
    }

    pub fn apply_custom(&mut self) -> NetworkCommand {
        self.request(CountAction::Custom(self.custom_value()))
    }

    /// Reload the count and the history
    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        vec![
            NetworkCommand::FetchCount { id: self.next_id() },
            NetworkCommand::FetchHistory { id: self.next_id() },
        ]
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response. Returns the follow-up command, if any.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        if response.is_apply() {
            self.in_flight.remove(&response.id());
        }

        match response {
            NetworkResponse::Count { count, .. } => {
                self.count = count;
                None
            }
            NetworkResponse::Applied { action, count, message, .. } => {
                self.count = count;
                if let Some(message) = message {
                    tracing::debug!(%message, "Server message");
                }
                self.announce(action, count);
                Some(NetworkCommand::FetchHistory { id: self.next_id() })
            }
            NetworkResponse::History { items, .. } => {
                self.history = items;
                let shown = self.history.len().min(self.history_limit) as u16;
                self.history_scroll = self.history_scroll.min(shown.saturating_sub(1));
                None
            }
            NetworkResponse::Error { kind, message, .. } => {
                self.push_toast(ToastKind::Error, format!("{} failed: {}", kind.describe(), message));
                None
            }
        }
    }

    fn announce(&mut self, action: CountAction, count: i64) {
        let text = match action {
            CountAction::Increment => format!("Counter incremented to {}", count),
            CountAction::Decrement => format!("Counter decremented to {}", count),
            CountAction::Custom(value) => format!("Counter changed by {:+}", value),
            CountAction::Reset => format!("Counter reset to {}", count),
        };
        self.push_toast(ToastKind::Success, text);

        if action == CountAction::Increment && count > 0 && count % MILESTONE_STEP == 0 {
            self.celebrate(Duration::from_millis(MILESTONE_CELEBRATION_MS));
            self.push_toast(ToastKind::Success, format!("Milestone {} reached!", count));
        }
    }

    // ========================
    // Display toggles
    // ========================

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn toggle_chart(&mut self) {
        self.show_chart = !self.show_chart;
    }

    pub fn cycle_chart_type(&mut self) {
        self.chart_type = self.chart_type.next();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Minigame
    // ========================

    /// Leaving game mode ends a running round
    pub fn toggle_game_mode(&mut self) {
        self.game_mode = !self.game_mode;
        if !self.game_mode {
            self.stop_game();
        }
    }

    /// Start (or restart) a round. Returns true when the timer must be (re)started.
    pub fn start_game(&mut self) -> bool {
        if !self.game_mode {
            return false;
        }
        self.game.start();
        self.push_toast(
            ToastKind::Info,
            format!("Game started! Press space as fast as you can ({}s)", self.game.duration_secs()),
        );
        true
    }

    pub fn game_click(&mut self) {
        if let ClickResult::LevelUp(level) = self.game.click() {
            self.push_toast(ToastKind::Success, format!("Level {}!", level));
        }
    }

    /// One second of game time elapsed
    pub fn game_tick(&mut self) {
        if let Some(outcome) = self.game.tick() {
            self.finish_game(outcome);
        }
    }

    pub fn stop_game(&mut self) {
        if let Some(outcome) = self.game.stop() {
            self.finish_game(outcome);
        }
    }

    fn finish_game(&mut self, outcome: GameOutcome) {
        tracing::info!(score = outcome.score, level = outcome.level, "Game finished");
        if outcome.excellent {
            self.celebrate(Duration::from_millis(GAME_CELEBRATION_MS));
            self.push_toast(
                ToastKind::Success,
                format!("Excellent! {} clicks, level {} reached!", outcome.score, outcome.level),
            );
        } else {
            self.push_toast(
                ToastKind::Info,
                format!("Game over! Score: {} clicks. Keep practicing!", outcome.score),
            );
        }
    }

    // ========================
    // Checkpoints
    // ========================

    pub fn save_checkpoint(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Ignoring checkpoint without a name");
            return;
        }

        let now = Utc::now();
        let id = now.timestamp_millis().max(self.last_checkpoint_id + 1);
        self.last_checkpoint_id = id;

        self.checkpoints.push(Checkpoint {
            id,
            count: self.count,
            timestamp: now.to_rfc3339(),
            name: name.to_string(),
        });
        self.selected_checkpoint = self.checkpoints.len() - 1;
        self.push_toast(ToastKind::Success, format!("Checkpoint \"{}\" saved", name));
    }

    /// Restore the local count from a checkpoint. The remote count is untouched.
    pub fn load_checkpoint(&mut self, id: i64) {
        let Some(checkpoint) = self.checkpoints.iter().find(|c| c.id == id) else {
            return;
        };
        let (count, name) = (checkpoint.count, checkpoint.name.clone());
        self.count = count;
        self.push_toast(ToastKind::Success, format!("Checkpoint \"{}\" loaded", name));
    }

    pub fn delete_checkpoint(&mut self, id: i64) {
        self.checkpoints.retain(|c| c.id != id);
        if self.selected_checkpoint >= self.checkpoints.len() {
            self.selected_checkpoint = self.checkpoints.len().saturating_sub(1);
        }
    }

    pub fn load_selected_checkpoint(&mut self) {
        if let Some(id) = self.checkpoints.get(self.selected_checkpoint).map(|c| c.id) {
            self.load_checkpoint(id);
        }
    }

    pub fn delete_selected_checkpoint(&mut self) {
        if let Some(id) = self.checkpoints.get(self.selected_checkpoint).map(|c| c.id) {
            self.delete_checkpoint(id);
        }
    }

    // ========================
    // Export
    // ========================

    pub fn export_json(&mut self) {
        let now = Utc::now();
        let doc = ExportDocument {
            count: self.count,
            history: &self.history,
            checkpoints: &self.checkpoints,
            statistics: Statistics::from_history(&self.history),
            timestamp: now.to_rfc3339(),
        };
        let result = export::write_json(&self.export_dir, &doc, now.date_naive());
        self.report_export("Data", result);
    }

    pub fn export_csv(&mut self) {
        let result = export::write_csv(&self.export_dir, &self.history, Utc::now().date_naive());
        self.report_export("History", result);
    }

    fn report_export(&mut self, what: &str, result: anyhow::Result<std::path::PathBuf>) {
        match result {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Exported");
                self.push_toast(ToastKind::Success, format!("{} exported to {}", what, path.display()));
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::error!(error = %message, "Export failed");
                self.push_toast(ToastKind::Error, format!("Export failed: {}", message));
            }
        }
    }
}
