//! App actor - message loop processing UI events, network responses and timers

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::app::timer::GameTimer;
use crate::config::Config;
use crate::constants::HOUSEKEEPING_INTERVAL_MS;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    game_timer: GameTimer,
    tick_tx: mpsc::UnboundedSender<u64>,
    tick_rx: mpsc::UnboundedReceiver<u64>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
            game_timer: GameTimer::new(),
            tick_tx,
            tick_rx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial load
        for cmd in self.state.refresh() {
            self.send(cmd);
        }
        self.render();

        let mut housekeeping = tokio::time::interval(Duration::from_millis(HOUSEKEEPING_INTERVAL_MS));

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        self.game_timer.stop();
                        self.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.sync_timer();
                    self.render();
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response) {
                        self.send(cmd);
                    }
                    self.render();
                }
                Some(round) = self.tick_rx.recv() => {
                    if self.on_tick(round) {
                        self.render();
                    }
                }
                _ = housekeeping.tick() => {
                    if self.state.expire(Instant::now()) {
                        self.render();
                    }
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        let _ = self.network_tx.send(cmd);
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Apply a timer tick, returns false for ticks left over from an older round
    fn on_tick(&mut self, round: u64) -> bool {
        if !self.game_timer.is_current(round) {
            return false;
        }
        self.state.game_tick();
        self.sync_timer();
        true
    }

    /// The timer only runs while a round is active
    fn sync_timer(&mut self) {
        if !self.state.game.active && self.game_timer.is_running() {
            self.game_timer.stop();
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Counter
            UiEvent::Increment => {
                let cmd = self.state.increment();
                self.send(cmd);
            }
            UiEvent::Decrement => {
                let cmd = self.state.decrement();
                self.send(cmd);
            }
            UiEvent::Reset => {
                let cmd = self.state.reset();
                self.send(cmd);
            }
            UiEvent::ApplyCustom => {
                let cmd = self.state.apply_custom();
                self.send(cmd);
            }
            UiEvent::Refresh => {
                for cmd in self.state.refresh() {
                    self.send(cmd);
                }
            }

            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::SelectUp => self.state.select_up(),
            UiEvent::SelectDown => self.state.select_down(),

            // Input editing
            UiEvent::EditCustomValue => self.state.edit_custom_value(),
            UiEvent::NewCheckpoint => self.state.new_checkpoint(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::CommitInput => self.state.commit_input(),
            UiEvent::CancelInput => self.state.cancel_input(),

            // Display toggles
            UiEvent::ToggleHistory => self.state.toggle_history(),
            UiEvent::ToggleChart => self.state.toggle_chart(),
            UiEvent::CycleChartType => self.state.cycle_chart_type(),
            UiEvent::ToggleGameMode => self.state.toggle_game_mode(),

            // Minigame
            UiEvent::StartGame => {
                if self.state.start_game() {
                    self.game_timer.start(Duration::from_secs(1), self.tick_tx.clone());
                }
            }
            UiEvent::GameClick => self.state.game_click(),
            UiEvent::StopGame => self.state.stop_game(),

            // Checkpoints
            UiEvent::LoadCheckpoint => self.state.load_selected_checkpoint(),
            UiEvent::DeleteCheckpoint => self.state.delete_selected_checkpoint(),

            // Export
            UiEvent::ExportJson => self.state.export_json(),
            UiEvent::ExportCsv => self.state.export_csv(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_GAME_DURATION_SECS;
    use crate::models::CountAction;

    #[tokio::test]
    async fn test_initial_load_and_increment_round_trip() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(&Config::default(), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::FetchCount { .. })));
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::FetchHistory { .. })));

        ui_tx.send(UiEvent::Increment).unwrap();
        let id = match net_cmd_rx.recv().await {
            Some(NetworkCommand::Apply { id, action: CountAction::Increment }) => id,
            other => panic!("unexpected command {:?}", other),
        };

        net_resp_tx
            .send(NetworkResponse::Applied { id, action: CountAction::Increment, count: 1, message: None })
            .unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::FetchHistory { .. })));

        let mut latest = None;
        while latest.as_ref().map(|s: &RenderState| s.count) != Some(1) {
            latest = render_rx.recv().await;
        }

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarted_round_ignores_tick_from_previous_round() {
        let (net_cmd_tx, _net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        let mut actor = AppActor::new(&Config::default(), net_cmd_tx, render_tx);

        actor.handle_ui_event(UiEvent::ToggleGameMode);
        actor.handle_ui_event(UiEvent::StartGame);
        // the first round's timer fires and its tick is still queued at restart
        tokio::time::sleep(Duration::from_millis(1_100)).await;
        actor.handle_ui_event(UiEvent::StartGame);

        let (mut queued, mut applied) = (0, 0);
        while let Ok(round) = actor.tick_rx.try_recv() {
            queued += 1;
            if actor.on_tick(round) {
                applied += 1;
            }
        }
        assert_eq!((queued, applied), (1, 0));
        assert_eq!(actor.state.game.time_remaining, DEFAULT_GAME_DURATION_SECS);
        assert!(actor.state.game.active);

        // ticks of the running round still count
        tokio::time::sleep(Duration::from_millis(1_100)).await;
        let round = actor.tick_rx.try_recv().unwrap();
        assert!(actor.on_tick(round));
        assert_eq!(actor.state.game.time_remaining, DEFAULT_GAME_DURATION_SECS - 1);
    }
}
