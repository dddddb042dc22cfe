//! Game timer - a single repeating one-second tick task

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns the one timer handle. Starting again replaces the running task.
///
/// Every tick carries the round it was started for. A tick that was already
/// queued when the timer was stopped or restarted belongs to an older round
/// and must be dropped by the receiver, see [`GameTimer::is_current`].
#[derive(Default)]
pub struct GameTimer {
    handle: Option<JoinHandle<()>>,
    round: u64,
}

impl GameTimer {
    pub fn new() -> Self {
        GameTimer { handle: None, round: 0 }
    }

    /// Send the new round number on `tick_tx` every `period`, starting one period from now
    pub fn start(&mut self, period: Duration, tick_tx: mpsc::UnboundedSender<u64>) {
        self.stop();
        let round = self.round;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tick_tx.send(round).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        self.round += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a tick stamped with `round` comes from the running task
    pub fn is_current(&self, round: u64) -> bool {
        self.handle.is_some() && round == self.round
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for GameTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = GameTimer::new();
        timer.start(Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert!(timer.is_running());

        timer.stop();
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = GameTimer::new();
        timer.start(Duration::from_secs(1), tx.clone());
        timer.start(Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_is_stale_after_restart() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = GameTimer::new();
        timer.start(Duration::from_secs(1), tx.clone());

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        timer.start(Duration::from_secs(1), tx);

        let queued = rx.try_recv().unwrap();
        assert!(!timer.is_current(queued));

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        let fresh = rx.try_recv().unwrap();
        assert!(timer.is_current(fresh));

        timer.stop();
        assert!(!timer.is_current(fresh));
    }
}
