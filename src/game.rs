//! Click-rate minigame
//!
//! Pure session logic. The one-second timer that drives [`GameSession::tick`]
//! lives in the app layer.

use crate::constants::{DEFAULT_GAME_DURATION_SECS, EXCELLENT_SCORE, POINTS_PER_LEVEL};

#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub active: bool,
    pub score: u32,
    pub time_remaining: u32,
    pub level: u32,
    duration_secs: u32,
}

/// Summary of a finished round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub score: u32,
    pub level: u32,
    pub excellent: bool,
}

/// What a click did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickResult {
    /// No round in progress
    Ignored,
    Scored,
    /// The click reached a new level
    LevelUp(u32),
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_DURATION_SECS)
    }
}

impl GameSession {
    pub fn new(duration_secs: u32) -> Self {
        GameSession {
            active: false,
            score: 0,
            time_remaining: duration_secs,
            level: 1,
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn start(&mut self) {
        self.active = true;
        self.score = 0;
        self.time_remaining = self.duration_secs;
    }

    pub fn click(&mut self) -> ClickResult {
        if !self.active {
            return ClickResult::Ignored;
        }
        self.score += 1;
        if self.score % POINTS_PER_LEVEL == 0 {
            ClickResult::LevelUp(level_for(self.score))
        } else {
            ClickResult::Scored
        }
    }

    /// Advance the countdown by one second. Returns the outcome when this
    /// tick ended the round.
    pub fn tick(&mut self) -> Option<GameOutcome> {
        if !self.active {
            return None;
        }
        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            return Some(self.finish());
        }
        self.time_remaining -= 1;
        None
    }

    /// End the round early. `None` if no round was running.
    pub fn stop(&mut self) -> Option<GameOutcome> {
        if self.active {
            Some(self.finish())
        } else {
            None
        }
    }

    fn finish(&mut self) -> GameOutcome {
        self.active = false;
        self.level = level_for(self.score);
        GameOutcome {
            score: self.score,
            level: self.level,
            excellent: self.score > EXCELLENT_SCORE,
        }
    }
}

pub fn level_for(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicks_count_only_while_active() {
        let mut game = GameSession::new(30);
        assert_eq!(game.click(), ClickResult::Ignored);
        assert_eq!(game.score, 0);

        game.start();
        assert_eq!(game.click(), ClickResult::Scored);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_every_tenth_click_levels_up() {
        let mut game = GameSession::new(30);
        game.start();
        for _ in 0..9 {
            assert_eq!(game.click(), ClickResult::Scored);
        }
        assert_eq!(game.click(), ClickResult::LevelUp(2));
    }

    #[test]
    fn test_timer_expiry_freezes_score() {
        let mut game = GameSession::new(3);
        game.start();
        game.click();
        assert_eq!(game.tick(), None);
        assert_eq!(game.tick(), None);
        assert_eq!(game.time_remaining, 1);

        let outcome = game.tick().expect("round should end");
        assert_eq!(outcome, GameOutcome { score: 1, level: 1, excellent: false });
        assert_eq!(game.time_remaining, 0);
        assert!(!game.active);

        assert_eq!(game.click(), ClickResult::Ignored);
        assert_eq!(game.tick(), None);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_excellent_round() {
        let mut game = GameSession::new(30);
        game.start();
        for _ in 0..21 {
            game.click();
        }
        let outcome = game.stop().unwrap();
        assert!(outcome.excellent);
        assert_eq!(outcome.level, 3);
        assert_eq!(game.level, 3);
    }

    #[test]
    fn test_restart_resets_score_and_clock() {
        let mut game = GameSession::new(30);
        game.start();
        game.click();
        game.tick();
        game.start();
        assert_eq!(game.score, 0);
        assert_eq!(game.time_remaining, 30);
        assert_eq!(game.stop().map(|o| o.score), Some(0));
        assert_eq!(game.stop(), None);
    }
}
