//! Pause/heart/score bookkeeping shared by every mini-game

use super::Action;

/// Hearts a player starts each mini-game with
pub const MAX_HEARTS: u8 = 3;

/// Per-run bookkeeping composed into each mini-game
#[derive(Debug, Clone)]
pub struct Session {
    score: u32,
    hearts: u8,
    started: bool,
    paused: bool,
    finished: bool,
    reported: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session waiting on the start panel (paused, full hearts)
    pub fn new() -> Self {
        Self {
            score: 0,
            hearts: MAX_HEARTS,
            started: false,
            paused: true,
            finished: false,
            reported: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Gameplay advances only while started, unpaused and not over
    pub fn is_active(&self) -> bool {
        self.started && !self.paused && !self.finished
    }

    /// Leave the start panel. Returns true the first time only.
    pub fn begin(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.paused = false;
        true
    }

    pub fn pause(&mut self) {
        if self.started && !self.finished {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.started && !self.finished {
            self.paused = false;
        }
    }

    /// Apply the start/pause/resume actions every game shares.
    /// Returns true when the action was one of those.
    pub fn handle_common(&mut self, action: Action) -> bool {
        match action {
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::Start => {
                self.begin();
            }
            _ => return false,
        }
        true
    }

    pub fn add_score(&mut self, amount: u32) {
        if amount > 0 {
            self.score = self.score.saturating_add(amount);
        }
    }

    /// Lose a heart; the session finishes when none remain.
    /// Returns true if this heart was the last one.
    pub fn lose_heart(&mut self) -> bool {
        if self.hearts > 0 {
            self.hearts -= 1;
        }
        if self.hearts == 0 && !self.finished {
            self.finished = true;
            log::info!("Out of hearts, final score {}", self.score);
            return true;
        }
        false
    }

    /// The final score, handed out exactly once after the session finishes
    pub fn take_final(&mut self) -> Option<u32> {
        if self.finished && !self.reported {
            self.reported = true;
            Some(self.score)
        } else {
            None
        }
    }
}
