//! Colour-memory game
//!
//! Every round appends a random colour, plays the whole sequence back, then
//! waits for the player to repeat it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::Session;
use super::{Action, MiniGame, MiniGameKind};

/// Number of colour buttons
pub const COLOR_COUNT: usize = 9;
/// Seconds each colour stays lit during playback
pub const LIT_SECS: f32 = 1.0;
/// Dark gap after each colour
pub const DARK_SECS: f32 = 0.5;
/// Points per colour in a completed sequence
pub const POINTS_PER_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencePhase {
    /// Playing back the sequence; `step` is the colour being shown
    Showing { step: usize, lit: bool, elapsed: f32 },
    /// Waiting for the player to enter colour number `step`
    PlayerTurn { step: usize },
}

pub struct Sequence {
    session: Session,
    rng: Pcg32,
    sequence: Vec<usize>,
    pub phase: SequencePhase,
}

impl Sequence {
    pub fn new(seed: u64) -> Self {
        Self {
            session: Session::new(),
            rng: Pcg32::seed_from_u64(seed),
            sequence: Vec::new(),
            phase: SequencePhase::PlayerTurn { step: 0 },
        }
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Colour currently shown by the marble, if any
    pub fn lit_color(&self) -> Option<usize> {
        match self.phase {
            SequencePhase::Showing {
                step, lit: true, ..
            } => self.sequence.get(step).copied(),
            _ => None,
        }
    }

    fn next_round(&mut self) {
        self.sequence.push(self.rng.random_range(0..COLOR_COUNT));
        self.phase = SequencePhase::Showing {
            step: 0,
            lit: true,
            elapsed: 0.0,
        };
    }

    fn pick(&mut self, color: usize) {
        if !self.session.is_active() {
            return;
        }
        let SequencePhase::PlayerTurn { step } = self.phase else {
            return;
        };

        if self.sequence.get(step) == Some(&color) {
            let step = step + 1;
            if step >= self.sequence.len() {
                self.session
                    .add_score(POINTS_PER_STEP * self.sequence.len() as u32);
                self.next_round();
            } else {
                self.phase = SequencePhase::PlayerTurn { step };
            }
        } else if !self.session.lose_heart() {
            self.next_round();
        }
    }

    fn advance_playback(&mut self, mut dt: f32) {
        while let SequencePhase::Showing { step, lit, elapsed } = self.phase {
            let hold = if lit { LIT_SECS } else { DARK_SECS };
            let remaining = hold - elapsed;
            if dt < remaining {
                self.phase = SequencePhase::Showing {
                    step,
                    lit,
                    elapsed: elapsed + dt,
                };
                return;
            }
            dt -= remaining;

            self.phase = if lit {
                SequencePhase::Showing {
                    step,
                    lit: false,
                    elapsed: 0.0,
                }
            } else if step + 1 < self.sequence.len() {
                SequencePhase::Showing {
                    step: step + 1,
                    lit: true,
                    elapsed: 0.0,
                }
            } else {
                SequencePhase::PlayerTurn { step: 0 }
            };
        }
    }
}

impl MiniGame for Sequence {
    fn kind(&self) -> MiniGameKind {
        MiniGameKind::Sequence
    }

    fn on_start(&mut self) {
        self.session = Session::new();
        self.sequence.clear();
    }

    fn handle(&mut self, action: Action) {
        match action {
            Action::Start => {
                if self.session.begin() {
                    self.next_round();
                }
            }
            Action::Pick(color) => self.pick(color),
            other => {
                self.session.handle_common(other);
            }
        }
    }

    fn tick(&mut self, dt: f32) -> Option<u32> {
        if self.session.is_active() {
            self.advance_playback(dt);
        }
        self.session.take_final()
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
