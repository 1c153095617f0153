//! Fish-counting game
//!
//! A school of fish swims for a while; one kind has an extra member. After the
//! watch phase the player names the most numerous kind. Rounds grow larger and
//! faster.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::Session;
use super::{Action, MiniGame, MiniGameKind};

/// Distinct fish kinds
pub const FISH_KINDS: usize = 3;
/// Fish in the first round
pub const INITIAL_FISH: usize = 5;
/// Extra fish per round
pub const FISH_PER_ROUND: usize = 3;
/// Seconds the player watches before choosing
pub const WATCH_SECS: f32 = 10.0;
/// Starting swim speed range
pub const INITIAL_SPEED: (f32, f32) = (70.0, 100.0);
/// Speed increase per round
pub const SPEED_STEP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fish {
    pub kind: usize,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FishPhase {
    Watching { elapsed: f32 },
    Choosing,
}

pub struct FishCount {
    session: Session,
    rng: Pcg32,
    pub fish: Vec<Fish>,
    pub phase: FishPhase,
    spawn_count: usize,
    speed: (f32, f32),
    round: u32,
    extra_kind: usize,
}

impl FishCount {
    pub fn new(seed: u64) -> Self {
        Self {
            session: Session::new(),
            rng: Pcg32::seed_from_u64(seed),
            fish: Vec::new(),
            phase: FishPhase::Choosing,
            spawn_count: INITIAL_FISH,
            speed: INITIAL_SPEED,
            round: 0,
            extra_kind: 0,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// The kind with one more fish than the others this round
    pub fn extra_kind(&self) -> usize {
        self.extra_kind
    }

    fn spawn_school(&mut self) {
        let base = self.spawn_count / FISH_KINDS;
        self.extra_kind = self.rng.random_range(0..FISH_KINDS);
        self.fish.clear();

        for kind in 0..FISH_KINDS {
            let count = if kind == self.extra_kind { base + 1 } else { base };
            for _ in 0..count {
                let speed = self.rng.random_range(self.speed.0..self.speed.1);
                self.fish.push(Fish { kind, speed });
            }
        }
        self.phase = FishPhase::Watching { elapsed: 0.0 };
    }

    fn end_watch(&mut self) {
        self.fish.clear();
        self.spawn_count += FISH_PER_ROUND;
        self.speed.0 += SPEED_STEP;
        self.speed.1 += SPEED_STEP;
        self.phase = FishPhase::Choosing;
    }

    fn choose(&mut self, kind: usize) {
        if !self.session.is_active() || self.phase != FishPhase::Choosing {
            return;
        }

        if kind == self.extra_kind {
            self.session.add_score(10 + self.round * 20);
        } else if self.session.lose_heart() {
            return;
        }
        self.round += 1;
        self.spawn_school();
    }
}

impl MiniGame for FishCount {
    fn kind(&self) -> MiniGameKind {
        MiniGameKind::FishCount
    }

    fn on_start(&mut self) {
        self.session = Session::new();
        self.spawn_count = INITIAL_FISH;
        self.speed = INITIAL_SPEED;
        self.round = 0;
    }

    fn handle(&mut self, action: Action) {
        match action {
            Action::Start => {
                if self.session.begin() {
                    self.spawn_school();
                }
            }
            Action::Pick(kind) => self.choose(kind),
            other => {
                self.session.handle_common(other);
            }
        }
    }

    fn tick(&mut self, dt: f32) -> Option<u32> {
        if self.session.is_active() {
            if let FishPhase::Watching { elapsed } = self.phase {
                let elapsed = elapsed + dt;
                if elapsed >= WATCH_SECS {
                    self.end_watch();
                } else {
                    self.phase = FishPhase::Watching { elapsed };
                }
            }
        }
        self.session.take_final()
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
