//! Mini-game collaborators
//!
//! Each mini-game runs autonomously once spawned and talks to the hub only
//! through the `MiniGame` trait:
//! - `on_start` right after spawn
//! - `handle` for player input, `tick` for elapsed time
//! - a final score returned from `tick` exactly once when hearts run out
//! - `on_terminate` just before the instance is dropped
//!
//! Timed waits are accumulated in `tick(dt)`; randomness comes from a seeded
//! `Pcg32` so a run is reproducible from its seed.

pub mod fish;
pub mod runner;
pub mod sequence;
pub mod session;

pub use fish::FishCount;
pub use runner::Runner;
pub use sequence::Sequence;
pub use session::{MAX_HEARTS, Session};

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Player input forwarded to the running mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Dismiss the start panel
    Start,
    Pause,
    Resume,
    Jump,
    /// Choose a colour / fish kind by index
    Pick(usize),
}

/// Mini-game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MiniGameKind {
    Runner,
    Sequence,
    FishCount,
}

impl MiniGameKind {
    pub const ALL: [MiniGameKind; 3] = [
        MiniGameKind::Runner,
        MiniGameKind::Sequence,
        MiniGameKind::FishCount,
    ];

    /// Variant hosted by a stage index (cycles when there are more stages)
    pub fn for_stage(stage: usize) -> Self {
        Self::ALL[stage % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MiniGameKind::Runner => "Runner",
            MiniGameKind::Sequence => "Sequence",
            MiniGameKind::FishCount => "Fish Count",
        }
    }
}

/// A running mini-game
pub trait MiniGame {
    fn kind(&self) -> MiniGameKind;

    /// Called once after spawn, before any input
    fn on_start(&mut self);

    fn handle(&mut self, action: Action);

    /// Advance by `dt` seconds. Returns the final score once, when the game ends.
    fn tick(&mut self, dt: f32) -> Option<u32>;

    fn session(&self) -> &Session;

    /// Called with the score the hub is about to bank, before the instance is dropped
    fn on_terminate(&mut self, score: u32) {
        log::debug!("{} terminated with score {}", self.kind().as_str(), score);
    }
}

/// Spawns mini-game instances for stages
pub trait MiniGameFactory {
    fn spawn(&mut self, stage: usize) -> Box<dyn MiniGame>;
}

/// Default factory: one variant per stage, fresh seed per launch
pub struct Catalog {
    rng: Pcg32,
}

impl Catalog {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl MiniGameFactory for Catalog {
    fn spawn(&mut self, stage: usize) -> Box<dyn MiniGame> {
        let seed = self.rng.next_u64();
        match MiniGameKind::for_stage(stage) {
            MiniGameKind::Runner => Box::new(Runner::new(seed)),
            MiniGameKind::Sequence => Box::new(Sequence::new(seed)),
            MiniGameKind::FishCount => Box::new(FishCount::new(seed)),
        }
    }
}
