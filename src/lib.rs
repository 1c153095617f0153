//! Stage Hub - progression and mini-game orchestration for a game hub
//!
//! Core modules:
//! - `progress`: Persisted progression, stage gating, rewards, score conversion
//! - `hub`: Application context and the mini-game lifecycle
//! - `minigame`: Mini-game trait and the bundled tick-driven games
//! - `persistence`: Save/load with atomic writes
//! - `settings`: Data-driven hub configuration

pub mod error;
pub mod hub;
pub mod minigame;
pub mod persistence;
pub mod progress;
pub mod settings;

pub use error::{HubError, PersistError};
pub use hub::{Hub, HubSnapshot, Notice};
pub use settings::HubSettings;

/// Host loop constants
pub mod consts {
    /// Fixed mini-game timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
