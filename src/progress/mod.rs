//! Progression: persisted state, stage gating, rewards and score conversion
//!
//! Nothing in here knows about mini-game mechanics or presentation.

pub mod gate;
pub mod rewards;
pub mod score;
pub mod state;
pub mod store;

pub use gate::{StageStatus, UNLOCK_COST, can_select, validate};
pub use rewards::{RewardView, claim, list_rewards};
pub use score::{CurrencyDelta, convert};
pub use state::{ProgressionState, RewardSlot};
pub use store::ProgressionStore;
