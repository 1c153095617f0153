//! Stage gating decisions

use super::store::ProgressionStore;

/// Keys needed to unlock any stage
pub const UNLOCK_COST: u32 = 10;

/// Three-way classification of a stage index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Invalid,
    Locked,
    Unlocked,
}

/// Classify a stage index against the current progression
pub fn validate(store: &ProgressionStore, index: usize) -> StageStatus {
    match store.is_stage_unlocked(index) {
        Ok(true) => StageStatus::Unlocked,
        Ok(false) => StageStatus::Locked,
        Err(_) => StageStatus::Invalid,
    }
}

/// A stage can be selected when it exists and is unlocked
pub fn can_select(store: &ProgressionStore, index: usize) -> bool {
    validate(store, index) == StageStatus::Unlocked
}
