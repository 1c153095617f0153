//! Persisted progression record
//!
//! Everything that survives a restart lives here. Field names follow the save
//! file layout (`stageUnlocked`, `stageHighScore`, `rewards`, `keys`, `coin`).

use serde::{Deserialize, Serialize};

/// A claimable reward: its key cost and whether it has been claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSlot {
    pub cost: u32,
    pub claimed: bool,
}

/// Complete progression state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionState {
    /// Unlock flag per stage index
    pub stage_unlocked: Vec<bool>,
    /// Last recorded score per stage index
    pub stage_high_score: Vec<u32>,
    /// Reward ledger, fixed length
    pub rewards: Vec<RewardSlot>,
    /// Currency spent on stage unlocks and rewards
    pub keys: u32,
    /// Currency earned from scores and rewards
    pub coin: u32,
}

impl ProgressionState {
    /// Fresh state: every stage locked except `initial_stage`, nothing earned
    pub fn new(stage_count: usize, reward_costs: &[u32], initial_stage: usize) -> Self {
        let mut stage_unlocked = vec![false; stage_count];
        if let Some(flag) = stage_unlocked.get_mut(initial_stage) {
            *flag = true;
        }

        Self {
            stage_unlocked,
            stage_high_score: vec![0; stage_count],
            rewards: reward_costs
                .iter()
                .map(|&cost| RewardSlot {
                    cost,
                    claimed: false,
                })
                .collect(),
            keys: 0,
            coin: 0,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stage_unlocked.len()
    }

    pub fn reward_count(&self) -> usize {
        self.rewards.len()
    }

    /// Check the per-stage vectors agree in length
    pub fn is_consistent(&self) -> bool {
        self.stage_unlocked.len() == self.stage_high_score.len()
    }
}
