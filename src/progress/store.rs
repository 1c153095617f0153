//! Authoritative in-memory progression state
//!
//! All mutations check their preconditions first and either apply fully or
//! leave the state untouched.

use super::state::ProgressionState;
use crate::error::HubError;

/// Owner of the progression record for the whole run
#[derive(Debug, Clone)]
pub struct ProgressionStore {
    state: ProgressionState,
}

impl ProgressionStore {
    /// Create a store holding a fresh state
    pub fn new(stage_count: usize, reward_costs: &[u32], initial_stage: usize) -> Self {
        Self {
            state: ProgressionState::new(stage_count, reward_costs, initial_stage),
        }
    }

    /// Wrap an already-validated state (e.g. one loaded from disk)
    pub fn from_state(state: ProgressionState) -> Self {
        Self { state }
    }

    /// Replace any prior state with a fresh one
    pub fn initialize(&mut self, stage_count: usize, reward_costs: &[u32], initial_stage: usize) {
        self.state = ProgressionState::new(stage_count, reward_costs, initial_stage);
        log::info!(
            "Progress initialized: {} stages, {} rewards, initial stage {}",
            stage_count,
            reward_costs.len(),
            initial_stage
        );
    }

    /// Swap in a whole record, returning the previous one
    pub fn replace(&mut self, state: ProgressionState) -> ProgressionState {
        std::mem::replace(&mut self.state, state)
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ProgressionState {
        &mut self.state
    }

    pub fn stage_count(&self) -> usize {
        self.state.stage_count()
    }

    pub fn reward_count(&self) -> usize {
        self.state.reward_count()
    }

    pub fn keys(&self) -> u32 {
        self.state.keys
    }

    pub fn coin(&self) -> u32 {
        self.state.coin
    }

    pub fn high_score(&self, index: usize) -> Result<u32, HubError> {
        self.check_stage(index)?;
        Ok(self.state.stage_high_score[index])
    }

    pub fn is_stage_unlocked(&self, index: usize) -> Result<bool, HubError> {
        self.check_stage(index)?;
        Ok(self.state.stage_unlocked[index])
    }

    /// Spend `cost` keys to unlock a stage
    pub fn unlock_stage(&mut self, index: usize, cost: u32) -> Result<(), HubError> {
        if self.is_stage_unlocked(index)? {
            return Err(HubError::AlreadyUnlocked(index));
        }
        if self.state.keys < cost {
            return Err(HubError::InsufficientFunds {
                needed: cost,
                available: self.state.keys,
            });
        }

        self.state.keys -= cost;
        self.state.stage_unlocked[index] = true;
        log::info!("Stage {} unlocked for {} keys ({} left)", index, cost, self.state.keys);
        Ok(())
    }

    /// Mark a stage unlocked without charging for it
    pub fn grant_stage(&mut self, index: usize) -> Result<(), HubError> {
        self.check_stage(index)?;
        self.state.stage_unlocked[index] = true;
        Ok(())
    }

    /// Store the latest score for a stage (overwrites, does not keep the best)
    pub fn record_score(&mut self, index: usize, score: u32) -> Result<(), HubError> {
        self.check_stage(index)?;
        self.state.stage_high_score[index] = score;
        Ok(())
    }

    /// Add signed deltas to both balances, clamping at zero
    pub fn apply_currency_delta(&mut self, keys_delta: i64, coin_delta: i64) {
        self.state.keys = clamp_add(self.state.keys, keys_delta);
        self.state.coin = clamp_add(self.state.coin, coin_delta);
    }

    fn check_stage(&self, index: usize) -> Result<(), HubError> {
        let len = self.state.stage_count();
        if index < len {
            Ok(())
        } else {
            Err(HubError::InvalidIndex { index, len })
        }
    }
}

fn clamp_add(balance: u32, delta: i64) -> u32 {
    (i64::from(balance) + delta).clamp(0, i64::from(u32::MAX)) as u32
}
