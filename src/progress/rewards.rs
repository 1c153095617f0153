//! Claimable reward ledger
//!
//! A reward's cost is paid in keys and paid back out as the same amount of
//! coin. Claims are one-shot until a full reset.

use serde::Serialize;

use super::store::ProgressionStore;
use crate::error::HubError;

/// Read-only view of one reward for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardView {
    pub index: usize,
    pub cost: u32,
    pub claimed: bool,
    /// Unclaimed and the player holds enough keys
    pub affordable: bool,
}

/// Snapshot every reward in ledger order
pub fn list_rewards(store: &ProgressionStore) -> Vec<RewardView> {
    let keys = store.keys();
    store
        .state()
        .rewards
        .iter()
        .enumerate()
        .map(|(index, slot)| RewardView {
            index,
            cost: slot.cost,
            claimed: slot.claimed,
            affordable: !slot.claimed && keys >= slot.cost,
        })
        .collect()
}

/// Claim a reward: keys -= cost, coin += cost, mark claimed
pub fn claim(store: &mut ProgressionStore, index: usize) -> Result<(), HubError> {
    let state = store.state_mut();
    let len = state.rewards.len();
    let slot = state
        .rewards
        .get(index)
        .copied()
        .ok_or(HubError::InvalidIndex { index, len })?;

    if slot.claimed {
        return Err(HubError::AlreadyClaimed(index));
    }
    if state.keys < slot.cost {
        return Err(HubError::InsufficientFunds {
            needed: slot.cost,
            available: state.keys,
        });
    }

    state.keys -= slot.cost;
    state.coin = state.coin.saturating_add(slot.cost);
    state.rewards[index].claimed = true;
    log::info!(
        "Reward {} claimed: {} keys -> {} coin (keys {}, coin {})",
        index,
        slot.cost,
        slot.cost,
        state.keys,
        state.coin
    );
    Ok(())
}
