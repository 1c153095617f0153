//! JSON encoding of the progression record

use crate::error::PersistError;
use crate::progress::ProgressionState;

/// Encode a state as pretty-printed JSON bytes
pub fn encode(state: &ProgressionState) -> Result<Vec<u8>, PersistError> {
    Ok(serde_json::to_vec_pretty(state)?)
}

/// Decode a state, rejecting records whose stage vectors disagree in length
pub fn decode(bytes: &[u8]) -> Result<ProgressionState, PersistError> {
    let state: ProgressionState = serde_json::from_slice(bytes)?;
    if !state.is_consistent() {
        return Err(PersistError::Shape(format!(
            "{} unlock flags but {} scores",
            state.stage_unlocked.len(),
            state.stage_high_score.len()
        )));
    }
    Ok(state)
}

/// Decode and check the record matches the configured stage and reward counts
pub fn decode_for(
    bytes: &[u8],
    stage_count: usize,
    reward_count: usize,
) -> Result<ProgressionState, PersistError> {
    let state = decode(bytes)?;
    if state.stage_count() != stage_count || state.reward_count() != reward_count {
        return Err(PersistError::Shape(format!(
            "expected {} stages / {} rewards, found {} / {}",
            stage_count,
            reward_count,
            state.stage_count(),
            state.reward_count()
        )));
    }
    Ok(state)
}
