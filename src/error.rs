//! Classified outcomes for hub operations
//!
//! Every variant is recoverable: the operation that reports it has left the
//! progression state untouched.

use thiserror::Error;

/// Failure classification for stage, reward and mini-game operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("index {index} is out of range (0..{len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("stage {0} is already unlocked")]
    AlreadyUnlocked(usize),

    #[error("reward {0} has already been claimed")]
    AlreadyClaimed(usize),

    #[error("not enough keys: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("stage {0} is locked")]
    Locked(usize),

    #[error("no mini-game is running")]
    NoActiveInstance,

    /// A mini-game is running; selection is only possible from the hub
    #[error("a mini-game is already running")]
    Busy,

    #[error("persisted record is malformed: {0}")]
    MalformedPersistedRecord(String),
}

/// Errors at the save-file boundary
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save record could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Parsed, but the record does not match the configured hub shape
    #[error("save record has the wrong shape: {0}")]
    Shape(String),
}

impl From<PersistError> for HubError {
    fn from(err: PersistError) -> Self {
        HubError::MalformedPersistedRecord(err.to_string())
    }
}
