//! Transient on-screen notifications

use serde::Serialize;

use crate::error::HubError;

/// Notification kinds the hub can flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notice {
    Success,
    Failure,
    Locked,
    Selected,
}

impl Notice {
    /// Notice for a failed intent
    pub fn for_error(err: &HubError) -> Self {
        match err {
            HubError::Locked(_) => Notice::Locked,
            _ => Notice::Failure,
        }
    }

    /// Notice for a stage selection result
    pub fn for_select<T>(result: &Result<T, HubError>) -> Self {
        match result {
            Ok(_) => Notice::Selected,
            Err(e) => Self::for_error(e),
        }
    }

    /// Notice for unlock/claim/launch/reset results
    pub fn for_result<T>(result: &Result<T, HubError>) -> Self {
        match result {
            Ok(_) => Notice::Success,
            Err(e) => Self::for_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        assert_eq!(Notice::for_select(&Ok::<(), HubError>(())), Notice::Selected);
        assert_eq!(Notice::for_result(&Ok::<(), HubError>(())), Notice::Success);
        assert_eq!(
            Notice::for_select(&Err::<(), _>(HubError::Locked(2))),
            Notice::Locked
        );
        assert_eq!(
            Notice::for_result(&Err::<(), _>(HubError::AlreadyClaimed(0))),
            Notice::Failure
        );
        assert_eq!(
            Notice::for_error(&HubError::InvalidIndex { index: 9, len: 3 }),
            Notice::Failure
        );
    }
}
