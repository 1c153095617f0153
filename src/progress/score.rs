//! Raw mini-game score to currency conversion

use serde::{Deserialize, Serialize};

/// Score points per key earned
pub const POINTS_PER_KEY: u32 = 10;
/// Score points per coin earned
pub const POINTS_PER_COIN: u32 = 5;

/// Currency earned from one mini-game run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrencyDelta {
    pub keys: u32,
    pub coin: u32,
}

/// Convert a final score into keys and coin (both rounded down)
pub fn convert(raw_score: u32) -> CurrencyDelta {
    CurrencyDelta {
        keys: raw_score / POINTS_PER_KEY,
        coin: raw_score / POINTS_PER_COIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_reference_values() {
        assert_eq!(convert(0), CurrencyDelta { keys: 0, coin: 0 });
        assert_eq!(convert(47), CurrencyDelta { keys: 4, coin: 9 });
        assert_eq!(convert(50), CurrencyDelta { keys: 5, coin: 10 });
        assert_eq!(convert(9), CurrencyDelta { keys: 0, coin: 1 });
    }
}
