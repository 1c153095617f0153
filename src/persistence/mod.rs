//! Save/load of the progression record
//!
//! - `codec`: pure JSON encode/decode with shape validation
//! - `slot`: on-disk save file with temp-file writes and backup rotation

pub mod codec;
pub mod slot;

pub use codec::{decode, decode_for, encode};
pub use slot::SaveSlot;
