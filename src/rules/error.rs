//! Contract violations.
//!
//! Illegal player intent is not an error: the engine answers it with
//! `Resolution::NotTaken`. A `RuleViolation` means the caller presented
//! an action that could never be legal, which is a bug in whatever built
//! the action.

use crate::core::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("slot {0} does not exist")]
    SlotOutOfRange(usize),

    #[error("{player} has no unit in slot {slot}")]
    EmptySlot { player: PlayerId, slot: usize },

    #[error("{player} has no card at hand index {index}")]
    HandIndexOutOfRange { player: PlayerId, index: usize },

    #[error("unit in slot {slot} has no move {index}")]
    MoveOutOfRange { slot: usize, index: usize },

    #[error("no unit faces slot {slot}")]
    NoDefender { slot: usize },
}
