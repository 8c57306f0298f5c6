//! Battle actions.
//!
//! An `Action` is one fully-specified player intent: which card or unit,
//! and which front-line slot it targets. The engine enumerates legal
//! actions, and `apply_action` commits one of them.
//!
//! ```
//! use pkmn_battle::core::{Action, TurnPhase};
//!
//! let attack = Action::UseMove { slot: 0, move_index: 1 };
//! assert_eq!(attack.phase(), TurnPhase::UnitActing);
//! assert_eq!(Action::Draw.phase(), TurnPhase::Drawing);
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::rules::AttackReport;

/// A complete battle action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put a basic card from hand onto an empty front-line slot.
    PlaceBasic { hand_index: usize, slot: usize },
    /// Evolve the unit in `slot` with an evolution card from hand.
    Evolve { hand_index: usize, slot: usize },
    /// Attach an energy card from hand to the unit in `slot`.
    AttachEnergy { hand_index: usize, slot: usize },
    /// Try to wake a sleeping unit (coin flip).
    WakeUp { slot: usize },
    /// Move a unit to an empty slot.
    Shift { slot: usize, to: usize },
    /// Pay the retreat cost and swap positions with `to`.
    Retreat { slot: usize, to: usize },
    /// Attack the facing opponent unit with one of the unit's moves.
    UseMove { slot: usize, move_index: usize },
    /// Draw the top card of the deck.
    Draw,
}

/// What the state machine is doing for the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingAction,
    Placing,
    Evolving,
    Attaching,
    UnitActing,
    Drawing,
}

impl Action {
    /// The phase this action resolves in.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        match self {
            Action::PlaceBasic { .. } => TurnPhase::Placing,
            Action::Evolve { .. } => TurnPhase::Evolving,
            Action::AttachEnergy { .. } => TurnPhase::Attaching,
            Action::WakeUp { .. }
            | Action::Shift { .. }
            | Action::Retreat { .. }
            | Action::UseMove { .. } => TurnPhase::UnitActing,
            Action::Draw => TurnPhase::Drawing,
        }
    }

    /// The front-line slot the action is issued from or played onto.
    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        match *self {
            Action::PlaceBasic { slot, .. }
            | Action::Evolve { slot, .. }
            | Action::AttachEnergy { slot, .. }
            | Action::WakeUp { slot }
            | Action::Shift { slot, .. }
            | Action::Retreat { slot, .. }
            | Action::UseMove { slot, .. } => Some(slot),
            Action::Draw => None,
        }
    }
}

/// A committed action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Position in the battle-wide action sequence.
    pub sequence: u32,

    /// Combat summary when the action was an attack.
    pub attack: Option<AttackReport>,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
            attack: None,
        }
    }

    /// Attach an attack summary.
    #[must_use]
    pub fn with_attack(mut self, report: AttackReport) -> Self {
        self.attack = Some(report);
        self
    }
}
