//! The seam between the engine and whoever makes decisions.
//!
//! The engine never renders anything and never polls for input. Whenever a
//! pick is needed (which card to play, which slot to target, which bench
//! unit an effect should hit) it builds a `ChoiceRequest` and calls a
//! `ChoiceProvider` synchronously. The provider answers with the index of a
//! candidate or `Choice::Cancel`.
//!
//! ## Contract
//!
//! - The engine asks one question at a time and never proceeds past a
//!   decision point without an answer.
//! - A pick outside the candidate list is treated as a cancel.
//! - Cancelling an action choice aborts the action without consuming the
//!   turn. Cancelling an effect's sub-choice falls back to the first
//!   candidate.
//!
//! Any `FnMut(&ChoiceRequest) -> Choice` closure is a provider:
//!
//! ```
//! use pkmn_battle::choice::{Choice, ChoiceProvider, ChoiceRequest, ChoiceKind};
//! use pkmn_battle::core::PlayerId;
//!
//! let mut last = |req: &ChoiceRequest| Choice::Pick(req.candidates.len() - 1);
//! let request = ChoiceRequest::slots(PlayerId::FIRST, ChoiceKind::TargetSlot, [0, 2]);
//! assert_eq!(last.choose(&request), Choice::Pick(1));
//! ```

pub mod providers;

pub use providers::{FirstCandidate, RandomChoice, ScriptedChoices};

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;

/// What a request is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// A hand card, a front-line unit, or drawing a card.
    ActionSource,
    /// What the selected unit should do.
    UnitCommand,
    /// A slot on the acting player's own front line.
    TargetSlot,
    /// One of the acting player's other units, for an effect.
    OwnBench,
    /// One of the opponent's units, for an effect.
    OpponentBench,
}

/// One selectable option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Candidate {
    /// The hand card at this index.
    HandCard(usize),
    /// The unit in this front-line slot.
    Unit(usize),
    /// Draw a card.
    Draw,
    WakeUp,
    Shift,
    Retreat,
    /// The move at this index of the selected unit.
    UseMove(usize),
    /// A front-line slot (own or opponent's, per the request kind).
    Slot(usize),
}

/// A question put to a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceRequest {
    /// The player being asked.
    pub player: PlayerId,
    pub kind: ChoiceKind,
    pub candidates: Vec<Candidate>,
    /// The card being played, if any.
    pub context: Option<Card>,
    /// Prompt for a human player.
    pub help_text: Option<String>,
}

impl ChoiceRequest {
    #[must_use]
    pub fn new(player: PlayerId, kind: ChoiceKind, candidates: Vec<Candidate>) -> Self {
        Self {
            player,
            kind,
            candidates,
            context: None,
            help_text: None,
        }
    }

    /// A request over front-line slots.
    pub fn slots(player: PlayerId, kind: ChoiceKind, slots: impl IntoIterator<Item = usize>) -> Self {
        Self::new(player, kind, slots.into_iter().map(Candidate::Slot).collect())
    }

    #[must_use]
    pub fn with_context(mut self, card: Card) -> Self {
        self.context = Some(card);
        self
    }

    #[must_use]
    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Resolve an answer to the picked candidate.
    #[must_use]
    pub fn resolve(&self, choice: Choice) -> Option<Candidate> {
        match choice {
            Choice::Pick(index) => self.candidates.get(index).copied(),
            Choice::Cancel => None,
        }
    }
}

/// A provider's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Index into `ChoiceRequest::candidates`.
    Pick(usize),
    Cancel,
}

/// Something that answers choice requests.
pub trait ChoiceProvider {
    fn choose(&mut self, request: &ChoiceRequest) -> Choice;
}

impl<F> ChoiceProvider for F
where
    F: FnMut(&ChoiceRequest) -> Choice,
{
    fn choose(&mut self, request: &ChoiceRequest) -> Choice {
        self(request)
    }
}

/// Ask only when there is something to choose between.
///
/// No candidates yields `None` without asking; a single candidate is taken
/// without asking; otherwise the provider decides.
pub fn ask(provider: &mut dyn ChoiceProvider, request: &ChoiceRequest) -> Option<Candidate> {
    match request.candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => request.resolve(provider.choose(request)),
    }
}
