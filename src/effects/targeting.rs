//! Target selection for effect sub-choices.
//!
//! Effects that hit "one of the benched units" ask the attacking player
//! through the choice provider. These sub-choices have no way to back out
//! of an attack already declared, so a cancel falls back to the first
//! candidate.

use crate::choice::{ask, Candidate, ChoiceKind, ChoiceProvider, ChoiceRequest};
use crate::core::PlayerId;

/// Pick one slot out of `candidates`.
///
/// Returns `None` only when there are no candidates. Asks the provider
/// only when there is more than one.
pub fn pick_slot(
    choices: &mut dyn ChoiceProvider,
    player: PlayerId,
    kind: ChoiceKind,
    candidates: &[usize],
    help_text: &str,
) -> Option<usize> {
    let first = *candidates.first()?;
    let request = ChoiceRequest::slots(player, kind, candidates.iter().copied()).with_help(help_text);

    match ask(choices, &request) {
        Some(Candidate::Slot(slot)) => Some(slot),
        _ => Some(first),
    }
}
