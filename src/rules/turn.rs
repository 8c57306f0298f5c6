//! Staged decision flow and the match loop.
//!
//! `step` walks the active player through one decision the way a player
//! at the table would make it:
//!
//! 1. pick a source: a hand card, a front-line unit, or the deck (draw)
//! 2. for a unit, pick a command: wake up, shift, retreat, or a move
//! 3. pick a target slot, when the action needs one
//!
//! Each stage only offers candidates that lead to at least one legal
//! action, and a stage with a single candidate is not asked. A cancel at
//! any stage abandons the attempt without touching the state.

use super::engine::{BattleEngine, GameResult, Resolution};
use super::error::RuleViolation;
use crate::choice::{ask, Candidate, ChoiceKind, ChoiceProvider, ChoiceRequest};
use crate::core::{Action, BattleState, PlayerMap};

/// What one call to `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An action was resolved.
    Committed(Resolution),
    /// The provider backed out; the same player decides again.
    Cancelled,
    /// The active player has no legal action.
    NoActions,
    /// The battle is already decided.
    Finished,
}

fn source_of(action: &Action) -> Candidate {
    match *action {
        Action::PlaceBasic { hand_index, .. }
        | Action::Evolve { hand_index, .. }
        | Action::AttachEnergy { hand_index, .. } => Candidate::HandCard(hand_index),
        Action::WakeUp { slot }
        | Action::Shift { slot, .. }
        | Action::Retreat { slot, .. }
        | Action::UseMove { slot, .. } => Candidate::Unit(slot),
        Action::Draw => Candidate::Draw,
    }
}

fn command_of(action: &Action) -> Option<Candidate> {
    match *action {
        Action::WakeUp { .. } => Some(Candidate::WakeUp),
        Action::Shift { .. } => Some(Candidate::Shift),
        Action::Retreat { .. } => Some(Candidate::Retreat),
        Action::UseMove { move_index, .. } => Some(Candidate::UseMove(move_index)),
        _ => None,
    }
}

fn target_of(action: &Action) -> Option<usize> {
    match *action {
        Action::PlaceBasic { slot, .. } | Action::Evolve { slot, .. } | Action::AttachEnergy { slot, .. } => {
            Some(slot)
        }
        Action::Shift { to, .. } | Action::Retreat { to, .. } => Some(to),
        _ => None,
    }
}

/// Candidates in first-seen order, without repeats.
fn distinct(items: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Run one decision attempt for the active player.
pub fn step(
    engine: &BattleEngine,
    state: &mut BattleState,
    choices: &mut dyn ChoiceProvider,
) -> Result<StepOutcome, RuleViolation> {
    if state.is_over() {
        return Ok(StepOutcome::Finished);
    }
    let mut pending = engine.legal_actions(state);
    if pending.is_empty() {
        return Ok(StepOutcome::NoActions);
    }
    let player = state.active_player;

    let request = ChoiceRequest::new(player, ChoiceKind::ActionSource, distinct(pending.iter().map(source_of)))
        .with_help("Play a card, command a unit, or draw");
    let Some(source) = ask(&mut *choices, &request) else {
        return Ok(StepOutcome::Cancelled);
    };
    pending.retain(|action| source_of(action) == source);

    let mut command = None;
    if let Candidate::Unit(_) = source {
        let request = ChoiceRequest::new(player, ChoiceKind::UnitCommand, distinct(pending.iter().filter_map(command_of)));
        let Some(picked) = ask(&mut *choices, &request) else {
            return Ok(StepOutcome::Cancelled);
        };
        pending.retain(|action| command_of(action) == Some(picked));
        command = Some(picked);
    }

    let targets = distinct(pending.iter().filter_map(target_of).map(Candidate::Slot));
    if !targets.is_empty() {
        let mut request = ChoiceRequest::new(player, ChoiceKind::TargetSlot, targets);
        request = match (source, command) {
            (Candidate::HandCard(index), _) => match state.board(player).hand_card(index) {
                Some(card) => request
                    .with_help(format!("Choose a slot for {}", card.name()))
                    .with_context(card.clone()),
                None => request,
            },
            (_, Some(Candidate::Retreat)) => request.with_help("Choose a slot to retreat to"),
            _ => request.with_help("Choose an empty slot to move to"),
        };
        let Some(Candidate::Slot(slot)) = ask(&mut *choices, &request) else {
            return Ok(StepOutcome::Cancelled);
        };
        pending.retain(|action| target_of(action) == Some(slot));
    }

    let Some(action) = pending.into_iter().next() else {
        return Ok(StepOutcome::Cancelled);
    };
    let resolution = engine.apply_action(state, &action, choices)?;
    Ok(StepOutcome::Committed(resolution))
}

/// Play until the battle is decided or `max_steps` decision attempts
/// have been made. A player with no legal action passes.
pub fn run_match<'p>(
    engine: &BattleEngine,
    state: &mut BattleState,
    providers: &mut PlayerMap<Box<dyn ChoiceProvider + 'p>>,
    max_steps: usize,
) -> Result<Option<GameResult>, RuleViolation> {
    for _ in 0..max_steps {
        let provider = providers.get_mut(state.active_player);
        match step(engine, state, &mut **provider)? {
            StepOutcome::Finished => break,
            StepOutcome::NoActions => engine.pass_turn(state),
            StepOutcome::Committed(_) | StepOutcome::Cancelled => {}
        }
    }
    if state.result.is_none() {
        tracing::debug!(turn = state.turn_number, "step budget exhausted");
    }
    Ok(state.result.clone())
}
