//! The battle engine.
//!
//! `BattleEngine` owns the rule switches and the move-effect registry and
//! drives a `BattleState`:
//!
//! - `legal_actions`: what the active player may do
//! - `apply_action`: validate and resolve one action
//! - `is_terminal`: the result, once decided
//!
//! ## Turn structure
//!
//! A turn is one committed action. Placing, evolving, attaching, waking,
//! shifting, retreating and attacking end the turn. Drawing ends it only
//! when `RulesConfig::draw_ends_turn` is set. An action that is not legal
//! right now is `Resolution::NotTaken` and changes nothing.
//!
//! At the end of a player's turn their paralyzed units recover, and the
//! unit that shifted (if any) is remembered so it cannot shift again on
//! that player's next turn.

use serde::{Deserialize, Serialize};

use super::combat::{faint_cleanup, resolve_attack, AttackReport};
use super::error::RuleViolation;
use super::legal::{self, retreat_targets, shift_targets};
use crate::cards::{Affliction, Card, EnergyMap, Placement, Unit};
use crate::choice::ChoiceProvider;
use crate::core::{Action, ActionRecord, BattleState, EntityId, PlayerId, RulesConfig, TurnPhase, FRONT_LINE_SLOTS};
use crate::effects::EffectRegistry;

/// Why a battle was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// The winner took their last prize card.
    PrizesTaken,
    /// The loser had to draw from an empty deck.
    DeckOut,
}

/// Result of a completed battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner { player: PlayerId, reason: WinReason },
    /// Both players finished their prizes on the same attack.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner { player: p, .. } if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner { player, .. } => Some(*player),
            GameResult::Draw => None,
        }
    }
}

/// What happened to an attempted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Not legal right now; nothing changed and the turn goes on.
    NotTaken,
    /// Resolved; the same player acts again.
    TurnContinues,
    /// Resolved; the turn has passed (or the battle is over).
    TurnEnded,
}

impl Resolution {
    #[must_use]
    pub fn is_taken(self) -> bool {
        self != Resolution::NotTaken
    }
}

/// Rules engine for two-player battles.
#[derive(Debug, Default)]
pub struct BattleEngine {
    config: RulesConfig,
    effects: EffectRegistry,
}

impl BattleEngine {
    #[must_use]
    pub fn new(config: RulesConfig, effects: EffectRegistry) -> Self {
        Self { config, effects }
    }

    /// Default rules with every standard move effect.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(RulesConfig::default(), EffectRegistry::standard())
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    /// Set up a battle between two decks.
    #[must_use]
    pub fn new_battle(&self, first: Vec<Card>, second: Vec<Card>, seed: u64) -> BattleState {
        BattleState::new(first, second, &self.config, seed)
    }

    /// Every legal action for the active player.
    #[must_use]
    pub fn legal_actions(&self, state: &BattleState) -> Vec<Action> {
        legal::legal_actions(state, state.active_player, &self.config)
    }

    /// The result, once the battle is decided.
    #[must_use]
    pub fn is_terminal<'s>(&self, state: &'s BattleState) -> Option<&'s GameResult> {
        state.result.as_ref()
    }

    /// Validate and resolve one action for the active player.
    ///
    /// Returns `Err` only for actions that reference cards, slots or moves
    /// that do not exist.
    pub fn apply_action(
        &self,
        state: &mut BattleState,
        action: &Action,
        choices: &mut dyn ChoiceProvider,
    ) -> Result<Resolution, RuleViolation> {
        if state.is_over() {
            return Ok(Resolution::NotTaken);
        }
        if let Some(slot) = action.slot() {
            check_slot(slot)?;
        }

        let player = state.active_player;
        state.phase = action.phase();
        let outcome = self.resolve(state, player, action, choices);
        state.phase = TurnPhase::AwaitingAction;
        let (resolution, report) = outcome?;

        if resolution == Resolution::NotTaken {
            return Ok(resolution);
        }

        let sequence = state.next_sequence();
        let mut record = ActionRecord::new(player, action.clone(), state.turn_number, sequence);
        if let Some(report) = report {
            record = record.with_attack(report);
        }
        state.record_action(record);
        tracing::debug!(%player, ?action, ?resolution, "action committed");

        if resolution == Resolution::TurnEnded {
            let shifted = match action {
                Action::Shift { to, .. } => state.unit(player, *to).map(Unit::id),
                _ => None,
            };
            end_turn(state, shifted);
        }
        if let Some(result) = &state.result {
            tracing::info!(?result, turn = state.turn_number, "battle over");
        }
        Ok(resolution)
    }

    /// Pass the turn without acting (the active player has no legal action).
    pub fn pass_turn(&self, state: &mut BattleState) {
        if !state.is_over() {
            tracing::debug!(player = %state.active_player, "turn passed");
            end_turn(state, None);
        }
    }

    fn resolve(
        &self,
        state: &mut BattleState,
        player: PlayerId,
        action: &Action,
        choices: &mut dyn ChoiceProvider,
    ) -> Result<(Resolution, Option<AttackReport>), RuleViolation> {
        let taken = |taken: bool| {
            if taken {
                Resolution::TurnEnded
            } else {
                Resolution::NotTaken
            }
        };

        let resolution = match *action {
            Action::PlaceBasic { hand_index, slot } => taken(place_basic(state, player, hand_index, slot)?),
            Action::Evolve { hand_index, slot } => taken(evolve(state, player, hand_index, slot)?),
            Action::AttachEnergy { hand_index, slot } => taken(attach_energy(state, player, hand_index, slot)?),
            Action::WakeUp { slot } => taken(self.wake_up(state, player, slot)?),
            Action::Shift { slot, to } => taken(shift(state, player, slot, to)?),
            Action::Retreat { slot, to } => taken(retreat(state, player, slot, to)?),
            Action::UseMove { slot, move_index } => {
                let line = &state.board(player).front_line;
                let unit = line.get(slot).ok_or(RuleViolation::EmptySlot { player, slot })?;
                if move_index >= unit.moves().len() {
                    return Err(RuleViolation::MoveOutOfRange { slot, index: move_index });
                }
                let opponent = &state.board(player.opponent()).front_line;
                if !legal::usable_moves(line, opponent, slot).contains(&move_index) || is_incapacitated(unit) {
                    return Ok((Resolution::NotTaken, None));
                }
                let report = resolve_attack(state, &self.effects, &self.config, slot, move_index, choices)?;
                check_prize_win(state, player);
                return Ok((Resolution::TurnEnded, Some(report)));
            }
            Action::Draw => self.draw(state, player),
        };
        Ok((resolution, None))
    }

    fn wake_up(&self, state: &mut BattleState, player: PlayerId, slot: usize) -> Result<bool, RuleViolation> {
        let chance = self.config.wake_up_chance;
        let BattleState { players, rng, .. } = &mut *state;
        let unit = players[player]
            .front_line
            .get_mut(slot)
            .ok_or(RuleViolation::EmptySlot { player, slot })?;
        if !unit.is(Affliction::Asleep) {
            return Ok(false);
        }
        let woke = rng.chance(chance);
        if woke {
            unit.cure();
        }
        tracing::debug!(%player, unit = %unit.id(), woke, "wake-up attempt");
        Ok(true)
    }

    fn draw(&self, state: &mut BattleState, player: PlayerId) -> Resolution {
        let board = state.board_mut(player);
        if board.draw_into_hand(1) == 0 {
            if !self.config.deck_out_loses {
                return Resolution::NotTaken;
            }
            tracing::info!(%player, "deck out");
            state.result = Some(GameResult::Winner {
                player: player.opponent(),
                reason: WinReason::DeckOut,
            });
            return Resolution::TurnEnded;
        }
        if self.config.draw_ends_turn {
            Resolution::TurnEnded
        } else {
            Resolution::TurnContinues
        }
    }
}

fn check_slot(slot: usize) -> Result<(), RuleViolation> {
    if slot < FRONT_LINE_SLOTS {
        Ok(())
    } else {
        Err(RuleViolation::SlotOutOfRange(slot))
    }
}

fn hand_card(state: &BattleState, player: PlayerId, index: usize) -> Result<&Card, RuleViolation> {
    state
        .board(player)
        .hand_card(index)
        .ok_or(RuleViolation::HandIndexOutOfRange { player, index })
}

/// Asleep and paralyzed units cannot shift, retreat or attack.
fn is_incapacitated(unit: &Unit) -> bool {
    unit.is(Affliction::Asleep) || unit.is(Affliction::Paralyzed)
}

fn acting_unit(state: &BattleState, player: PlayerId, slot: usize) -> Result<&Unit, RuleViolation> {
    state.unit(player, slot).ok_or(RuleViolation::EmptySlot { player, slot })
}

fn place_basic(state: &mut BattleState, player: PlayerId, hand_index: usize, slot: usize) -> Result<bool, RuleViolation> {
    let card = hand_card(state, player, hand_index)?;
    if card.placement() != Placement::Basic || state.unit(player, slot).is_some() {
        return Ok(false);
    }
    let Some(Card::Pokemon(species)) = state.board_mut(player).take_from_hand(hand_index) else {
        return Ok(false);
    };
    let id = state.alloc_entity();
    tracing::debug!(%player, unit = %id, name = %species.name, slot, "basic placed");
    state.board_mut(player).front_line.place(slot, Unit::new(id, species));
    Ok(true)
}

fn evolve(state: &mut BattleState, player: PlayerId, hand_index: usize, slot: usize) -> Result<bool, RuleViolation> {
    let card = hand_card(state, player, hand_index)?;
    let current = acting_unit(state, player, slot)?;
    match card.placement() {
        Placement::Evolved { from } if from == current.name() => {}
        _ => return Ok(false),
    }

    let board = state.board_mut(player);
    let Some(Card::Pokemon(species)) = board.take_from_hand(hand_index) else {
        return Ok(false);
    };
    let Some(unit) = board.front_line.take(slot) else {
        return Err(RuleViolation::EmptySlot { player, slot });
    };
    tracing::debug!(%player, unit = %unit.id(), from = unit.name(), into = %species.name, "evolved");
    board.front_line.place(slot, unit.evolve(species));
    // Carried damage can exceed a weaker form's HP.
    faint_cleanup(state);
    Ok(true)
}

fn attach_energy(
    state: &mut BattleState,
    player: PlayerId,
    hand_index: usize,
    slot: usize,
) -> Result<bool, RuleViolation> {
    let card = hand_card(state, player, hand_index)?;
    if !card.is_energy() || state.unit(player, slot).is_none() {
        return Ok(false);
    }
    let board = state.board_mut(player);
    let Some(card) = board.take_from_hand(hand_index) else {
        return Ok(false);
    };
    if let Some(unit) = board.front_line.get_mut(slot) {
        unit.attach(card);
    }
    Ok(true)
}

fn shift(state: &mut BattleState, player: PlayerId, slot: usize, to: usize) -> Result<bool, RuleViolation> {
    check_slot(to)?;
    let unit = acting_unit(state, player, slot)?;
    let line = &state.board(player).front_line;
    if is_incapacitated(unit) || !shift_targets(line, slot).contains(&to) {
        return Ok(false);
    }
    state.board_mut(player).front_line.swap(slot, to);
    Ok(true)
}

fn retreat(state: &mut BattleState, player: PlayerId, slot: usize, to: usize) -> Result<bool, RuleViolation> {
    check_slot(to)?;
    let unit = acting_unit(state, player, slot)?;
    let line = &state.board(player).front_line;
    if is_incapacitated(unit) || !retreat_targets(line, slot).contains(&to) {
        return Ok(false);
    }

    let board = state.board_mut(player);
    if let Some(unit) = board.front_line.get_mut(slot) {
        let mut cost = EnergyMap::colorless(unit.retreat_cost());
        let paid = unit.discard_energy(&mut cost);
        board.add_to_hand(paid);
    }
    board.front_line.swap(slot, to);
    Ok(true)
}

/// A player who has taken their last prize card wins.
fn check_prize_win(state: &mut BattleState, attacker: PlayerId) {
    let own_done = state.board(attacker).prizes_remaining() == 0;
    let other_done = state.board(attacker.opponent()).prizes_remaining() == 0;
    state.result = match (own_done, other_done) {
        (true, true) => Some(GameResult::Draw),
        (true, false) => Some(GameResult::Winner {
            player: attacker,
            reason: WinReason::PrizesTaken,
        }),
        (false, true) => Some(GameResult::Winner {
            player: attacker.opponent(),
            reason: WinReason::PrizesTaken,
        }),
        (false, false) => None,
    };
}

/// Close the active player's turn and hand over to the opponent.
fn end_turn(state: &mut BattleState, shifted: Option<EntityId>) {
    let player = state.active_player;
    for unit in state.board_mut(player).front_line.units_mut() {
        if unit.is(Affliction::Paralyzed) {
            unit.cure();
        }
        unit.set_moved_last_turn(Some(unit.id()) == shifted);
    }
    state.advance_turn();
}
