//! Attack resolution.
//!
//! ## Order of an attack
//!
//! 1. The move's declared damage is the base.
//! 2. If the move has an effect with a registered resolver, it runs and
//!    may replace the damage. An unregistered effect is logged and skipped.
//! 3. The defender's weakness or resistance (never both) transforms the
//!    damage, which is then subtracted from the defender's HP.
//! 4. The defense roll: a value from {0, 10, ..., 90}; if it is below the
//!    configured damage input, the attacker takes a prize card.
//! 5. The move's cost is paid from the attacker's energy; the paid cards
//!    return to the attacker's hand.
//! 6. Faint cleanup runs for both players.
//!
//! Attacker and defender are tracked by id, so an effect that switches
//! units around does not redirect the damage or the cost.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::RuleViolation;
use crate::choice::ChoiceProvider;
use crate::core::{BattleState, EntityId, PrizeRollDamage, RulesConfig};
use crate::effects::{EffectContext, EffectRegistry};
use crate::zones::FrontLine;

/// Summary of one resolved attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub move_name: String,

    /// Declared damage of the move.
    pub base_damage: i32,

    /// Damage after the move's effect, before weakness/resistance.
    pub damage: i32,

    /// Damage subtracted from the defender's HP.
    pub effective_damage: i32,

    pub defense_roll: i32,
    pub prize_taken: bool,

    /// Units removed by faint cleanup, on either side.
    pub fainted: Vec<EntityId>,
}

/// Resolve an attack by the active player's unit in `slot`.
///
/// The caller has already checked that the move is affordable and that a
/// unit faces `slot`; violations of that contract are errors.
pub fn resolve_attack(
    state: &mut BattleState,
    effects: &EffectRegistry,
    config: &RulesConfig,
    slot: usize,
    move_index: usize,
    choices: &mut dyn ChoiceProvider,
) -> Result<AttackReport, RuleViolation> {
    let player = state.active_player;
    let BattleState { players, rng, .. } = &mut *state;
    let (user, opponent) = players.pair_mut(player);

    let attacker = user
        .front_line
        .get(slot)
        .ok_or(RuleViolation::EmptySlot { player, slot })?;
    let mv = attacker
        .moves()
        .get(move_index)
        .cloned()
        .ok_or(RuleViolation::MoveOutOfRange { slot, index: move_index })?;
    let attacker_id = attacker.id();
    let attacker_element = attacker.element();

    let defender_id = opponent
        .front_line
        .get(FrontLine::opposing(slot))
        .map(|unit| unit.id())
        .ok_or(RuleViolation::NoDefender { slot })?;

    let base_damage = mv.base_damage();
    let mut damage = base_damage;

    if let Some(effect_id) = &mv.effect {
        match effects.get(effect_id) {
            Some(effect) => {
                let mut ctx = EffectContext {
                    player,
                    user: &mut *user,
                    opponent: &mut *opponent,
                    attacker: attacker_id,
                    defender: defender_id,
                    damage: base_damage,
                    rng: &mut *rng,
                    choices,
                };
                if let Some(replaced) = effect.resolve(&mut ctx) {
                    damage = replaced;
                }
            }
            None => tracing::warn!(effect = %effect_id, move_name = %mv.name, "no resolver registered"),
        }
    }

    let mut effective_damage = 0;
    if let Some(defender) = opponent
        .front_line
        .position_of(defender_id)
        .and_then(|s| opponent.front_line.get_mut(s))
    {
        effective_damage = defender.species().incoming_damage(attacker_element, damage);
        defender.take_damage(effective_damage);
    }

    let roll_input = match config.prize_roll_damage {
        PrizeRollDamage::Raw => damage,
        PrizeRollDamage::Effective => effective_damage,
    };
    let defense_roll = rng.defense_roll();
    let prize_taken = defense_roll < roll_input && user.take_prize();
    if prize_taken {
        tracing::info!(%player, prizes_left = user.prizes_remaining(), "prize card taken");
    }

    if let Some(unit) = user
        .front_line
        .position_of(attacker_id)
        .and_then(|s| user.front_line.get_mut(s))
    {
        let mut cost = mv.cost;
        let paid = unit.discard_energy(&mut cost);
        user.add_to_hand(paid);
    }

    let fainted = faint_cleanup(state).into_vec();

    tracing::debug!(
        %player,
        attacker = %attacker_id,
        defender = %defender_id,
        move_name = %mv.name,
        damage,
        effective_damage,
        defense_roll,
        "attack resolved"
    );

    Ok(AttackReport {
        attacker: attacker_id,
        defender: defender_id,
        move_name: mv.name,
        base_damage,
        damage,
        effective_damage,
        defense_roll,
        prize_taken,
        fainted,
    })
}

/// Remove every fainted unit from both front lines.
///
/// Each fainted unit goes to its owner's discard pile together with
/// everything attached to it. Returns the removed ids.
pub fn faint_cleanup(state: &mut BattleState) -> SmallVec<[EntityId; 8]> {
    let mut removed = SmallVec::new();
    for (player, board) in state.players.iter_mut() {
        for unit in board.front_line.take_fainted() {
            tracing::debug!(%player, unit = %unit.id(), name = unit.name(), "unit fainted");
            removed.push(unit.id());
            board.add_to_discard(unit.into_cards());
        }
    }
    removed
}
