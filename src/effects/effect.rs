//! Move effects and the context they resolve in.
//!
//! A `MoveEffect` runs after a move is declared and before its damage is
//! applied. It sees both players' boards, the battle RNG and the acting
//! player's choice provider. It may:
//!
//! - return a replacement damage value (`Some`), or keep the move's base
//!   damage (`None`)
//! - move units around, inflict afflictions, or damage other units
//!
//! Units are addressed by `EntityId`, not by slot: an effect that switches
//! positions does not lose track of the attacker or the defender.

use super::targeting::pick_slot;
use crate::cards::Unit;
use crate::choice::{ChoiceKind, ChoiceProvider};
use crate::core::{EntityId, GameRng, PlayerId};
use crate::zones::{FrontLine, PlayerBoard};

/// A move's special behaviour.
pub trait MoveEffect: Send + Sync {
    /// Run the effect. Returns a replacement for the base damage, if any.
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32>;
}

impl<F> MoveEffect for F
where
    F: Fn(&mut EffectContext<'_>) -> Option<i32> + Send + Sync,
{
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        self(ctx)
    }
}

/// Everything an effect may read or change.
pub struct EffectContext<'a> {
    /// The attacking player.
    pub player: PlayerId,
    pub user: &'a mut PlayerBoard,
    pub opponent: &'a mut PlayerBoard,
    pub attacker: EntityId,
    pub defender: EntityId,
    /// The move's declared damage.
    pub damage: i32,
    pub rng: &'a mut GameRng,
    /// The attacking player's provider.
    pub choices: &'a mut dyn ChoiceProvider,
}

impl<'a> EffectContext<'a> {
    #[must_use]
    pub fn attacker_slot(&self) -> Option<usize> {
        self.user.front_line.position_of(self.attacker)
    }

    #[must_use]
    pub fn defender_slot(&self) -> Option<usize> {
        self.opponent.front_line.position_of(self.defender)
    }

    pub fn attacker_unit(&mut self) -> Option<&mut Unit> {
        let slot = self.attacker_slot()?;
        self.user.front_line.get_mut(slot)
    }

    pub fn defender_unit(&mut self) -> Option<&mut Unit> {
        let slot = self.defender_slot()?;
        self.opponent.front_line.get_mut(slot)
    }

    /// Let the attacking player pick one of their own other units.
    pub fn choose_own_bench(&mut self, help_text: &str) -> Option<usize> {
        let slot = self.attacker_slot()?;
        let bench = self.user.front_line.bench_of(slot);
        pick_slot(&mut *self.choices, self.player, ChoiceKind::OwnBench, &bench, help_text)
    }

    /// Let the attacking player pick one of the defender's benched allies.
    pub fn choose_opponent_bench(&mut self, help_text: &str) -> Option<usize> {
        let slot = self.defender_slot()?;
        let bench = self.opponent.front_line.bench_of(slot);
        pick_slot(&mut *self.choices, self.player, ChoiceKind::OpponentBench, &bench, help_text)
    }

    /// Every unit on the attacking player's front line.
    #[must_use]
    pub fn own_line(&self) -> &FrontLine {
        &self.user.front_line
    }
}
