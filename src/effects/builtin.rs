//! The standard move effects.
//!
//! Each effect is bound to the content hash of the text printed on its
//! move. `EffectRegistry::standard` registers all of them.

use super::effect::{EffectContext, MoveEffect};
use crate::cards::{Affliction, MoveId};

/// Switch one of the opponent's benched units with the defender; the new
/// defender falls asleep.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepInducer;

impl SleepInducer {
    pub const ID: &'static str = "11bb5ae003d091cb83c5";
}

impl MoveEffect for SleepInducer {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        let defending = ctx.defender_slot()?;
        if let Some(bench) =
            ctx.choose_opponent_bench("Choose one of the opponent's Pokemon to switch with the target.")
        {
            ctx.opponent.front_line.swap(defending, bench);
        }
        if let Some(unit) = ctx.opponent.front_line.get_mut(defending) {
            unit.afflict(Affliction::Asleep);
        }
        None
    }
}

/// Switch the attacker with one of its owner's benched units.
#[derive(Clone, Copy, Debug, Default)]
pub struct UTurn;

impl UTurn {
    pub const ID: &'static str = "2014ffee7384dd74c1f6";
}

impl MoveEffect for UTurn {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        let from = ctx.attacker_slot()?;
        let to = ctx.choose_own_bench("Choose another Pokemon to switch positions with.")?;
        ctx.user.front_line.swap(from, to);
        None
    }
}

/// The defender falls asleep.
#[derive(Clone, Copy, Debug, Default)]
pub struct IcyWind;

impl IcyWind {
    pub const ID: &'static str = "3ac392dc9a1025b9b48e";
}

impl MoveEffect for IcyWind {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        ctx.defender_unit()?.afflict(Affliction::Asleep);
        None
    }
}

/// All energy on the attacker goes back to hand; 100 damage to one of the
/// opponent's benched units.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplashArch;

impl SplashArch {
    pub const ID: &'static str = "3bcfbc62a3cbf37fee43";
    pub const BENCH_DAMAGE: i32 = 100;
}

impl MoveEffect for SplashArch {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        if let Some(attacker) = ctx.attacker_unit() {
            let mut all = *attacker.energy();
            let cards = attacker.discard_energy(&mut all);
            ctx.user.add_to_hand(cards);
        }
        bench_damage(ctx, Self::BENCH_DAMAGE, "Deal 100 damage to one of the opponent's Benched Pokemon.");
        None
    }
}

/// 30 damage to one of the opponent's benched units.
#[derive(Clone, Copy, Debug, Default)]
pub struct AquaLiner;

impl AquaLiner {
    pub const ID: &'static str = "3e339c732cca26981ab9";
    pub const BENCH_DAMAGE: i32 = 30;
}

impl MoveEffect for AquaLiner {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        bench_damage(ctx, Self::BENCH_DAMAGE, "Deal 30 damage to one of the opponent's Benched Pokemon.");
        None
    }
}

/// 30 more damage for each energy attached to the defender.
#[derive(Clone, Copy, Debug, Default)]
pub struct Psychic;

impl Psychic {
    pub const ID: &'static str = "7badaa956278e1accc4d";
    pub const PER_ENERGY: i32 = 30;
}

impl MoveEffect for Psychic {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        let base = ctx.damage;
        let energy = ctx.defender_unit()?.energy().total() as i32;
        Some(base + Self::PER_ENERGY * energy)
    }
}

/// 20 damage for each unit on the attacker's front line that knows
/// Let's All Rollout, the attacker included.
#[derive(Clone, Copy, Debug, Default)]
pub struct LetsAllRollout;

impl LetsAllRollout {
    pub const ID: &'static str = "7f1e706b121bbbf0aadb";
    pub const MOVE_NAME: &'static str = "Let's All Rollout";
    pub const PER_UNIT: i32 = 20;
}

impl MoveEffect for LetsAllRollout {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        let rollers = ctx
            .own_line()
            .units()
            .filter(|(_, unit)| unit.species().knows_move(Self::MOVE_NAME))
            .count() as i32;
        Some(Self::PER_UNIT * rollers)
    }
}

/// Flip a coin; heads paralyzes the defender.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodySlam;

impl BodySlam {
    pub const ID: &'static str = "80bb2a9da8285b74151c";
}

impl MoveEffect for BodySlam {
    fn resolve(&self, ctx: &mut EffectContext<'_>) -> Option<i32> {
        if ctx.rng.coin_flip() {
            ctx.defender_unit()?.afflict(Affliction::Paralyzed);
        }
        None
    }
}

/// Every standard effect with its identifier.
#[must_use]
pub fn standard_effects() -> Vec<(MoveId, Box<dyn MoveEffect>)> {
    vec![
        entry(SleepInducer::ID, SleepInducer),
        entry(UTurn::ID, UTurn),
        entry(IcyWind::ID, IcyWind),
        entry(SplashArch::ID, SplashArch),
        entry(AquaLiner::ID, AquaLiner),
        entry(Psychic::ID, Psychic),
        entry(LetsAllRollout::ID, LetsAllRollout),
        entry(BodySlam::ID, BodySlam),
    ]
}

fn entry(id: &str, effect: impl MoveEffect + 'static) -> (MoveId, Box<dyn MoveEffect>) {
    (MoveId::new(id), Box::new(effect))
}

/// Damage one of the defender's benched allies. No-op without a bench.
fn bench_damage(ctx: &mut EffectContext<'_>, amount: i32, help_text: &str) {
    let Some(slot) = ctx.choose_opponent_bench(help_text) else {
        return;
    };
    if let Some(unit) = ctx.opponent.front_line.get_mut(slot) {
        let fainted = unit.take_damage(amount);
        tracing::debug!(unit = %unit.id(), amount, fainted, "bench damage");
    }
}
