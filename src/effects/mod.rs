//! Move effects: special behaviour bound to moves by content hash.
//!
//! - `MoveEffect`: a resolver run between declaring a move and applying
//!   its damage
//! - `EffectContext`: the boards, RNG and choice provider a resolver sees
//! - `EffectRegistry`: the id-to-resolver mapping injected into the engine
//!
//! ## Design Philosophy
//!
//! Effects are content-addressed and independently testable. A registry is
//! plain data owned by whoever builds the engine, so tests can register
//! exactly the effects they exercise, or closures of their own.

mod builtin;
mod effect;
mod registry;
mod targeting;

pub use builtin::{
    standard_effects, AquaLiner, BodySlam, IcyWind, LetsAllRollout, Psychic, SleepInducer, SplashArch, UTurn,
};
pub use effect::{EffectContext, MoveEffect};
pub use registry::EffectRegistry;
pub use targeting::pick_slot;
