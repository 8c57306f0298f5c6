//! Core engine types: entities, players, state, actions, RNG, configuration.
//!
//! These are the building blocks every other module works with. Rule
//! variations are selected through `RulesConfig` rather than by changing
//! the engine.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, TurnPhase};
pub use config::{PrizeRollDamage, RulesConfig, FRONT_LINE_SLOTS};
pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::BattleState;
