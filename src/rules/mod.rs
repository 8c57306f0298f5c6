//! Battle rules: legality, combat and turn flow.
//!
//! `BattleEngine` is the entry point. It enumerates legal actions,
//! resolves them against a `BattleState`, and reports the result once a
//! player has won. `step` and `run_match` drive it through a
//! `ChoiceProvider`.

pub mod combat;
pub mod engine;
pub mod error;
pub mod legal;
pub mod turn;

pub use combat::{faint_cleanup, resolve_attack, AttackReport};
pub use engine::{BattleEngine, GameResult, Resolution, WinReason};
pub use error::RuleViolation;
pub use legal::{legal_actions, placement_targets, retreat_targets, shift_targets, unit_commands, usable_moves, UnitCommand};
pub use turn::{run_match, step, StepOutcome};
