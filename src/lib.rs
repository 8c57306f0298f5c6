//! # pkmn-battle
//!
//! A deterministic rules engine for a two-player trading-card battle.
//!
//! Each player fields up to four units on a front line, powers them with
//! energy cards, and attacks the unit in the facing slot. Attacks may win
//! prize cards through a random defense roll; the first player to take
//! their last prize card wins.
//!
//! ## Design Principles
//!
//! 1. **No I/O in the core**: the engine never renders or polls. Every
//!    decision goes through a synchronous `ChoiceProvider`.
//!
//! 2. **Seeded randomness**: shuffles, coin flips and defense rolls all come
//!    from `GameRng`, so a battle is reproducible from its seed and the
//!    providers' answers.
//!
//! 3. **Configuration Over Convention**: rule variants are `RulesConfig`
//!    switches, and move effects are handlers registered by content hash.
//!
//! 4. **Persistent Data Structures**: card piles are `im` vectors, so a
//!    `BattleState` clones in O(1) for search and replays.
//!
//! ## Modules
//!
//! - `core`: entity ids, players, state, actions, RNG, configuration
//! - `cards`: elements, species, units, card database and validation
//! - `zones`: per-player piles and the front line
//! - `choice`: the decision seam and ready-made providers
//! - `effects`: move-effect handlers and their registry
//! - `rules`: legality, combat, turn flow and the match loop
//!
//! ## Example
//!
//! ```
//! use pkmn_battle::{BattleEngine, Card, Element, FirstCandidate, PlayerId, Species, StepOutcome};
//!
//! let engine = BattleEngine::standard();
//! let deck: Vec<Card> = (0..10).map(|_| Card::energy(Element::Water)).collect();
//! let mut state = engine.new_battle(deck.clone(), deck, 42);
//! state
//!     .board_mut(PlayerId::FIRST)
//!     .add_to_hand([Card::pokemon(Species::new("xy001goomy", "Goomy", 50, Element::Dragon))]);
//!
//! let outcome = pkmn_battle::step(&engine, &mut state, &mut FirstCandidate).unwrap();
//! assert!(matches!(outcome, StepOutcome::Committed(_)));
//! ```

pub mod cards;
pub mod choice;
pub mod core;
pub mod effects;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, BattleState, EntityId, GameRng, PlayerId, PlayerMap, PrizeRollDamage, RulesConfig,
    TurnPhase,
};

pub use crate::cards::{
    Affliction, Card, CardDataError, CardDatabase, DeckList, Element, EnergyMap, MoveId, Species, SpeciesId, Unit,
    ValidationReport,
};

pub use crate::zones::{FrontLine, PlayerBoard};

pub use crate::choice::{Choice, ChoiceProvider, ChoiceRequest, FirstCandidate, RandomChoice, ScriptedChoices};

pub use crate::effects::{EffectContext, EffectRegistry, MoveEffect};

pub use crate::rules::{
    run_match, step, AttackReport, BattleEngine, GameResult, Resolution, RuleViolation, StepOutcome, WinReason,
};
