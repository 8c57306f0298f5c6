//! Card system: species data, physical cards, units, database and decks.
//!
//! ## Key Types
//!
//! - `Element` / `EnergyMap`: element enum and fixed-key energy counts
//! - `Species` / `Move`: immutable card data
//! - `Card`: a physical card (creature or energy) with its `Placement` class
//! - `Unit`: an in-play creature with HP, energy, attachments, affliction
//! - `CardDatabase`: validated species lookup
//! - `DeckList`: species and energy counts that build a deck

pub mod card;
pub mod deck;
pub mod element;
pub mod error;
pub mod instance;
pub mod move_id;
pub mod registry;
pub mod species;
pub mod validate;

pub use card::{Card, Energy, Placement};
pub use deck::DeckList;
pub use element::{Element, EnergyMap, UnknownElement};
pub use error::CardDataError;
pub use instance::{Affliction, Unit};
pub use move_id::MoveId;
pub use registry::CardDatabase;
pub use species::{DamageTransform, Modifier, Move, Operator, Species, SpeciesId, TransformParseError};
pub use validate::{IssueKind, ModifierKind, ValidationIssue, ValidationReport};
