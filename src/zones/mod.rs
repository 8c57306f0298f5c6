//! Card locations: deck, hand, discard, prizes and the front line.
//!
//! ## Key Types
//!
//! - `FrontLine`: the four slots holding in-play units
//! - `PlayerBoard`: one player's piles plus their front line

pub mod board;
pub mod front_line;

pub use board::PlayerBoard;
pub use front_line::{FrontLine, Slots};
