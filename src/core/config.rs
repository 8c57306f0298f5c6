//! Rules configuration.
//!
//! The reference rules are inconsistent on a couple of points (does drawing
//! end the turn, which damage value feeds the prize roll). Those are rule
//! switches here rather than hard-coded behaviour. Every field has a default,
//! so a JSON config only needs the keys it changes:
//!
//! ```
//! use pkmn_battle::core::{PrizeRollDamage, RulesConfig};
//!
//! let config = RulesConfig::from_json(r#"{ "draw_ends_turn": true }"#).unwrap();
//! assert!(config.draw_ends_turn);
//! assert_eq!(config.prize_roll_damage, PrizeRollDamage::Effective);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardDataError;

/// Number of slots on each player's front line.
pub const FRONT_LINE_SLOTS: usize = 4;

/// Which damage value is compared against the defense roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeRollDamage {
    /// Damage after move effects, before weakness/resistance.
    Raw,
    /// Damage actually dealt after weakness/resistance.
    #[default]
    Effective,
}

/// Battle rule switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Does the draw action end the player's turn?
    pub draw_ends_turn: bool,

    /// Input of the randomized prize roll.
    pub prize_roll_damage: PrizeRollDamage,

    /// Prize cards per player = deck size / divisor (rounded down).
    pub prize_divisor: usize,

    /// Cards drawn into each hand when the battle starts.
    pub opening_hand: usize,

    /// Probability that "wake up" clears sleep.
    pub wake_up_chance: f64,

    /// Drawing from an empty deck loses the match.
    pub deck_out_loses: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            draw_ends_turn: false,
            prize_roll_damage: PrizeRollDamage::Effective,
            prize_divisor: 10,
            opening_hand: 0,
            wake_up_chance: 0.5,
            deck_out_loses: true,
        }
    }
}

impl RulesConfig {
    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CardDataError> {
        serde_json::from_str(json).map_err(CardDataError::Config)
    }

    #[must_use]
    pub fn with_draw_ends_turn(mut self, ends: bool) -> Self {
        self.draw_ends_turn = ends;
        self
    }

    #[must_use]
    pub fn with_prize_roll_damage(mut self, input: PrizeRollDamage) -> Self {
        self.prize_roll_damage = input;
        self
    }

    #[must_use]
    pub fn with_prize_divisor(mut self, divisor: usize) -> Self {
        self.prize_divisor = divisor.max(1);
        self
    }

    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    #[must_use]
    pub fn with_wake_up_chance(mut self, chance: f64) -> Self {
        self.wake_up_chance = chance;
        self
    }

    #[must_use]
    pub fn with_deck_out_loses(mut self, loses: bool) -> Self {
        self.deck_out_loses = loses;
        self
    }

    /// Prize cards set aside for a deck of `deck_size` cards.
    #[must_use]
    pub fn prize_count(&self, deck_size: usize) -> usize {
        deck_size / self.prize_divisor.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert!(!config.draw_ends_turn);
        assert_eq!(config.prize_roll_damage, PrizeRollDamage::Effective);
        assert_eq!(config.prize_count(60), 6);
        assert_eq!(config.prize_count(19), 1);
        assert_eq!(config.prize_count(9), 0);
    }

    #[test]
    fn test_partial_json() {
        let config = RulesConfig::from_json(r#"{ "prize_roll_damage": "raw", "opening_hand": 5 }"#)
            .unwrap();
        assert_eq!(config.prize_roll_damage, PrizeRollDamage::Raw);
        assert_eq!(config.opening_hand, 5);
        assert_eq!(config.prize_divisor, 10);
    }

    #[test]
    fn test_bad_json() {
        assert!(RulesConfig::from_json("{ draw_ends_turn: yes }").is_err());
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::default()
            .with_draw_ends_turn(true)
            .with_prize_divisor(0)
            .with_wake_up_chance(1.0);

        assert!(config.draw_ends_turn);
        assert_eq!(config.prize_divisor, 1);
        assert_eq!(config.wake_up_chance, 1.0);
    }
}
