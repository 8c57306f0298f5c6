//! A player's card piles and front line.
//!
//! Piles are persistent `im::Vector`s so that a whole battle state clones
//! cheaply. The deck's top card is index 0.

use im::Vector;

use super::front_line::FrontLine;
use crate::cards::Card;
use crate::core::GameRng;

/// Everything one player owns during a battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerBoard {
    pub deck: Vector<Card>,
    pub hand: Vector<Card>,
    pub discard: Vector<Card>,
    pub prizes: Vector<Card>,
    pub front_line: FrontLine,
}

impl PlayerBoard {
    /// Shuffle `deck` and set `prize_count` cards aside as prizes.
    pub fn new(deck: impl IntoIterator<Item = Card>, prize_count: usize, rng: &mut GameRng) -> Self {
        let mut board = Self {
            deck: deck.into_iter().collect(),
            ..Self::default()
        };
        board.shuffle(rng);
        let prizes = board.draw(prize_count);
        board.prizes = prizes.into_iter().collect();
        board
    }

    /// Remove and return up to `n` cards from the top of the deck.
    ///
    /// Returns fewer cards when the deck runs short; running out is a rule
    /// question for the battle engine, not an error here.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.deck.len());
        let rest = self.deck.split_off(n);
        let drawn = std::mem::replace(&mut self.deck, rest);
        drawn.into_iter().collect()
    }

    /// Draw up to `n` cards into the hand. Returns how many were drawn.
    pub fn draw_into_hand(&mut self, n: usize) -> usize {
        let drawn = self.draw(n);
        let count = drawn.len();
        self.hand.extend(drawn);
        count
    }

    /// Uniformly permute the deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.deck.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }

    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Remove the card at `index` from the hand.
    pub fn take_from_hand(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    pub fn add_to_hand(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    pub fn add_to_discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Move the top prize card into the hand.
    ///
    /// Returns `false` when no prizes remain.
    pub fn take_prize(&mut self) -> bool {
        match self.prizes.pop_front() {
            Some(card) => {
                self.hand.push_back(card);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn prizes_remaining(&self) -> usize {
        self.prizes.len()
    }

    /// Total cards owned, wherever they are.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let in_play: usize = self
            .front_line
            .units()
            .map(|(_, unit)| 1 + unit.attached().len() + unit.energy().total() as usize)
            .sum();
        self.deck.len() + self.hand.len() + self.discard.len() + self.prizes.len() + in_play
    }
}
