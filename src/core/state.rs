//! Battle state.
//!
//! `BattleState` is everything needed to continue a battle: both players'
//! boards, whose turn it is, the action history, the result once decided
//! and the RNG. Piles and history are `im` persistent structures, so
//! cloning a state to inspect a hypothetical line of play is cheap.
//!
//! A state is created by `BattleEngine::new_battle` and only changed
//! through the engine.

use im::Vector;

use super::action::{ActionRecord, TurnPhase};
use super::config::RulesConfig;
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, Unit};
use crate::rules::GameResult;
use crate::zones::PlayerBoard;

/// Complete battle state.
#[derive(Clone, Debug)]
pub struct BattleState {
    /// Both players' piles and front lines.
    pub players: PlayerMap<PlayerBoard>,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// What the active player is doing.
    pub phase: TurnPhase,

    /// Set once the battle is decided.
    pub result: Option<GameResult>,

    /// Every committed action, oldest first.
    pub history: Vector<ActionRecord>,

    /// Deterministic RNG for coin flips and defense rolls.
    pub rng: GameRng,

    next_entity_id: u32,
    action_sequence: u32,
}

impl BattleState {
    /// Set up a battle from two decks.
    ///
    /// Each deck is shuffled with its own RNG stream, prize cards are set
    /// aside and the opening hands are drawn.
    #[must_use]
    pub fn new(first: Vec<Card>, second: Vec<Card>, config: &RulesConfig, seed: u64) -> Self {
        let rng = GameRng::new(seed);
        let mut decks = [first, second];

        let players = PlayerMap::new(|player| {
            let deck = std::mem::take(&mut decks[player.index()]);
            let prizes = config.prize_count(deck.len());
            let mut shuffler = rng.for_context(&format!("deck-{}", player.index()));
            let mut board = PlayerBoard::new(deck, prizes, &mut shuffler);
            board.draw_into_hand(config.opening_hand);
            board
        });

        Self {
            players,
            active_player: PlayerId::FIRST,
            turn_number: 1,
            phase: TurnPhase::AwaitingAction,
            result: None,
            history: Vector::new(),
            rng: rng.for_context("combat"),
            next_entity_id: 0,
            action_sequence: 0,
        }
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> &PlayerBoard {
        &self.players[player]
    }

    pub fn board_mut(&mut self, player: PlayerId) -> &mut PlayerBoard {
        &mut self.players[player]
    }

    /// The unit in `slot` of `player`'s front line.
    #[must_use]
    pub fn unit(&self, player: PlayerId, slot: usize) -> Option<&Unit> {
        self.players[player].front_line.get(slot)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Allocate a new unit id.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    /// Record an action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Hand the turn to the other player.
    pub fn advance_turn(&mut self) {
        self.active_player = self.active_player.opponent();
        self.turn_number += 1;
        self.phase = TurnPhase::AwaitingAction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Element;

    fn deck(n: usize) -> Vec<Card> {
        (0..n).map(|_| Card::energy(Element::Fire)).collect()
    }

    #[test]
    fn test_new_battle_setup() {
        let config = RulesConfig::default().with_opening_hand(3);
        let state = BattleState::new(deck(30), deck(20), &config, 42);

        assert_eq!(state.active_player, PlayerId::FIRST);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.board(PlayerId::FIRST).prizes_remaining(), 3);
        assert_eq!(state.board(PlayerId::SECOND).prizes_remaining(), 2);
        assert_eq!(state.board(PlayerId::FIRST).hand.len(), 3);
        assert_eq!(state.board(PlayerId::FIRST).deck.len(), 24);
        assert!(!state.is_over());
    }

    #[test]
    fn test_alloc_and_sequence() {
        let mut state = BattleState::new(deck(0), deck(0), &RulesConfig::default(), 1);
        assert_eq!(state.alloc_entity(), EntityId(0));
        assert_eq!(state.alloc_entity(), EntityId(1));
        assert_eq!(state.next_sequence(), 0);
        assert_eq!(state.next_sequence(), 1);
    }

    #[test]
    fn test_advance_turn() {
        let mut state = BattleState::new(deck(0), deck(0), &RulesConfig::default(), 1);
        state.phase = TurnPhase::Drawing;
        state.advance_turn();

        assert_eq!(state.active_player, PlayerId::SECOND);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.phase, TurnPhase::AwaitingAction);
    }
}
