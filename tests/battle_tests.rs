//! Battle integration tests.
//!
//! These tests drive `BattleEngine` through its public API: unit rules,
//! turn flow, rule switches and the ways a battle ends.

use std::sync::Arc;

use pkmn_battle::cards::{DamageTransform, Energy, Modifier, Move, Operator};
use pkmn_battle::{
    run_match, Action, Affliction, BattleEngine, BattleState, Card, ChoiceProvider, EffectRegistry, Element,
    EnergyMap, EntityId, FirstCandidate, GameResult, PlayerId, PlayerMap, PrizeRollDamage, RandomChoice,
    Resolution, RulesConfig, Species, Unit, WinReason,
};

fn charmander() -> Arc<Species> {
    Arc::new(
        Species::new("xy010charmander", "Charmander", 50, Element::Fire)
            .with_move(Move::new("Ember", 30).with_cost(Element::Fire, 1))
            .with_retreat_cost(1),
    )
}

fn bulbasaur() -> Arc<Species> {
    Arc::new(
        Species::new("xy011bulbasaur", "Bulbasaur", 60, Element::Grass)
            .with_move(Move::new("Vine Whip", 20).with_cost(Element::Grass, 1).with_cost(Element::Colorless, 1))
            .with_weakness(Modifier::new(Element::Fire, DamageTransform::new(Operator::Multiply, 2)))
            .with_resistance(Modifier::new(Element::Fire, DamageTransform::new(Operator::Subtract, 20)))
            .with_retreat_cost(2),
    )
}

fn ivysaur() -> Arc<Species> {
    Arc::new(
        Species::new("xy012ivysaur", "Ivysaur", 90, Element::Grass)
            .with_move(Move::new("Razor Leaf", 60).with_cost(Element::Grass, 2))
            .with_retreat_cost(2)
            .evolves_from("Bulbasaur"),
    )
}

fn big_hitter() -> Arc<Species> {
    Arc::new(
        Species::new("xy013blaster", "Blaster", 120, Element::Water)
            .with_move(Move::new("Hydro Pump", 100).with_cost(Element::Water, 1)),
    )
}

fn energies(element: Element, count: usize) -> Vec<Card> {
    (0..count).map(|_| Card::energy(element)).collect()
}

/// Empty decks, three prize cards each.
fn empty_battle(config: &RulesConfig) -> BattleState {
    let mut state = BattleState::new(Vec::new(), Vec::new(), config, 17);
    for player in PlayerId::both() {
        state.board_mut(player).prizes = energies(Element::Water, 3).into_iter().collect();
    }
    state
}

// =============================================================================
// Unit Rules
// =============================================================================

/// Test that a fire move needs a fire energy.
#[test]
fn test_fire_move_needs_fire_energy() {
    let mut unit = Unit::new(EntityId(100), charmander());
    assert!(!unit.can_use_move(0));

    unit.attach(Card::energy(Element::Fire));
    assert!(unit.can_use_move(0));
}

/// Test that any energy pays a colorless cost.
#[test]
fn test_colorless_cost_accepts_any_element() {
    let cost = EnergyMap::colorless(2);

    let mut mixed = Unit::new(EntityId(100), charmander());
    mixed.add_energy(Energy::new(Element::Water));
    mixed.add_energy(Energy::new(Element::Fire));
    assert!(mixed.sufficient_energy(&cost));

    let mut single = Unit::new(EntityId(101), charmander());
    single.add_energy(Energy::new(Element::Water));
    assert!(!single.sufficient_energy(&cost));
}

/// Test that weakness doubles damage and blocks the resistance entry.
#[test]
fn test_weakness_wins_over_resistance() {
    assert_eq!(bulbasaur().incoming_damage(Element::Fire, 30), 60);
    assert_eq!(bulbasaur().incoming_damage(Element::Water, 30), 30);
}

/// Test that detaching a fresh unit leaves it bare at full HP.
#[test]
fn test_detach_fresh_unit() {
    let mut unit = Unit::new(EntityId(100), bulbasaur());
    unit.take_damage(20);

    let cards = unit.detach();

    assert!(cards.is_empty());
    assert!(unit.attached().is_empty());
    assert!(unit.energy().is_empty());
    assert_eq!(unit.hp(), unit.max_hp());
}

/// Test that evolving keeps energy, attachments and absolute damage.
#[test]
fn test_evolution_carries_state() {
    let mut unit = Unit::new(EntityId(100), bulbasaur());
    unit.attach(Card::energy(Element::Grass));
    unit.attach(Card::energy(Element::Water));
    unit.take_damage(40);

    let evolved = unit.evolve(ivysaur());

    assert_eq!(evolved.id(), EntityId(100));
    assert_eq!(evolved.hp(), 90 - 40);
    assert_eq!(evolved.energy().get(Element::Grass), 1);
    assert_eq!(evolved.energy().get(Element::Water), 1);
    assert!(evolved.attached().iter().any(|card| card.name() == "Bulbasaur"));
}

// =============================================================================
// Actions Through The Engine
// =============================================================================

/// Test that a retreat pays its cost into hand and swaps exactly two slots.
#[test]
fn test_retreat_swaps_and_pays_into_hand() {
    let engine = BattleEngine::standard();
    let mut state = empty_battle(engine.config());

    let mut retreating = Unit::new(EntityId(100), bulbasaur());
    retreating.add_energy(Energy::new(Element::Grass));
    retreating.add_energy(Energy::new(Element::Grass));
    retreating.add_energy(Energy::new(Element::Fire));
    let board = state.board_mut(PlayerId::FIRST);
    board.front_line.place(0, retreating);
    board.front_line.place(2, Unit::new(EntityId(101), charmander()));
    board.front_line.place(3, Unit::new(EntityId(102), charmander()));

    let resolution = engine
        .apply_action(&mut state, &Action::Retreat { slot: 0, to: 2 }, &mut FirstCandidate)
        .unwrap();

    assert_eq!(resolution, Resolution::TurnEnded);
    let board = state.board(PlayerId::FIRST);
    assert_eq!(board.front_line.get(0).map(Unit::id), Some(EntityId(101)));
    assert_eq!(board.front_line.get(2).map(Unit::id), Some(EntityId(100)));
    assert_eq!(board.front_line.get(3).map(Unit::id), Some(EntityId(102)));
    assert!(board.front_line.get(1).is_none());

    assert_eq!(board.hand.len(), 2);
    assert_eq!(board.front_line.get(2).unwrap().energy().total(), 1);
}

/// Test that retreating onto a unit with a higher retreat cost is refused.
#[test]
fn test_retreat_onto_costlier_unit_not_taken() {
    let engine = BattleEngine::standard();
    let mut state = empty_battle(engine.config());

    let mut retreating = Unit::new(EntityId(100), charmander());
    retreating.add_energy(Energy::new(Element::Fire));
    let board = state.board_mut(PlayerId::FIRST);
    board.front_line.place(0, retreating);
    board.front_line.place(1, Unit::new(EntityId(101), bulbasaur()));

    let resolution = engine
        .apply_action(&mut state, &Action::Retreat { slot: 0, to: 1 }, &mut FirstCandidate)
        .unwrap();

    assert_eq!(resolution, Resolution::NotTaken);
    assert_eq!(state.active_player, PlayerId::FIRST);
    assert_eq!(state.unit(PlayerId::FIRST, 0).unwrap().energy().total(), 1);
}

/// Test that an attack without a facing unit is not offered or taken.
#[test]
fn test_attack_needs_facing_unit() {
    let engine = BattleEngine::standard();
    let mut state = empty_battle(engine.config());

    let mut attacker = Unit::new(EntityId(100), charmander());
    attacker.add_energy(Energy::new(Element::Fire));
    state.board_mut(PlayerId::FIRST).front_line.place(0, attacker);
    state
        .board_mut(PlayerId::SECOND)
        .front_line
        .place(0, Unit::new(EntityId(200), bulbasaur()));

    let attack = Action::UseMove { slot: 0, move_index: 0 };
    assert!(!engine.legal_actions(&state).contains(&attack));
    assert_eq!(
        engine.apply_action(&mut state, &attack, &mut FirstCandidate),
        Ok(Resolution::NotTaken)
    );

    let defender = state.board_mut(PlayerId::SECOND).front_line.take(0).unwrap();
    state.board_mut(PlayerId::SECOND).front_line.place(3, defender);
    assert!(engine.legal_actions(&state).contains(&attack));
}

/// Test that an attack is recorded in history with its report.
#[test]
fn test_attack_recorded_with_report() {
    let engine = BattleEngine::standard();
    let mut state = empty_battle(engine.config());

    let mut attacker = Unit::new(EntityId(100), charmander());
    attacker.attach(Card::energy(Element::Fire));
    state.board_mut(PlayerId::FIRST).front_line.place(1, attacker);
    state
        .board_mut(PlayerId::SECOND)
        .front_line
        .place(2, Unit::new(EntityId(200), bulbasaur()));

    engine
        .apply_action(&mut state, &Action::UseMove { slot: 1, move_index: 0 }, &mut FirstCandidate)
        .unwrap();

    let record = state.history.back().unwrap();
    assert_eq!(record.player, PlayerId::FIRST);
    let report = record.attack.as_ref().unwrap();
    assert_eq!(report.attacker, EntityId(100));
    assert_eq!(report.defender, EntityId(200));
    assert_eq!(report.effective_damage, 60);
    assert!(report.fainted.contains(&EntityId(200)));
    assert_eq!(state.board(PlayerId::SECOND).discard.len(), 1);
    assert_eq!(state.board(PlayerId::FIRST).hand.len(), 1 + usize::from(report.prize_taken));
}

/// Test that a sleeping unit may only try to wake up, and that the try
/// ends the turn either way.
#[test]
fn test_sleeping_unit_only_wakes() {
    let config = RulesConfig::default().with_wake_up_chance(1.0);
    let engine = BattleEngine::new(config, EffectRegistry::standard());
    let mut state = empty_battle(engine.config());

    let mut sleeper = Unit::new(EntityId(100), charmander());
    sleeper.afflict(Affliction::Asleep);
    state.board_mut(PlayerId::FIRST).front_line.place(0, sleeper);

    let unit_actions: Vec<Action> = engine
        .legal_actions(&state)
        .into_iter()
        .filter(|action| action.slot().is_some())
        .collect();
    assert_eq!(unit_actions, vec![Action::WakeUp { slot: 0 }]);

    let resolution = engine
        .apply_action(&mut state, &Action::WakeUp { slot: 0 }, &mut FirstCandidate)
        .unwrap();
    assert_eq!(resolution, Resolution::TurnEnded);
    assert_eq!(state.unit(PlayerId::FIRST, 0).unwrap().affliction(), None);
}

// =============================================================================
// Turn Flow And Rule Switches
// =============================================================================

/// Test that prize cards and opening hands follow the config.
#[test]
fn test_setup_follows_config() {
    let config = RulesConfig::default().with_opening_hand(5).with_prize_divisor(5);
    let engine = BattleEngine::new(config, EffectRegistry::new());

    let state = engine.new_battle(energies(Element::Fire, 20), energies(Element::Water, 12), 1);

    let first = state.board(PlayerId::FIRST);
    assert_eq!(first.prizes_remaining(), 4);
    assert_eq!(first.hand.len(), 5);
    assert_eq!(first.deck.len(), 11);

    let second = state.board(PlayerId::SECOND);
    assert_eq!(second.prizes_remaining(), 2);
    assert_eq!(second.card_count(), 12);
}

/// Test that drawing keeps the turn unless configured otherwise.
#[test]
fn test_draw_turn_switch() {
    let keeps = BattleEngine::standard();
    let mut state = keeps.new_battle(energies(Element::Fire, 10), energies(Element::Fire, 10), 2);
    keeps.apply_action(&mut state, &Action::Draw, &mut FirstCandidate).unwrap();
    keeps.apply_action(&mut state, &Action::Draw, &mut FirstCandidate).unwrap();
    assert_eq!(state.active_player, PlayerId::FIRST);
    assert_eq!(state.board(PlayerId::FIRST).hand.len(), 2);

    let ends = BattleEngine::new(RulesConfig::default().with_draw_ends_turn(true), EffectRegistry::new());
    let mut state = ends.new_battle(energies(Element::Fire, 10), energies(Element::Fire, 10), 2);
    ends.apply_action(&mut state, &Action::Draw, &mut FirstCandidate).unwrap();
    assert_eq!(state.active_player, PlayerId::SECOND);
    assert_eq!(state.turn_number, 2);
}

/// Test that an empty deck is not a loss when deck-out is switched off.
#[test]
fn test_deck_out_switched_off() {
    let engine = BattleEngine::new(RulesConfig::default().with_deck_out_loses(false), EffectRegistry::new());
    let mut state = engine.new_battle(Vec::new(), Vec::new(), 3);

    assert!(!engine.legal_actions(&state).contains(&Action::Draw));
    assert_eq!(
        engine.apply_action(&mut state, &Action::Draw, &mut FirstCandidate),
        Ok(Resolution::NotTaken)
    );
    assert!(engine.is_terminal(&state).is_none());
}

/// Test that the drawing player loses on an empty deck.
#[test]
fn test_deck_out_loses() {
    let engine = BattleEngine::standard();
    let mut state = engine.new_battle(energies(Element::Fire, 1), Vec::new(), 3);

    engine.apply_action(&mut state, &Action::Draw, &mut FirstCandidate).unwrap();
    assert!(engine.is_terminal(&state).is_none());

    engine.apply_action(&mut state, &Action::Draw, &mut FirstCandidate).unwrap();
    assert_eq!(
        engine.is_terminal(&state),
        Some(&GameResult::Winner {
            player: PlayerId::SECOND,
            reason: WinReason::DeckOut
        })
    );
}

// =============================================================================
// Winning By Prizes
// =============================================================================

/// Test that taking the last prize card wins.
#[test]
fn test_last_prize_wins() {
    let engine = BattleEngine::standard();
    let mut state = empty_battle(engine.config());
    state.board_mut(PlayerId::FIRST).prizes = energies(Element::Water, 1).into_iter().collect();

    let mut attacker = Unit::new(EntityId(100), big_hitter());
    attacker.add_energy(Energy::new(Element::Water));
    state.board_mut(PlayerId::FIRST).front_line.place(0, attacker);
    state
        .board_mut(PlayerId::SECOND)
        .front_line
        .place(3, Unit::new(EntityId(200), big_hitter()));

    // 100 damage beats every defense roll.
    engine
        .apply_action(&mut state, &Action::UseMove { slot: 0, move_index: 0 }, &mut FirstCandidate)
        .unwrap();

    assert_eq!(
        state.result,
        Some(GameResult::Winner {
            player: PlayerId::FIRST,
            reason: WinReason::PrizesTaken
        })
    );
    assert_eq!(state.board(PlayerId::FIRST).hand.len(), 2);
    assert!(engine.legal_actions(&state).is_empty());
}

fn wall() -> Arc<Species> {
    Arc::new(
        Species::new("xy014wall", "Wall", 500, Element::Grass)
            .with_weakness(Modifier::new(Element::Fire, DamageTransform::new(Operator::Multiply, 3))),
    )
}

/// Test that the raw prize input ignores weakness.
#[test]
fn test_raw_prize_input() {
    let config = RulesConfig::default().with_prize_roll_damage(PrizeRollDamage::Raw);
    let engine = BattleEngine::new(config, EffectRegistry::new());

    for seed in 0..30 {
        let mut state = empty_battle(engine.config());
        state.rng = pkmn_battle::GameRng::new(seed);
        let mut attacker = Unit::new(EntityId(100), charmander());
        attacker.add_energy(Energy::new(Element::Fire));
        state.board_mut(PlayerId::FIRST).front_line.place(0, attacker);
        state
            .board_mut(PlayerId::SECOND)
            .front_line
            .place(3, Unit::new(EntityId(200), wall()));

        engine
            .apply_action(&mut state, &Action::UseMove { slot: 0, move_index: 0 }, &mut FirstCandidate)
            .unwrap();
        let report = state.history.back().and_then(|r| r.attack.clone()).unwrap();
        assert_eq!(report.prize_taken, report.defense_roll < 30);
    }
}

/// Test that a random match finishes and replays identically from its seed.
#[test]
fn test_random_match_is_reproducible() {
    fn deck() -> Vec<Card> {
        let mut cards: Vec<Card> = (0..6).map(|_| Card::Pokemon(charmander())).collect();
        cards.extend((0..4).map(|_| Card::Pokemon(bulbasaur())));
        cards.extend((0..2).map(|_| Card::Pokemon(ivysaur())));
        cards.extend(energies(Element::Fire, 10));
        cards.extend(energies(Element::Grass, 8));
        cards
    }

    let play = |seed: u64| {
        let engine = BattleEngine::new(RulesConfig::default().with_opening_hand(5), EffectRegistry::standard());
        let mut state = engine.new_battle(deck(), deck(), seed);
        let mut providers = PlayerMap::<Box<dyn ChoiceProvider>>::from_pair(
            Box::new(RandomChoice::new(seed)),
            Box::new(RandomChoice::new(seed + 1)),
        );
        let result = run_match(&engine, &mut state, &mut providers, 20_000).unwrap();
        (result, state.history.len(), state.turn_number)
    };

    let (result, actions, turns) = play(7);
    assert!(result.is_some());
    assert!(actions > 0);
    assert_eq!(play(7), (result, actions, turns));
}
