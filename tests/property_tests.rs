//! Property tests for unit bookkeeping and battle invariants.

use std::sync::Arc;

use proptest::prelude::*;

use pkmn_battle::cards::{Energy, Move, Placement};
use pkmn_battle::{
    step, BattleEngine, Card, Element, EnergyMap, EntityId, FrontLine, PlayerId, RandomChoice, RulesConfig,
    Species, StepOutcome, Unit,
};

fn species(name: &str, hp: i32) -> Arc<Species> {
    Arc::new(
        Species::new("xy050prop", name, hp, Element::Water)
            .with_move(Move::new("Splash", 30).with_cost(Element::Water, 1).with_cost(Element::Colorless, 1))
            .with_retreat_cost(1),
    )
}

fn evolved(hp: i32) -> Arc<Species> {
    Arc::new(Species::new("xy051prop", "Evolved", hp, Element::Water).evolves_from("Base"))
}

fn energy_element() -> impl Strategy<Value = Element> {
    prop::sample::select(Element::ENERGY.to_vec())
}

fn energy_map(max_each: u32) -> impl Strategy<Value = EnergyMap> {
    prop::collection::vec((energy_element(), 0..=max_each), 0..6).prop_map(EnergyMap::from_pairs)
}

fn unit_with(energy: &EnergyMap) -> Unit {
    let mut unit = Unit::new(EntityId(1), species("Base", 100));
    unit.add_energy_map(energy);
    unit
}

proptest! {
    /// Test that fainting tracks HP and cleanup removes every fainted unit.
    #[test]
    fn prop_faint_follows_hp(hits in prop::collection::vec(0..80i32, 0..6), slot in 0..4usize) {
        let mut line = FrontLine::new();
        line.place(slot, Unit::new(EntityId(1), species("Base", 100)));

        if let Some(unit) = line.get_mut(slot) {
            for hit in &hits {
                let fainted = unit.take_damage(*hit);
                prop_assert_eq!(fainted, unit.hp() <= 0);
                prop_assert_eq!(unit.is_fainted(), unit.hp() <= 0);
            }
        }

        let expected_fainted = hits.iter().sum::<i32>() >= 100;
        let removed = line.take_fainted();
        prop_assert_eq!(removed.len(), usize::from(expected_fainted));
        prop_assert!(line.units().all(|(_, unit)| !unit.is_fainted()));
    }

    /// Test that paying a cost never takes more than was asked for.
    #[test]
    fn prop_discard_within_request(
        held in energy_map(4),
        named in energy_map(3),
        colorless in 0..4u32,
    ) {
        let mut request = named;
        request.add(Element::Colorless, colorless);
        let requested_total = request.total();
        let affordable = unit_with(&held).sufficient_energy(&request);

        let mut unit = unit_with(&held);
        let paid = unit.discard_energy(&mut request);

        prop_assert!(paid.len() as u32 <= requested_total);
        prop_assert_eq!(paid.len() as u32 + request.total(), requested_total);
        prop_assert_eq!(unit.energy().total() + paid.len() as u32, held.total());

        for element in Element::ENERGY {
            let taken = paid.iter().filter(|card| card.placement() == Placement::Energy(element)).count() as u32;
            prop_assert!(taken <= held.get(element));
            prop_assert!(taken <= named.get(element) + colorless);
        }

        if affordable {
            prop_assert!(request.is_empty());
        }
    }

    /// Test that evolution keeps absolute damage, energy and the old card.
    #[test]
    fn prop_evolution_carries_over(
        damage in 0..100i32,
        energy in energy_map(3),
        evolved_hp in (11..20i32).prop_map(|n| n * 10),
    ) {
        let mut unit = unit_with(&energy);
        unit.attach(Card::energy(Element::Water));
        unit.take_damage(damage);
        let before_energy = *unit.energy();
        let before_attached = unit.attached().len();

        let into = unit.evolve(evolved(evolved_hp));

        prop_assert_eq!(into.hp(), evolved_hp - damage);
        prop_assert_eq!(into.energy(), &before_energy);
        prop_assert_eq!(into.attached().len(), before_attached + 1);
        prop_assert!(into.attached().iter().any(|card| card.name() == "Base"));
        prop_assert_eq!(into.affliction(), None);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Test that no card is created or lost over a random battle.
    #[test]
    fn prop_cards_conserved(seed in any::<u64>()) {
        let deck = || -> Vec<Card> {
            let mut cards: Vec<Card> = (0..8).map(|_| Card::Pokemon(species("Base", 60))).collect();
            cards.extend((0..3).map(|_| Card::Pokemon(evolved(90))));
            cards.extend((0..9).map(|_| Card::energy(Element::Water)));
            cards.extend((0..4).map(|_| Card::Energy(Energy::new(Element::Fire))));
            cards
        };
        let engine = BattleEngine::new(RulesConfig::default().with_opening_hand(4), Default::default());
        let mut state = engine.new_battle(deck(), deck(), seed);
        let mut choices = RandomChoice::new(seed);

        for _ in 0..2_000 {
            match step(&engine, &mut state, &mut choices).unwrap() {
                StepOutcome::Finished => break,
                StepOutcome::NoActions => engine.pass_turn(&mut state),
                StepOutcome::Committed(_) | StepOutcome::Cancelled => {}
            }
            for player in PlayerId::both() {
                prop_assert_eq!(state.board(player).card_count(), 24);
            }
        }
    }
}
