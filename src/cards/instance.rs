//! Units - in-play creature instances.
//!
//! A `Unit` is created when a basic card is committed to an empty
//! front-line slot. It tracks everything that changes during play: HP,
//! attached energy, cards carried underneath (earlier evolution stages) and
//! the current affliction.
//!
//! HP may go negative after a big hit; `is_fainted` reports any HP <= 0 and
//! the battle's faint cleanup removes such units before anything else can
//! target them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::card::{Card, Energy};
use super::element::{Element, EnergyMap};
use super::species::{Move, Species};
use crate::core::EntityId;

/// Status condition of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affliction {
    Asleep,
    Burned,
    Confused,
    Paralyzed,
    Poisoned,
}

/// An in-play creature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    id: EntityId,
    species: Arc<Species>,
    hp: i32,
    energy: EnergyMap,
    attached: Vec<Card>,
    affliction: Option<Affliction>,
    moved_last_turn: bool,
}

impl Unit {
    /// Build a unit at full HP with nothing attached.
    #[must_use]
    pub fn new(id: EntityId, species: Arc<Species>) -> Self {
        Self {
            id,
            hp: species.max_hp,
            species,
            energy: EnergyMap::new(),
            attached: Vec::new(),
            affliction: None,
            moved_last_turn: false,
        }
    }

    // === Identity ===

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn species(&self) -> &Arc<Species> {
        &self.species
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.species.name
    }

    #[must_use]
    pub fn element(&self) -> Element {
        self.species.element
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.species.moves
    }

    #[must_use]
    pub fn retreat_cost(&self) -> u32 {
        self.species.retreat_cost
    }

    // === HP ===

    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.species.max_hp
    }

    /// Absolute damage accumulated so far.
    #[must_use]
    pub fn damage_taken(&self) -> i32 {
        self.max_hp() - self.hp
    }

    /// Subtract damage. Returns `true` if the unit has fainted.
    ///
    /// Negative amounts are ignored; HP never rises above `max_hp`.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = self.hp.saturating_sub(amount.max(0));
        self.is_fainted()
    }

    #[must_use]
    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }

    // === Energy and attachments ===

    #[must_use]
    pub fn energy(&self) -> &EnergyMap {
        &self.energy
    }

    /// Attach one energy card.
    pub fn add_energy(&mut self, energy: Energy) {
        self.energy.add(energy.element, 1);
    }

    /// Attach a whole mapping of energy at once.
    pub fn add_energy_map(&mut self, energy: &EnergyMap) {
        self.energy.merge(energy);
    }

    /// Carried non-energy cards (earlier evolution stages).
    #[must_use]
    pub fn attached(&self) -> &[Card] {
        &self.attached
    }

    /// Carry a non-energy card. Energy cards go to the energy mapping.
    pub fn attach(&mut self, card: Card) {
        match card {
            Card::Energy(energy) => self.add_energy(energy),
            other => self.attached.push(other),
        }
    }

    pub fn attach_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.attach(card);
        }
    }

    /// Can the attached energy pay `cost`?
    #[must_use]
    pub fn sufficient_energy(&self, cost: &EnergyMap) -> bool {
        self.energy.covers(cost)
    }

    /// Can the move at `index` be paid for right now?
    #[must_use]
    pub fn can_use_move(&self, index: usize) -> bool {
        self.moves()
            .get(index)
            .is_some_and(|mv| self.sufficient_energy(&mv.cost))
    }

    /// Remove attached energy to pay `request`.
    ///
    /// Named elements are paid from their own element. The `Colorless`
    /// remainder is paid from the unit's own element first, then from the
    /// other elements in element order. `request` is left holding whatever
    /// could not be paid; the caller decides whether that is acceptable.
    pub fn discard_energy(&mut self, request: &mut EnergyMap) -> Vec<Card> {
        let mut paid = Vec::new();

        for element in Element::ALL {
            if element == Element::Colorless {
                continue;
            }
            let removed = self.energy.remove(element, request.get(element));
            request.remove(element, removed);
            paid.extend((0..removed).map(|_| Card::energy(element)));
        }

        let own = self.element();
        let order = std::iter::once(own).chain(Element::ALL.into_iter().filter(|e| *e != own));
        for element in order {
            let deficit = request.get(Element::Colorless);
            if deficit == 0 {
                break;
            }
            let removed = self.energy.remove(element, deficit);
            request.remove(Element::Colorless, removed);
            paid.extend((0..removed).map(|_| Card::energy(element)));
        }

        paid
    }

    /// Clear all attachments and energy and restore full HP.
    ///
    /// Returns the removed cards (carried cards first, then energy).
    pub fn detach(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.attached);
        for (element, count) in self.energy.iter() {
            cards.extend((0..count).map(|_| Card::energy(element)));
        }
        self.energy.clear();
        self.hp = self.max_hp();
        cards
    }

    /// Consume the unit, returning its own card and everything attached.
    #[must_use]
    pub fn into_cards(mut self) -> Vec<Card> {
        let mut cards = self.detach();
        cards.insert(0, Card::Pokemon(self.species));
        cards
    }

    /// Replace this unit with its evolution.
    ///
    /// The new form keeps the id, carries this unit's card and attachments,
    /// takes over all energy and keeps the absolute damage taken. Evolving
    /// clears afflictions.
    #[must_use]
    pub fn evolve(mut self, into: Arc<Species>) -> Unit {
        let damage = self.damage_taken();
        let energy = self.energy;
        let moved_last_turn = self.moved_last_turn;
        let mut carried = self.detach();
        carried.retain(|card| !card.is_energy());
        carried.push(Card::Pokemon(Arc::clone(&self.species)));

        let mut evolved = Unit::new(self.id, into);
        evolved.hp -= damage;
        evolved.energy = energy;
        evolved.attached = carried;
        evolved.moved_last_turn = moved_last_turn;
        evolved
    }

    // === Status ===

    #[must_use]
    pub fn affliction(&self) -> Option<Affliction> {
        self.affliction
    }

    pub fn afflict(&mut self, affliction: Affliction) {
        self.affliction = Some(affliction);
    }

    pub fn cure(&mut self) {
        self.affliction = None;
    }

    #[must_use]
    pub fn is(&self, affliction: Affliction) -> bool {
        self.affliction == Some(affliction)
    }

    /// Did this unit shift slots during its owner's previous turn?
    #[must_use]
    pub fn moved_last_turn(&self) -> bool {
        self.moved_last_turn
    }

    pub fn set_moved_last_turn(&mut self, moved: bool) {
        self.moved_last_turn = moved;
    }
}
