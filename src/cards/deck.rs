//! Deck lists.
//!
//! A deck list groups species ids and energy elements with counts. Building
//! it against a `CardDatabase` produces one independent card per copy.
//!
//! ```
//! use pkmn_battle::cards::{CardDatabase, DeckList, Element, Species};
//!
//! let mut db = CardDatabase::new();
//! db.insert(Species::new("xy001goomy", "Goomy", 50, Element::Dragon));
//!
//! let list = DeckList::new().with_pokemon("xy001goomy", 4).with_energy(Element::Water, 6);
//! let deck = list.build(&db).unwrap();
//! assert_eq!(deck.len(), 10);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::card::Card;
use super::element::Element;
use super::error::CardDataError;
use super::registry::CardDatabase;

/// Species and energy counts making up a deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    /// Species id to number of copies.
    #[serde(default)]
    pub pokemon: BTreeMap<String, u32>,

    /// Energy element to number of cards.
    #[serde(default)]
    pub energy: BTreeMap<Element, u32>,
}

impl DeckList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a deck list from JSON.
    pub fn from_json(json: &str) -> Result<Self, CardDataError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_pokemon(mut self, id: impl Into<String>, count: u32) -> Self {
        *self.pokemon.entry(id.into()).or_insert(0) += count;
        self
    }

    #[must_use]
    pub fn with_energy(mut self, element: Element, count: u32) -> Self {
        *self.energy.entry(element).or_insert(0) += count;
        self
    }

    /// Number of cards the list builds.
    #[must_use]
    pub fn size(&self) -> usize {
        self.pokemon.values().chain(self.energy.values()).map(|n| *n as usize).sum()
    }

    /// Instantiate the deck: species cards in id order, then energy.
    pub fn build(&self, db: &CardDatabase) -> Result<Vec<Card>, CardDataError> {
        let mut cards = Vec::with_capacity(self.size());

        for (id, count) in &self.pokemon {
            let species = db
                .get_str(id)
                .ok_or_else(|| CardDataError::UnknownSpecies(id.clone()))?;
            cards.extend((0..*count).map(|_| Card::Pokemon(Arc::clone(species))));
        }

        for (element, count) in &self.energy {
            if !element.is_energy() {
                return Err(CardDataError::NotAnEnergy(*element));
            }
            cards.extend((0..*count).map(|_| Card::energy(*element)));
        }

        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Species;

    fn db() -> CardDatabase {
        let mut db = CardDatabase::new();
        db.insert(Species::new("xy001goomy", "Goomy", 50, Element::Dragon));
        db
    }

    #[test]
    fn test_from_json_and_build() {
        let list = DeckList::from_json(r#"{ "pokemon": { "xy001goomy": 2 }, "energy": { "fire": 3 } }"#).unwrap();
        assert_eq!(list.size(), 5);

        let deck = list.build(&db()).unwrap();
        assert_eq!(deck.iter().filter(|c| c.is_energy()).count(), 3);
        assert_eq!(deck[0].name(), "Goomy");
    }

    #[test]
    fn test_unknown_species() {
        let list = DeckList::new().with_pokemon("xy999missing", 1);
        assert!(matches!(list.build(&db()), Err(CardDataError::UnknownSpecies(id)) if id == "xy999missing"));
    }

    #[test]
    fn test_energy_must_exist() {
        let list = DeckList::new().with_energy(Element::Dragon, 1);
        assert!(matches!(list.build(&db()), Err(CardDataError::NotAnEnergy(Element::Dragon))));
    }
}
