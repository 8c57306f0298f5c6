//! Elements and energy accounting.
//!
//! ## Element
//!
//! Nine energy elements exist as energy cards. `Dragon` and `Colorless`
//! are species elements only; `Colorless` in a cost means "any energy".
//!
//! ## EnergyMap
//!
//! A fixed-key count per element. Every element always has an entry
//! (zero by default), so reading a count never creates one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Index;
use std::str::FromStr;

/// Card and energy element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Grass,
    Fire,
    Water,
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
    Fairy,
    Dragon,
    Colorless,
}

impl Element {
    /// Number of elements, including `Dragon` and `Colorless`.
    pub const COUNT: usize = 11;

    /// Every element in declaration order.
    pub const ALL: [Element; Element::COUNT] = [
        Element::Grass,
        Element::Fire,
        Element::Water,
        Element::Lightning,
        Element::Psychic,
        Element::Fighting,
        Element::Darkness,
        Element::Metal,
        Element::Fairy,
        Element::Dragon,
        Element::Colorless,
    ];

    /// The nine elements that exist as energy cards.
    pub const ENERGY: [Element; 9] = [
        Element::Grass,
        Element::Fire,
        Element::Water,
        Element::Lightning,
        Element::Psychic,
        Element::Fighting,
        Element::Darkness,
        Element::Metal,
        Element::Fairy,
    ];

    /// Is there an energy card of this element?
    #[must_use]
    pub const fn is_energy(self) -> bool {
        !matches!(self, Element::Dragon | Element::Colorless)
    }

    /// Lowercase name as used in card data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Element::Grass => "grass",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Lightning => "lightning",
            Element::Psychic => "psychic",
            Element::Fighting => "fighting",
            Element::Darkness => "darkness",
            Element::Metal => "metal",
            Element::Fairy => "fairy",
            Element::Dragon => "dragon",
            Element::Colorless => "colorless",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised element name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown element `{0}`")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownElement(s.to_string()))
    }
}

/// Count of energy per element.
///
/// Used both for energy attached to a unit and for costs, where the
/// `Colorless` entry is the generic portion payable by any element.
///
/// ```
/// use pkmn_battle::cards::{Element, EnergyMap};
///
/// let held = EnergyMap::from_pairs([(Element::Water, 1), (Element::Fire, 1)]);
/// assert!(held.covers(&EnergyMap::from_pairs([(Element::Colorless, 2)])));
/// assert!(!held.covers(&EnergyMap::from_pairs([(Element::Fire, 2)])));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Element, u32>", into = "BTreeMap<Element, u32>")]
pub struct EnergyMap {
    counts: [u32; Element::COUNT],
}

impl EnergyMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from (element, count) pairs. Repeated elements add up.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Element, u32)>) -> Self {
        let mut map = Self::new();
        for (element, count) in pairs {
            map.add(element, count);
        }
        map
    }

    /// A cost of `count` generic energy.
    #[must_use]
    pub fn colorless(count: u32) -> Self {
        Self::from_pairs([(Element::Colorless, count)])
    }

    #[must_use]
    pub fn get(&self, element: Element) -> u32 {
        self.counts[element.slot()]
    }

    pub fn set(&mut self, element: Element, count: u32) {
        self.counts[element.slot()] = count;
    }

    pub fn add(&mut self, element: Element, count: u32) {
        self.counts[element.slot()] += count;
    }

    /// Remove up to `count`; returns how many were actually removed.
    pub fn remove(&mut self, element: Element, count: u32) -> u32 {
        let slot = &mut self.counts[element.slot()];
        let removed = count.min(*slot);
        *slot -= removed;
        removed
    }

    /// Add every count of `other` into this map.
    pub fn merge(&mut self, other: &EnergyMap) {
        for element in Element::ALL {
            self.add(element, other.get(element));
        }
    }

    /// Sum over all elements.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn clear(&mut self) {
        self.counts = [0; Element::COUNT];
    }

    /// Non-zero entries in element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        Element::ALL
            .into_iter()
            .map(|e| (e, self.get(e)))
            .filter(|(_, n)| *n > 0)
    }

    /// Can this energy pay `cost`?
    ///
    /// Every named element of the cost must be held in full. Whatever is
    /// left over, of any element, counts towards the `Colorless` portion.
    #[must_use]
    pub fn covers(&self, cost: &EnergyMap) -> bool {
        let mut named = 0;
        for element in Element::ALL {
            if element == Element::Colorless {
                continue;
            }
            let needed = cost.get(element);
            if self.get(element) < needed {
                return false;
            }
            named += needed;
        }
        self.total() - named >= cost.get(Element::Colorless)
    }
}

impl Index<Element> for EnergyMap {
    type Output = u32;

    fn index(&self, element: Element) -> &u32 {
        &self.counts[element.slot()]
    }
}

impl From<BTreeMap<Element, u32>> for EnergyMap {
    fn from(map: BTreeMap<Element, u32>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<EnergyMap> for BTreeMap<Element, u32> {
    fn from(map: EnergyMap) -> Self {
        map.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_parse() {
        assert_eq!("fire".parse::<Element>(), Ok(Element::Fire));
        assert_eq!("colorless".parse::<Element>(), Ok(Element::Colorless));
        assert!("Fire".parse::<Element>().is_err());
        assert!("plasma".parse::<Element>().is_err());
    }

    #[test]
    fn test_element_is_energy() {
        assert_eq!(Element::ENERGY.len(), 9);
        assert!(Element::ENERGY.iter().all(|e| e.is_energy()));
        assert!(!Element::Dragon.is_energy());
        assert!(!Element::Colorless.is_energy());
    }

    #[test]
    fn test_reading_does_not_create_entries() {
        let map = EnergyMap::new();
        assert_eq!(map.get(Element::Psychic), 0);
        assert_eq!(map[Element::Metal], 0);
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_remove_saturates() {
        let mut map = EnergyMap::from_pairs([(Element::Grass, 2)]);
        assert_eq!(map.remove(Element::Grass, 5), 2);
        assert_eq!(map.get(Element::Grass), 0);
        assert_eq!(map.remove(Element::Fire, 1), 0);
    }

    #[test]
    fn test_covers_colorless() {
        let water_fire = EnergyMap::from_pairs([(Element::Water, 1), (Element::Fire, 1)]);
        let water = EnergyMap::from_pairs([(Element::Water, 1)]);
        let cost = EnergyMap::colorless(2);

        assert!(water_fire.covers(&cost));
        assert!(!water.covers(&cost));
    }

    #[test]
    fn test_covers_named_surplus_counts_for_colorless() {
        let held = EnergyMap::from_pairs([(Element::Fire, 3)]);
        let cost = EnergyMap::from_pairs([(Element::Fire, 2), (Element::Colorless, 1)]);
        assert!(held.covers(&cost));

        let cost = EnergyMap::from_pairs([(Element::Fire, 2), (Element::Colorless, 2)]);
        assert!(!held.covers(&cost));
    }

    #[test]
    fn test_covers_empty_cost() {
        assert!(EnergyMap::new().covers(&EnergyMap::new()));
    }

    #[test]
    fn test_serde_as_map() {
        let map = EnergyMap::from_pairs([(Element::Fire, 1), (Element::Colorless, 2)]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"fire":1,"colorless":2}"#);

        let back: EnergyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
