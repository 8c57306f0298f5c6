//! Physical cards that move between deck, hand, prizes, discard and play.

use std::sync::Arc;

use super::element::Element;
use super::species::Species;

/// An energy card. Immutable; only its element matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Energy {
    pub element: Element,
}

impl Energy {
    #[must_use]
    pub const fn new(element: Element) -> Self {
        Self { element }
    }
}

/// A card instance owned by a player.
///
/// Species data is shared: every copy of a card in a deck points at the
/// same `Species`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Card {
    Pokemon(Arc<Species>),
    Energy(Energy),
}

/// How a card may be played from hand.
///
/// Each variant carries only what its placement rule needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Onto an empty front-line slot.
    Basic,
    /// Onto a unit whose species name equals `from`.
    Evolved { from: &'a str },
    /// Attached to any unit.
    Energy(Element),
}

impl Card {
    /// Wrap a species as a card.
    pub fn pokemon(species: impl Into<Arc<Species>>) -> Self {
        Card::Pokemon(species.into())
    }

    /// An energy card of `element`.
    #[must_use]
    pub const fn energy(element: Element) -> Self {
        Card::Energy(Energy::new(element))
    }

    /// Placement class of this card.
    #[must_use]
    pub fn placement(&self) -> Placement<'_> {
        match self {
            Card::Pokemon(species) => match species.evolves_from.as_deref() {
                Some(from) => Placement::Evolved { from },
                None => Placement::Basic,
            },
            Card::Energy(energy) => Placement::Energy(energy.element),
        }
    }

    /// Name for logs and presentation.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Card::Pokemon(species) => &species.name,
            Card::Energy(energy) => energy.element.name(),
        }
    }

    #[must_use]
    pub fn species(&self) -> Option<&Arc<Species>> {
        match self {
            Card::Pokemon(species) => Some(species),
            Card::Energy(_) => None,
        }
    }

    #[must_use]
    pub fn is_energy(&self) -> bool {
        matches!(self, Card::Energy(_))
    }
}

impl From<Energy> for Card {
    fn from(energy: Energy) -> Self {
        Card::Energy(energy)
    }
}
