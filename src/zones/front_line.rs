//! The four-slot front line.
//!
//! Each player has exactly `FRONT_LINE_SLOTS` slots, each empty or holding
//! one `Unit`. Slot `s` faces the opponent's slot `3 - s`: a unit attacks
//! whatever stands opposite it.

use smallvec::SmallVec;

use crate::cards::Unit;
use crate::core::{EntityId, FRONT_LINE_SLOTS};

/// Slot indices; never more than four.
pub type Slots = SmallVec<[usize; FRONT_LINE_SLOTS]>;

/// A player's playable area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontLine {
    slots: [Option<Unit>; FRONT_LINE_SLOTS],
}

impl FrontLine {
    /// Create an empty front line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The opponent's slot facing `slot`.
    #[must_use]
    pub const fn opposing(slot: usize) -> usize {
        FRONT_LINE_SLOTS - 1 - slot
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Unit> {
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Unit> {
        self.slots.get_mut(slot)?.as_mut()
    }

    #[must_use]
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Put a unit into `slot`, returning the previous occupant.
    ///
    /// Panics if `slot` is out of range.
    pub fn place(&mut self, slot: usize, unit: Unit) -> Option<Unit> {
        self.slots[slot].replace(unit)
    }

    /// Remove and return the occupant of `slot`.
    pub fn take(&mut self, slot: usize) -> Option<Unit> {
        self.slots.get_mut(slot)?.take()
    }

    /// Exchange the contents of two slots. Either may be empty.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    #[must_use]
    pub fn empty_slots(&self) -> Slots {
        (0..FRONT_LINE_SLOTS).filter(|s| !self.is_occupied(*s)).collect()
    }

    #[must_use]
    pub fn occupied_slots(&self) -> Slots {
        (0..FRONT_LINE_SLOTS).filter(|s| self.is_occupied(*s)).collect()
    }

    /// Every occupied slot other than `slot`.
    #[must_use]
    pub fn bench_of(&self, slot: usize) -> Slots {
        (0..FRONT_LINE_SLOTS)
            .filter(|s| *s != slot && self.is_occupied(*s))
            .collect()
    }

    /// Current slot of the unit with `id`.
    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|u| u.id() == id))
    }

    /// Occupants with their slots.
    pub fn units(&self) -> impl Iterator<Item = (usize, &Unit)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|u| (i, u)))
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.slots.iter_mut().flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Remove every fainted unit.
    pub fn take_fainted(&mut self) -> SmallVec<[Unit; FRONT_LINE_SLOTS]> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.as_ref().is_some_and(Unit::is_fainted))
            .filter_map(Option::take)
            .collect()
    }
}
