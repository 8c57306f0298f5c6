//! Unit identification.
//!
//! Every unit committed to a front line gets a unique `EntityId` from the
//! battle state. The id survives evolution and position switches, so an
//! attack can find "its" attacker and defender again after a move effect
//! has shuffled the front lines around.
//!
//! ```
//! use pkmn_battle::core::EntityId;
//!
//! let id = EntityId(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(format!("{}", id), "Unit(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for an in-play unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}
