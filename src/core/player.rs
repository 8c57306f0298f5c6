//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! A battle always has exactly two sides. `PlayerId::FIRST` moves first.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`. `pair_mut` splits the
//! borrow into "acting side" and "opposing side", which is how attacks
//! mutate both boards at once.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID from a 0-based index.
    ///
    /// Panics if `index` is not 0 or 1.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 2, "A battle has exactly two players");
        Self(index)
    }

    /// Get the raw player index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players in turn order.
    ///
    /// ```
    /// use pkmn_battle::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data with O(1) access.
///
/// ```
/// use pkmn_battle::core::{PlayerId, PlayerMap};
///
/// let mut prizes = PlayerMap::new(|_| 6);
/// prizes[PlayerId::SECOND] -= 1;
///
/// let (mine, theirs) = prizes.pair_mut(PlayerId::SECOND);
/// assert_eq!((*mine, *theirs), (5, 6));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a map from the first and second player's values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Borrow `player`'s data and the opponent's data mutably at once.
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let (first, second) = self.data.split_at_mut(1);
        if player == PlayerId::FIRST {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
