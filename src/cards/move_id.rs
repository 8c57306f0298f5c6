//! Content-addressed move-effect identifiers.
//!
//! A move with special behaviour is bound to its resolver through a hash of
//! its descriptive text: keyed BLAKE2b (key `pkmn`) with a 10-byte digest,
//! rendered as 20 lowercase hex characters. Card data stores the hash next
//! to the text; the database validator recomputes and repairs it.

use blake2::digest::consts::U10;
use blake2::digest::Mac;
use blake2::Blake2bMac;
use serde::{Deserialize, Serialize};

const HASH_KEY: &[u8] = b"pkmn";

/// Identifier of a move's special effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(String);

impl MoveId {
    /// Wrap an already-computed identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Hash a move's descriptive text.
    ///
    /// ```
    /// use pkmn_battle::cards::MoveId;
    ///
    /// let id = MoveId::from_text("The Defending Pokemon is now Asleep.");
    /// assert_eq!(id.as_str().len(), 20);
    /// assert_eq!(id, MoveId::from_text("The Defending Pokemon is now Asleep."));
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        // A 4-byte key is always within BLAKE2b's 64-byte key limit.
        let mut mac = <Blake2bMac<U10> as Mac>::new_from_slice(HASH_KEY)
            .unwrap_or_else(|_| unreachable!("hash key fits BLAKE2b"));
        mac.update(text.as_bytes());
        Self(hex::encode(mac.finalize().into_bytes()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MoveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoveId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_shape() {
        let id = MoveId::from_text("Flip a coin.");
        assert_eq!(id.as_str().len(), 20);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_is_content_addressed() {
        assert_eq!(MoveId::from_text("a"), MoveId::from_text("a"));
        assert_ne!(MoveId::from_text("a"), MoveId::from_text("b"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = MoveId::new("3ac392dc9a1025b9b48e");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""3ac392dc9a1025b9b48e""#);
    }
}
