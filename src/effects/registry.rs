//! Move-effect registry.
//!
//! Maps a `MoveId` to its resolver. The registry is built once and handed
//! to the battle engine; nothing is registered through global state.

use rustc_hash::FxHashMap;
use std::fmt;

use super::builtin::standard_effects;
use super::effect::MoveEffect;
use crate::cards::MoveId;

/// Registered move effects, keyed by effect id.
///
/// ```
/// use pkmn_battle::cards::MoveId;
/// use pkmn_battle::effects::EffectRegistry;
///
/// let registry = EffectRegistry::standard();
/// assert!(registry.contains(&MoveId::new("3ac392dc9a1025b9b48e")));
/// assert!(!registry.contains(&MoveId::from_text("Nothing happens.")));
/// ```
#[derive(Default)]
pub struct EffectRegistry {
    effects: FxHashMap<MoveId, Box<dyn MoveEffect>>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every standard effect.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (id, effect) in standard_effects() {
            registry.effects.insert(id, effect);
        }
        registry
    }

    /// Register an effect, replacing any previous one with the same id.
    pub fn register(&mut self, id: MoveId, effect: impl MoveEffect + 'static) {
        self.effects.insert(id, Box::new(effect));
    }

    /// Register an effect under the hash of a move's text.
    pub fn register_text(&mut self, text: &str, effect: impl MoveEffect + 'static) -> MoveId {
        let id = MoveId::from_text(text);
        self.register(id.clone(), effect);
        id
    }

    #[must_use]
    pub fn get(&self, id: &MoveId) -> Option<&dyn MoveEffect> {
        self.effects.get(id).map(|effect| effect.as_ref())
    }

    #[must_use]
    pub fn contains(&self, id: &MoveId) -> bool {
        self.effects.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.effects.keys().map(MoveId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("EffectRegistry").field("effects", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectContext;

    fn nothing(_: &mut EffectContext<'_>) -> Option<i32> {
        None
    }

    #[test]
    fn test_standard_registry() {
        let registry = EffectRegistry::standard();
        assert_eq!(registry.len(), 8);
        assert!(registry.get(&MoveId::new("80bb2a9da8285b74151c")).is_some());
    }

    #[test]
    fn test_register_text() {
        let mut registry = EffectRegistry::new();
        assert!(registry.is_empty());

        let id = registry.register_text("Nothing happens.", nothing);
        assert_eq!(id, MoveId::from_text("Nothing happens."));
        assert!(registry.contains(&id));
    }

    #[test]
    fn test_debug_lists_ids() {
        let mut registry = EffectRegistry::new();
        registry.register(MoveId::new("b"), nothing);
        registry.register(MoveId::new("a"), nothing);
        assert_eq!(format!("{:?}", registry), r#"EffectRegistry { effects: ["a", "b"] }"#);
    }
}
