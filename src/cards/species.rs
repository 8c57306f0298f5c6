//! Species definitions - immutable card data.
//!
//! `Species` holds the unchanging properties of a creature card (HP,
//! element, moves, retreat cost, weakness/resistance, lineage). Per-game
//! state such as damage and attached energy lives in `Unit`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::element::{Element, EnergyMap};
use super::move_id::MoveId;

/// Stable identifier of a species record (e.g. `fs196sliggoo`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub String);

impl SpeciesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arithmetic applied to incoming damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Multiply,
    Divide,
    Add,
    Subtract,
}

impl Operator {
    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '*' | 'x' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            _ => None,
        }
    }
}

/// Reasons a damage transform string does not parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformParseError {
    #[error("invalid operator `{0}`")]
    Operator(String),
    #[error("invalid operand `{0}`")]
    Operand(String),
}

/// A damage transform such as `*2` or `-30`.
///
/// ```
/// use pkmn_battle::cards::DamageTransform;
///
/// let double: DamageTransform = "x2".parse().unwrap();
/// assert_eq!(double.apply(30), 60);
///
/// let soften: DamageTransform = "-30".parse().unwrap();
/// assert_eq!(soften.apply(20), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTransform {
    pub op: Operator,
    pub operand: i32,
}

impl DamageTransform {
    #[must_use]
    pub const fn new(op: Operator, operand: i32) -> Self {
        Self { op, operand }
    }

    /// Apply to a damage value. The result never drops below zero.
    #[must_use]
    pub fn apply(&self, damage: i32) -> i32 {
        let result = match self.op {
            Operator::Multiply => damage.saturating_mul(self.operand),
            Operator::Divide if self.operand == 0 => damage,
            Operator::Divide => damage / self.operand,
            Operator::Add => damage.saturating_add(self.operand),
            Operator::Subtract => damage.saturating_sub(self.operand),
        };
        result.max(0)
    }
}

impl FromStr for DamageTransform {
    type Err = TransformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let symbol = chars.next().ok_or_else(|| TransformParseError::Operator(String::new()))?;
        let op = Operator::from_symbol(symbol)
            .ok_or_else(|| TransformParseError::Operator(symbol.to_string()))?;

        let operand = chars.as_str();
        if operand.is_empty() || !operand.chars().all(|c| c.is_ascii_digit()) {
            return Err(TransformParseError::Operand(operand.to_string()));
        }
        let operand = operand
            .parse()
            .map_err(|_| TransformParseError::Operand(operand.to_string()))?;

        Ok(Self { op, operand })
    }
}

/// A weakness or resistance entry: attacker element plus transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub element: Element,
    pub transform: DamageTransform,
}

impl Modifier {
    #[must_use]
    pub const fn new(element: Element, transform: DamageTransform) -> Self {
        Self { element, transform }
    }

    /// Does this entry apply to an attacker of `element`?
    #[must_use]
    pub fn matches(&self, element: Element) -> bool {
        self.element == element
    }
}

/// A move a species knows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,

    /// Energy needed to use the move. `Colorless` means any element.
    pub cost: EnergyMap,

    /// Declared damage. `None` for non-damaging moves.
    pub damage: Option<u32>,

    /// Descriptive text shown on the card.
    pub text: Option<String>,

    /// Special-effect binding, if the move has one.
    pub effect: Option<MoveId>,
}

impl Move {
    /// Create a move with no cost and no special effect.
    pub fn new(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            cost: EnergyMap::new(),
            damage: (damage > 0).then_some(damage),
            text: None,
            effect: None,
        }
    }

    /// Add `count` energy of `element` to the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, element: Element, count: u32) -> Self {
        self.cost.add(element, count);
        self
    }

    /// Set the text and bind the effect by its content hash.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.effect = Some(MoveId::from_text(&text));
        self.text = Some(text);
        self
    }

    /// Bind an effect identifier directly.
    #[must_use]
    pub fn with_effect(mut self, effect: MoveId) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Damage before effects and weakness/resistance.
    #[must_use]
    pub fn base_damage(&self) -> i32 {
        self.damage.map_or(0, |d| i32::try_from(d).unwrap_or(i32::MAX))
    }
}

/// Immutable species definition.
///
/// ```
/// use pkmn_battle::cards::{Element, Move, Species};
///
/// let sliggoo = Species::new("fs196sliggoo", "Sliggoo", 90, Element::Dragon)
///     .evolves_from("Goomy")
///     .with_move(Move::new("Tackle", 20).with_cost(Element::Colorless, 1))
///     .with_retreat_cost(2);
///
/// assert!(!sliggoo.is_basic());
/// assert_eq!(sliggoo.moves[0].base_damage(), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,

    /// Opaque image reference for presentation layers.
    pub image: String,

    pub max_hp: i32,
    pub element: Element,
    pub moves: Vec<Move>,
    pub retreat_cost: u32,
    pub weakness: Option<Modifier>,
    pub resistance: Option<Modifier>,

    /// Name of the species this one evolves from. `None` for basics.
    pub evolves_from: Option<String>,
}

impl Species {
    /// Create a basic species with no moves.
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hp: i32, element: Element) -> Self {
        let id = id.into();
        Self {
            image: id.clone(),
            id: SpeciesId(id),
            name: name.into(),
            max_hp,
            element,
            moves: Vec::new(),
            retreat_cost: 0,
            weakness: None,
            resistance: None,
            evolves_from: None,
        }
    }

    #[must_use]
    pub fn with_move(mut self, mv: Move) -> Self {
        self.moves.push(mv);
        self
    }

    #[must_use]
    pub fn with_retreat_cost(mut self, cost: u32) -> Self {
        self.retreat_cost = cost;
        self
    }

    #[must_use]
    pub fn with_weakness(mut self, weakness: Modifier) -> Self {
        self.weakness = Some(weakness);
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, resistance: Modifier) -> Self {
        self.resistance = Some(resistance);
        self
    }

    #[must_use]
    pub fn evolves_from(mut self, name: impl Into<String>) -> Self {
        self.evolves_from = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.evolves_from.is_none()
    }

    /// Does this species know a move with the given name?
    #[must_use]
    pub fn knows_move(&self, name: &str) -> bool {
        self.moves.iter().any(|m| m.name == name)
    }

    /// Damage this species takes from an attacker of `attacker` element.
    ///
    /// Weakness is checked first; resistance only applies when the
    /// weakness entry did not match.
    #[must_use]
    pub fn incoming_damage(&self, attacker: Element, damage: i32) -> i32 {
        if let Some(weakness) = self.weakness.filter(|w| w.matches(attacker)) {
            return weakness.transform.apply(damage);
        }
        if let Some(resistance) = self.resistance.filter(|r| r.matches(attacker)) {
            return resistance.transform.apply(damage);
        }
        damage
    }
}
