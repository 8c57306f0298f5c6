//! Card database validation.
//!
//! Card data is an external asset. Loading it is lint-style: every
//! inconsistency is collected into a `ValidationReport` and the rest of the
//! database still loads. Only a record that cannot become a typed `Species`
//! at all is skipped, and that is reported too: a malformed record, an
//! unknown element, HP or damage out of range, an unparseable transform.
//!
//! ## Record format
//!
//! ```json
//! {
//!   "fs196sliggoo": {
//!     "name": "Sliggoo", "img_id": "fs196sliggoo", "max_hp": 90,
//!     "element": "dragon", "retreat_cost": 2, "evolves_from": "Goomy",
//!     "weakness": { "element": "fairy", "lambda": "*2" },
//!     "moves": [
//!       { "name": "Tackle", "energy": { "colorless": 1 }, "damage": 20 },
//!       { "name": "Icy Wind", "energy": { "water": 1 },
//!         "text": "The Defending Pokemon is now Asleep.",
//!         "move_id": "3ac392dc9a1025b9b48e" }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::element::{Element, EnergyMap};
use super::move_id::MoveId;
use super::species::{DamageTransform, Modifier, Move, Species, TransformParseError};

/// Length of the set prefix at the start of every species id (`fs196`).
const SET_PREFIX_LEN: usize = 5;

/// Weakness or resistance, for issue messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifierKind {
    Weakness,
    Resistance,
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Weakness => f.write_str("weakness"),
            ModifierKind::Resistance => f.write_str("resistance"),
        }
    }
}

/// One inconsistency found in a species record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IssueKind {
    #[error("name `{name}` does not appear in the id")]
    NameMismatch { name: String },

    #[error("image id `{img_id}` does not equal the id")]
    ImageMismatch { img_id: String },

    #[error("HP {0} is too low")]
    HpNotPositive(i64),

    #[error("HP {0} is not divisible by 10")]
    HpNotMultipleOfTen(i64),

    #[error("HP {0} is out of range")]
    HpOutOfRange(i64),

    #[error("element `{0}` is invalid")]
    InvalidElement(String),

    #[error("move `{move_name}` costs invalid energy `{element}`")]
    InvalidCostElement { move_name: String, element: String },

    #[error("move `{move_name}` has 0 damage; omit the damage field instead")]
    ZeroDamage { move_name: String },

    #[error("move `{move_name}` damage {damage} is too low")]
    NegativeDamage { move_name: String, damage: i64 },

    #[error("move `{move_name}` damage {damage} is not divisible by 10")]
    DamageNotMultipleOfTen { move_name: String, damage: i64 },

    #[error("move `{move_name}` damage {damage} is out of range")]
    DamageOutOfRange { move_name: String, damage: i64 },

    #[error("move `{move_name}` id set to {id}")]
    MoveIdAssigned { move_name: String, id: MoveId },

    #[error("move `{move_name}` effect {id} has no registered resolver")]
    UnregisteredEffect { move_name: String, id: MoveId },

    #[error("{kind} element `{element}` is invalid")]
    InvalidModifierElement { kind: ModifierKind, element: String },

    #[error("{kind} transform has invalid operator `{op}`")]
    InvalidOperator { kind: ModifierKind, op: String },

    #[error("{kind} transform has invalid number `{operand}`")]
    InvalidOperand { kind: ModifierKind, operand: String },

    #[error("record is malformed: {0}")]
    MalformedRecord(String),

    #[error("record skipped")]
    RecordSkipped,
}

impl IssueKind {
    /// Does this issue prevent the record from loading?
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IssueKind::HpNotPositive(_)
                | IssueKind::HpOutOfRange(_)
                | IssueKind::InvalidElement(_)
                | IssueKind::InvalidCostElement { .. }
                | IssueKind::NegativeDamage { .. }
                | IssueKind::DamageOutOfRange { .. }
                | IssueKind::InvalidModifierElement { .. }
                | IssueKind::InvalidOperator { .. }
                | IssueKind::InvalidOperand { .. }
                | IssueKind::MalformedRecord(_)
        )
    }
}

/// An issue together with the id of the record it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub record: String,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.kind)
    }
}

/// Every issue found while loading a database.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &str, kind: IssueKind) {
        tracing::warn!(record, issue = %kind, "card data issue");
        self.issues.push(ValidationIssue {
            record: record.to_string(),
            kind,
        });
    }

    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issues found in one record.
    pub fn for_record<'a>(&'a self, record: &'a str) -> impl Iterator<Item = &'a IssueKind> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.record == record)
            .map(|issue| &issue.kind)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Ids of records that were not loaded.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::RecordSkipped)
            .map(|issue| issue.record.as_str())
    }
}

// =============================================================================
// Raw records
// =============================================================================

/// A species as stored in card data, before validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    #[serde(default)]
    pub img_id: Option<String>,
    pub max_hp: i64,
    pub element: String,
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
    #[serde(default)]
    pub retreat_cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<ModifierRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<ModifierRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolves_from: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    #[serde(default)]
    pub energy: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModifierRecord {
    pub element: String,
    pub lambda: String,
}

// =============================================================================
// Conversion
// =============================================================================

/// Validate one record and convert it.
///
/// `is_registered` reports whether a move-effect id has a resolver. Stale or
/// missing move ids are repaired in `record` so the caller can write the
/// data back. Returns `None` when a fatal issue was found.
pub fn validate_record(
    id: &str,
    record: &mut SpeciesRecord,
    is_registered: impl Fn(&MoveId) -> bool,
    report: &mut ValidationReport,
) -> Option<Species> {
    let mut issues = Vec::new();

    let compact: String = record.name.split_whitespace().collect::<String>().to_lowercase();
    if id.get(SET_PREFIX_LEN..) != Some(compact.as_str()) {
        issues.push(IssueKind::NameMismatch { name: record.name.clone() });
    }

    let image = record.img_id.clone().unwrap_or_default();
    if image != id {
        issues.push(IssueKind::ImageMismatch { img_id: image.clone() });
    }

    if record.max_hp <= 0 {
        issues.push(IssueKind::HpNotPositive(record.max_hp));
    }
    if record.max_hp % 10 != 0 {
        issues.push(IssueKind::HpNotMultipleOfTen(record.max_hp));
    }
    let max_hp = i32::try_from(record.max_hp).ok();
    if max_hp.is_none() {
        issues.push(IssueKind::HpOutOfRange(record.max_hp));
    }

    let element = record.element.parse::<Element>().ok();
    if element.is_none() {
        issues.push(IssueKind::InvalidElement(record.element.clone()));
    }

    let moves: Vec<Move> = record
        .moves
        .iter_mut()
        .filter_map(|mv| convert_move(mv, &is_registered, &mut issues))
        .collect();
    let all_moves_ok = moves.len() == record.moves.len();

    let weakness = record
        .weakness
        .as_ref()
        .map(|m| convert_modifier(ModifierKind::Weakness, m, &mut issues));
    let resistance = record
        .resistance
        .as_ref()
        .map(|m| convert_modifier(ModifierKind::Resistance, m, &mut issues));

    let fatal = issues.iter().any(IssueKind::is_fatal);
    for issue in issues {
        report.push(id, issue);
    }

    let (Some(element), Some(max_hp), false, true) = (element, max_hp, fatal, all_moves_ok) else {
        report.push(id, IssueKind::RecordSkipped);
        return None;
    };

    let mut species = Species::new(id, record.name.clone(), max_hp, element)
        .with_image(image)
        .with_retreat_cost(record.retreat_cost);
    species.moves = moves;
    species.weakness = weakness.flatten();
    species.resistance = resistance.flatten();
    species.evolves_from = record.evolves_from.clone();
    Some(species)
}

fn convert_move(
    record: &mut MoveRecord,
    is_registered: &impl Fn(&MoveId) -> bool,
    issues: &mut Vec<IssueKind>,
) -> Option<Move> {
    let move_name = record.name.clone();
    let mut ok = true;

    let mut cost = EnergyMap::new();
    for (name, count) in &record.energy {
        match name.parse::<Element>() {
            Ok(element) if element != Element::Dragon => cost.add(element, *count),
            _ => {
                issues.push(IssueKind::InvalidCostElement {
                    move_name: move_name.clone(),
                    element: name.clone(),
                });
                ok = false;
            }
        }
    }

    let damage = match record.damage {
        None => None,
        Some(0) => {
            issues.push(IssueKind::ZeroDamage { move_name: move_name.clone() });
            None
        }
        Some(damage) if damage < 0 => {
            issues.push(IssueKind::NegativeDamage { move_name: move_name.clone(), damage });
            ok = false;
            None
        }
        Some(damage) => {
            if damage % 10 != 0 {
                issues.push(IssueKind::DamageNotMultipleOfTen { move_name: move_name.clone(), damage });
            }
            // Damage must fit in i32.
            match i32::try_from(damage).ok().and_then(|d| u32::try_from(d).ok()) {
                Some(damage) => Some(damage),
                None => {
                    issues.push(IssueKind::DamageOutOfRange { move_name: move_name.clone(), damage });
                    ok = false;
                    None
                }
            }
        }
    };

    let effect = record.text.as_deref().map(|text| {
        let id = MoveId::from_text(text);
        if record.move_id.as_deref() != Some(id.as_str()) {
            issues.push(IssueKind::MoveIdAssigned {
                move_name: move_name.clone(),
                id: id.clone(),
            });
            record.move_id = Some(id.to_string());
        }
        if !is_registered(&id) {
            issues.push(IssueKind::UnregisteredEffect {
                move_name: move_name.clone(),
                id: id.clone(),
            });
        }
        id
    });

    ok.then(|| Move {
        name: move_name,
        cost,
        damage,
        text: record.text.clone(),
        effect,
    })
}

/// Returns `None` (with issues recorded) when the entry is invalid.
fn convert_modifier(kind: ModifierKind, record: &ModifierRecord, issues: &mut Vec<IssueKind>) -> Option<Modifier> {
    let element = match record.element.parse::<Element>() {
        Ok(element) if element != Element::Colorless => Some(element),
        _ => {
            issues.push(IssueKind::InvalidModifierElement {
                kind,
                element: record.element.clone(),
            });
            None
        }
    };

    let transform = match record.lambda.parse::<DamageTransform>() {
        Ok(transform) => Some(transform),
        Err(TransformParseError::Operator(op)) => {
            issues.push(IssueKind::InvalidOperator { kind, op });
            None
        }
        Err(TransformParseError::Operand(operand)) => {
            issues.push(IssueKind::InvalidOperand { kind, operand });
            None
        }
    };

    Some(Modifier::new(element?, transform?))
}
