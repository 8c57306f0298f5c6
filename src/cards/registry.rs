//! Card database for species lookup.
//!
//! The `CardDatabase` stores every species of a card pool, keyed by its
//! stable id. Species are shared behind `Arc`, so building decks never
//! copies card data.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::CardDataError;
use super::species::{Species, SpeciesId};
use super::validate::{validate_record, IssueKind, SpeciesRecord, ValidationReport};
use crate::effects::EffectRegistry;

/// Database of species definitions.
///
/// ## Example
///
/// ```
/// use pkmn_battle::cards::{CardDatabase, Element, Species};
///
/// let mut db = CardDatabase::new();
/// db.insert(Species::new("xy001goomy", "Goomy", 50, Element::Dragon));
///
/// let goomy = db.by_name("Goomy").unwrap();
/// assert_eq!(goomy.max_hp, 50);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardDatabase {
    species: FxHashMap<SpeciesId, Arc<Species>>,
}

impl CardDatabase {
    /// Create a new empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON card database.
    ///
    /// Only JSON that is not an object of records is an error. A record
    /// with missing or wrongly typed fields is reported as malformed and
    /// skipped; everything else is collected into the returned report and
    /// only records with fatal issues are left out.
    pub fn from_json(json: &str, effects: &EffectRegistry) -> Result<(Self, ValidationReport), CardDataError> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut report = ValidationReport::new();
        let mut records = BTreeMap::new();

        for (id, value) in raw {
            match serde_json::from_value::<SpeciesRecord>(value) {
                Ok(record) => {
                    records.insert(id, record);
                }
                Err(err) => {
                    report.push(&id, IssueKind::MalformedRecord(err.to_string()));
                    report.push(&id, IssueKind::RecordSkipped);
                }
            }
        }

        let db = Self::validate_all(&mut records, effects, &mut report);
        Ok((db, report))
    }

    /// Validate raw records.
    ///
    /// Also returns the records with move ids repaired, ready to be written
    /// back to the data file.
    pub fn from_records(
        mut records: BTreeMap<String, SpeciesRecord>,
        effects: &EffectRegistry,
    ) -> (Self, BTreeMap<String, SpeciesRecord>, ValidationReport) {
        let mut report = ValidationReport::new();
        let db = Self::validate_all(&mut records, effects, &mut report);
        (db, records, report)
    }

    fn validate_all(
        records: &mut BTreeMap<String, SpeciesRecord>,
        effects: &EffectRegistry,
        report: &mut ValidationReport,
    ) -> Self {
        let mut db = Self::new();
        for (id, record) in records.iter_mut() {
            if let Some(species) = validate_record(id, record, |m| effects.contains(m), report) {
                db.insert(species);
            }
        }

        tracing::debug!(species = db.len(), issues = report.len(), "card database loaded");
        db
    }

    /// Insert a species, replacing any with the same id.
    pub fn insert(&mut self, species: Species) -> Arc<Species> {
        let species = Arc::new(species);
        self.species.insert(species.id.clone(), Arc::clone(&species));
        species
    }

    #[must_use]
    pub fn get(&self, id: &SpeciesId) -> Option<&Arc<Species>> {
        self.species.get(id)
    }

    /// Look up by id string.
    #[must_use]
    pub fn get_str(&self, id: &str) -> Option<&Arc<Species>> {
        self.species.get(&SpeciesId::new(id))
    }

    /// First species with the given display name, by id order.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<Species>> {
        self.species
            .values()
            .filter(|s| s.name == name)
            .min_by(|a, b| a.id.cmp(&b.id))
    }

    #[must_use]
    pub fn contains(&self, id: &SpeciesId) -> bool {
        self.species.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Species>> {
        self.species.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Element;

    const DATA: &str = r#"{
        "xy001goomy": {
            "name": "Goomy", "img_id": "xy001goomy", "max_hp": 50,
            "element": "dragon", "retreat_cost": 1,
            "moves": [{ "name": "Tackle", "energy": { "colorless": 1 }, "damage": 10 }]
        },
        "xy002sliggoo": {
            "name": "Sliggoo", "img_id": "xy002sliggoo", "max_hp": 85,
            "element": "dragon", "retreat_cost": 2, "evolves_from": "Goomy",
            "moves": []
        },
        "xy003broken": {
            "name": "Broken", "img_id": "xy003broken", "max_hp": 40,
            "element": "plasma"
        }
    }"#;

    #[test]
    fn test_load_collects_issues() {
        let (db, report) = CardDatabase::from_json(DATA, &EffectRegistry::standard()).unwrap();

        assert_eq!(db.len(), 2);
        assert!(db.get_str("xy003broken").is_none());

        let sliggoo = db.get_str("xy002sliggoo").unwrap();
        assert_eq!(sliggoo.evolves_from.as_deref(), Some("Goomy"));
        assert_eq!(sliggoo.element, Element::Dragon);

        assert_eq!(
            report.for_record("xy002sliggoo").cloned().collect::<Vec<_>>(),
            vec![IssueKind::HpNotMultipleOfTen(85)]
        );
        assert_eq!(report.skipped().collect::<Vec<_>>(), vec!["xy003broken"]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = CardDatabase::from_json("[1, 2", &EffectRegistry::standard());
        assert!(matches!(result, Err(CardDataError::Json(_))));

        let not_an_object = CardDatabase::from_json("[1, 2]", &EffectRegistry::standard());
        assert!(matches!(not_an_object, Err(CardDataError::Json(_))));
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let json = r#"{
            "xy001goomy": {
                "name": "Goomy", "img_id": "xy001goomy", "max_hp": 50, "element": "dragon"
            },
            "xy004froakie": { "name": "Froakie", "max_hp": "60", "element": "water" }
        }"#;

        let (db, report) = CardDatabase::from_json(json, &EffectRegistry::standard()).unwrap();

        assert_eq!(db.len(), 1);
        assert!(db.get_str("xy001goomy").is_some());
        let kinds: Vec<_> = report.for_record("xy004froakie").collect();
        assert!(matches!(kinds[0], IssueKind::MalformedRecord(_)));
        assert!(kinds[0].is_fatal());
        assert_eq!(report.skipped().collect::<Vec<_>>(), vec!["xy004froakie"]);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut db = CardDatabase::new();
        assert!(db.is_empty());

        db.insert(Species::new("xy001goomy", "Goomy", 50, Element::Dragon));
        assert!(db.contains(&SpeciesId::new("xy001goomy")));
        assert_eq!(db.by_name("Goomy").map(|s| s.max_hp), Some(50));
        assert!(db.by_name("Sliggoo").is_none());
        assert_eq!(db.iter().count(), 1);
    }
}
