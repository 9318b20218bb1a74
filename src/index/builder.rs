//! Building index construction.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::normalize::{extract_subject, is_canonical_name, normalize};
use crate::models::{BuildingRecord, RawBuilding};

/// Lookup table from normalized name (or subject keyword) to building.
///
/// Several keys may point at the same building: its primary name, its
/// alt-name and a subject alias. Keys are kept ordered so that iteration,
/// and with it fuzzy tie-breaking, is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingIndex {
    entries: BTreeMap<String, BuildingRecord>,
}

impl BuildingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `key`, replacing any previous record. Empty keys are ignored.
    pub fn insert(&mut self, key: String, record: BuildingRecord) {
        if key.is_empty() {
            return;
        }
        self.entries.insert(key, record);
    }

    pub fn get(&self, key: &str) -> Option<&BuildingRecord> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BuildingRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, BuildingRecord)> for BuildingIndex {
    fn from_iter<I: IntoIterator<Item = (String, BuildingRecord)>>(iter: I) -> Self {
        let mut index = BuildingIndex::new();
        for (key, record) in iter {
            index.insert(key, record);
        }
        index
    }
}

/// Build the lookup index for a set of fetched buildings.
///
/// Literal names go in first (last write wins), then one subject alias per
/// subject keyword, which never displaces a literal name key.
pub fn build_index(buildings: &[RawBuilding]) -> BuildingIndex {
    let mut index = BuildingIndex::new();

    for building in buildings {
        let normalized = normalize(&building.name);
        if normalized.is_empty() {
            continue;
        }

        let record = building.to_record();
        index.insert(normalized, record.clone());

        if let Some(alt_normalized) = building
            .alt_name
            .as_deref()
            .map(normalize)
            .filter(|alt| !alt.is_empty())
        {
            index.insert(alt_normalized, record);
        }
    }

    for (subject, building) in pick_subject_buildings(buildings) {
        if index.contains_key(subject) {
            debug!(
                "Subject key '{}' already taken by a building name, skipping '{}'",
                subject, building.name
            );
            continue;
        }
        index.insert(subject.to_string(), building.to_record());
    }

    index
}

/// Choose the representative building for each subject keyword.
///
/// The first building seen for a subject is kept unless a later one has a
/// canonical ("... Building", "Department of ...") name and the current one
/// does not.
pub fn pick_subject_buildings(buildings: &[RawBuilding]) -> HashMap<&'static str, &RawBuilding> {
    let mut best: HashMap<&'static str, &RawBuilding> = HashMap::new();

    for building in buildings {
        if normalize(&building.name).is_empty() {
            continue;
        }
        let Some(subject) = extract_subject(&building.name) else {
            continue;
        };

        let replace = match best.get(subject) {
            None => true,
            Some(current) => {
                is_canonical_name(&building.name) && !is_canonical_name(&current.name)
            }
        };
        if replace {
            best.insert(subject, building);
        }
    }

    best
}
