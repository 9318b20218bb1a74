//! Building records as fetched from OSM and held by the index.

use serde::{Deserialize, Serialize};

/// A known point on a campus, used to bound the building search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub lat: f64,
    pub lon: f64,
}

impl Anchor {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A named building as extracted from an Overpass element, before indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBuilding {
    pub name: String,
    pub alt_name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl RawBuilding {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            alt_name: None,
            lat,
            lon,
        }
    }

    pub fn with_alt_name(mut self, alt_name: impl Into<String>) -> Self {
        self.alt_name = Some(alt_name.into());
        self
    }

    /// The indexed form. The display name is always the primary name.
    pub fn to_record(&self) -> BuildingRecord {
        BuildingRecord {
            lat: self.lat,
            lon: self.lon,
            full_name: self.name.clone(),
        }
    }
}

/// Point location and display name of an indexed building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub lat: f64,
    pub lon: f64,
    pub full_name: String,
}
