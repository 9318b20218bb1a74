//! Geocoding match results.

use serde::{Deserialize, Serialize};

use super::BuildingRecord;

/// Which lookup strategy produced a match.
///
/// Only fuzzy matches carry a similarity score (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source")]
pub enum MatchSource {
    #[serde(rename = "osm_exact")]
    Exact,
    #[serde(rename = "osm_subject")]
    Subject,
    #[serde(rename = "osm_fuzzy")]
    Fuzzy { match_score: f64 },
}

impl MatchSource {
    /// Fixed confidence for exact/subject, scaled into [0.5, 0.9] for fuzzy.
    pub fn confidence(&self) -> f64 {
        match self {
            MatchSource::Exact => 0.95,
            MatchSource::Subject => 0.85,
            MatchSource::Fuzzy { match_score } => 0.5 + (match_score / 100.0) * 0.4,
        }
    }

    pub fn match_score(&self) -> Option<f64> {
        match self {
            MatchSource::Fuzzy { match_score } => Some(*match_score),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSource::Exact => write!(f, "exact"),
            MatchSource::Subject => write!(f, "subject"),
            MatchSource::Fuzzy { .. } => write!(f, "fuzzy"),
        }
    }
}

/// A resolved building location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub lat: f64,
    #[serde(rename = "lng")]
    pub lon: f64,

    /// Confidence in the match (0.0 to 1.0)
    pub confidence: f64,

    /// Strategy tag, flattened as `source` (+ `match_score` for fuzzy)
    #[serde(flatten)]
    pub source: MatchSource,

    /// Display name of the matched building
    pub matched_name: String,
}

impl MatchResult {
    pub fn new(record: &BuildingRecord, source: MatchSource) -> Self {
        Self {
            lat: record.lat,
            lon: record.lon,
            confidence: source.confidence(),
            source,
            matched_name: record.full_name.clone(),
        }
    }

    pub fn match_score(&self) -> Option<f64> {
        self.source.match_score()
    }
}
