//! Building name matching: exact, subject keyword, then fuzzy.

mod fuzzy;

pub use fuzzy::{ratio, token_set_ratio};

use tracing::{debug, info};

use crate::config::DEFAULT_MIN_MATCH_SCORE;
use crate::index::{extract_subject, normalize, BuildingIndex};
use crate::models::{MatchResult, MatchSource};

/// Resolves free-text building names against a [`BuildingIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    /// Inclusive lower bound on the fuzzy score (0-100)
    min_match_score: f64,
}

impl Matcher {
    pub fn new(min_match_score: f64) -> Self {
        Self { min_match_score }
    }

    /// Find the building best matching `query`, trying exact, subject and
    /// fuzzy lookups in that order.
    pub fn find(&self, query: &str, index: &BuildingIndex) -> Option<MatchResult> {
        if index.is_empty() {
            return None;
        }

        let normalized = normalize(query);
        if normalized.is_empty() {
            return None;
        }

        let (record, source) = if let Some(record) = index.get(&normalized) {
            (record, MatchSource::Exact)
        } else if let Some(record) = extract_subject(query).and_then(|subject| index.get(subject)) {
            (record, MatchSource::Subject)
        } else {
            let (key, score) = best_fuzzy_key(&normalized, index)?;
            if score < self.min_match_score {
                debug!(
                    "Best fuzzy candidate for '{}' was '{}' (score: {:.1}), below {}",
                    query, key, score, self.min_match_score
                );
                return None;
            }
            (index.get(key)?, MatchSource::Fuzzy { match_score: score })
        };

        match source.match_score() {
            Some(score) => info!(
                "OSM {} match: '{}' -> '{}' (score: {:.1})",
                source, query, record.full_name, score
            ),
            None => info!("OSM {} match: '{}' -> '{}'", source, query, record.full_name),
        }
        Some(MatchResult::new(record, source))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MATCH_SCORE)
    }
}

/// Match with the default fuzzy threshold.
pub fn match_building(query: &str, index: &BuildingIndex) -> Option<MatchResult> {
    Matcher::default().find(query, index)
}

/// Highest scoring index key. Keys are visited in ascending order and only a
/// strictly better score replaces the leader, so ties go to the smallest key.
fn best_fuzzy_key<'a>(query: &str, index: &'a BuildingIndex) -> Option<(&'a str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for key in index.keys() {
        let score = token_set_ratio(query, key);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((key, score));
        }
    }
    best
}
