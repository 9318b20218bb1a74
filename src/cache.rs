//! Process-lifetime cache of building indexes per campus.

use std::collections::HashMap;
use std::sync::Arc;

use crate::index::BuildingIndex;
use crate::models::Anchor;

/// Building indexes keyed by anchor rounded to a ~1 km grid.
///
/// Empty indexes (failed or fruitless fetches) are cached like any other
/// and are only refetched after [`CampusCache::clear`].
#[derive(Debug, Default)]
pub struct CampusCache {
    entries: HashMap<String, Arc<BuildingIndex>>,
}

/// Cache key for an anchor: both coordinates rounded to 2 decimal places
pub fn cache_key(anchor: Anchor) -> String {
    format!("{:.2},{:.2}", anchor.lat, anchor.lon)
}

impl CampusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, anchor: Anchor) -> Option<Arc<BuildingIndex>> {
        self.entries.get(&cache_key(anchor)).cloned()
    }

    /// Store `index` for the anchor's grid cell and return the shared handle.
    pub fn insert(&mut self, anchor: Anchor, index: BuildingIndex) -> Arc<BuildingIndex> {
        let index = Arc::new(index);
        self.entries.insert(cache_key(anchor), Arc::clone(&index));
        index
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
