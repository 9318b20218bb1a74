//! Campus building geocoder: fetch, index, cache and match.

use std::sync::Arc;

use tracing::debug;

use crate::cache::CampusCache;
use crate::config::{GeocoderConfig, DEFAULT_RADIUS_M};
use crate::error::ConfigError;
use crate::index::{build_index, BuildingIndex};
use crate::matcher::Matcher;
use crate::models::{Anchor, MatchResult};
use crate::overpass::{BuildingSource, OverpassClient};

/// Resolves building names near a campus anchor to coordinates.
///
/// Owns its campus cache; indexes live as long as the geocoder or until
/// [`CampusGeocoder::clear_cache`].
pub struct CampusGeocoder<S = OverpassClient> {
    source: S,
    cache: CampusCache,
    matcher: Matcher,
    radius_m: u32,
}

impl CampusGeocoder<OverpassClient> {
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, ConfigError> {
        let source = OverpassClient::new(config)?;
        Ok(Self::new(source, Matcher::new(config.min_match_score), config.radius_m))
    }
}

impl<S: BuildingSource> CampusGeocoder<S> {
    pub fn new(source: S, matcher: Matcher, radius_m: u32) -> Self {
        Self {
            source,
            cache: CampusCache::new(),
            matcher,
            radius_m,
        }
    }

    /// Use `source` with the default threshold and search radius
    pub fn with_source(source: S) -> Self {
        Self::new(source, Matcher::default(), DEFAULT_RADIUS_M)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Buildings around the anchor within the configured radius.
    pub async fn get_campus_buildings(
        &mut self,
        anchor_lat: f64,
        anchor_lon: f64,
    ) -> Arc<BuildingIndex> {
        let radius_m = self.radius_m;
        self.get_campus_buildings_within(anchor_lat, anchor_lon, radius_m)
            .await
    }

    /// Cached index for the anchor's grid cell, fetching on first use.
    ///
    /// The radius only applies to the fetch that populates a cell; later
    /// calls for the same cell reuse that index whatever radius they pass.
    pub async fn get_campus_buildings_within(
        &mut self,
        anchor_lat: f64,
        anchor_lon: f64,
        radius_m: u32,
    ) -> Arc<BuildingIndex> {
        let anchor = Anchor::new(anchor_lat, anchor_lon);

        if let Some(index) = self.cache.get(anchor) {
            debug!("Campus cache hit for {} ({} keys)", anchor, index.len());
            return index;
        }

        debug!("Campus cache miss for {}, fetching within {}m", anchor, radius_m);
        let buildings = self.source.fetch(anchor, radius_m).await;
        self.cache.insert(anchor, build_index(&buildings))
    }

    /// Geocode a building name using OSM buildings around the anchor.
    ///
    /// Returns `None` for blank names, campuses with no known buildings and
    /// names that match nothing closely enough.
    pub async fn osm_geocode(
        &mut self,
        building_name: &str,
        anchor_lat: f64,
        anchor_lon: f64,
    ) -> Option<MatchResult> {
        if building_name.trim().is_empty() {
            return None;
        }

        let index = self.get_campus_buildings(anchor_lat, anchor_lon).await;
        self.matcher.find(building_name, &index)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
