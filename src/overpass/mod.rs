//! OSM building fetcher backed by the Overpass API.

mod client;
mod query;

pub use client::{BuildingSource, OverpassClient};
pub use query::{building_query, OverpassElement, OverpassResponse};
