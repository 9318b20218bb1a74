//! Campus geocoder - resolves building names to coordinates using OSM data.
//!
//! Buildings near a campus anchor are fetched from the Overpass API, indexed
//! by normalized name and academic subject, and matched exact → subject →
//! fuzzy.

pub mod cache;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod index;
pub mod matcher;
pub mod models;
pub mod overpass;

pub use config::GeocoderConfig;
pub use geocoder::CampusGeocoder;
pub use index::{build_index, normalize, BuildingIndex};
pub use matcher::{match_building, Matcher};
pub use models::{Anchor, BuildingRecord, MatchResult, MatchSource, RawBuilding};
