//! Core data models for the campus geocoder.

pub mod building;
pub mod match_result;

pub use building::{Anchor, BuildingRecord, RawBuilding};
pub use match_result::{MatchResult, MatchSource};
