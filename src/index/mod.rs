//! Building name normalization and index construction.

mod builder;
mod normalize;

pub use builder::{build_index, pick_subject_buildings, BuildingIndex};
pub use normalize::{extract_subject, is_canonical_name, normalize, SUBJECT_KEYWORDS};
