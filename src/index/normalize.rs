//! Name normalization and academic-subject extraction.

/// Trailing words that vary between how people and OSM name the same building.
const GENERIC_SUFFIXES: &[&str] = &["building", "hall", "center", "centre"];

/// Academic subjects recognised inside building names, in priority order.
///
/// Matching is by substring, so longer forms must precede their prefixes
/// ("mathematics" before "math").
pub const SUBJECT_KEYWORDS: &[&str] = &[
    "physics",
    "chemistry",
    "biology",
    "mathematics",
    "math",
    "computer",
    "engineering",
    "astronomy",
    "geology",
    "psychology",
    "economics",
    "history",
    "english",
    "philosophy",
    "art",
    "music",
    "theater",
    "business",
    "law",
    "medicine",
    "nursing",
    "education",
    "social",
    "political",
    "anthropology",
    "sociology",
    "linguistics",
    "data science",
];

/// Normalize a building name into an index key.
///
/// Lowercases, collapses whitespace runs and drops trailing generic suffix
/// words ("Smith Hall" -> "smith"). A lone suffix word is kept as-is so that
/// a building named just "Hall" still has a key.
pub fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut tokens: Vec<&str> = lower.split_whitespace().collect();

    // Stripping until no suffix remains keeps normalize idempotent
    // ("Smith Hall Building" -> "smith", not "smith hall").
    while tokens.len() > 1 {
        match tokens.last() {
            Some(last) if GENERIC_SUFFIXES.contains(last) => {
                tokens.pop();
            }
            _ => break,
        }
    }

    tokens.join(" ")
}

/// Find the first subject keyword contained in `name`, case-insensitively.
pub fn extract_subject(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    SUBJECT_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lower.contains(keyword))
}

/// Whether a name reads like the main building of its subject.
pub fn is_canonical_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("building") || lower.contains("department")
}
