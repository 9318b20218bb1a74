use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.private.coffee/api/interpreter",
];

pub const DEFAULT_RADIUS_M: u32 = 2000;

/// Minimum fuzzy similarity (0-100, inclusive) for a fuzzy match
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 60.0;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Overpass interpreter URLs; the first is primary, the rest are tried in order
    pub endpoints: Vec<String>,
    pub radius_m: u32,
    pub timeout_secs: u64,
    pub min_match_score: f64,
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            radius_m: DEFAULT_RADIUS_M,
            timeout_secs: 30,
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            user_agent: "CampusGeocoder/0.1 (building lookup)".to_string(),
        }
    }
}

impl GeocoderConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_takes_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
endpoints = ["http://localhost:12345/api/interpreter"]
min_match_score = 65.0
"#
        )
        .unwrap();

        let config = GeocoderConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.endpoints, vec!["http://localhost:12345/api/interpreter"]);
        assert_eq!(config.min_match_score, 65.0);
        assert_eq!(config.radius_m, DEFAULT_RADIUS_M);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_missing_file() {
        let result = GeocoderConfig::load_from_file("/nonexistent/geocoder.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "radius_m = \"far\"").unwrap();

        let result = GeocoderConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
